use crate::cli::commands::{open_pool, print_json};
use crate::cli::parser::ProblemAction;
use crate::config::Config;
use crate::core::{ProblemStore, StatusChange};
use crate::errors::AppResult;
use crate::models::problem::{NewProblem, Problem, ProblemPatch, ProblemStatus};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

fn print_problems(problems: &[Problem]) {
    let mut table = Table::new(&["ID", "DEVICE", "USER", "ACTIVE", "STATUS", "DESCRIPTION"]);
    for p in problems {
        table.add_row(vec![
            p.id.to_string(),
            p.device_id.to_string(),
            p.user_id.to_string(),
            if p.active { "yes" } else { "no" }.to_string(),
            p.status.to_string(),
            p.description.clone(),
        ]);
    }
    print!("{}", table.render());
}

fn report_change(change: &StatusChange) {
    let shown = |s: &str| {
        if s.is_empty() {
            "(none)".to_string()
        } else {
            s.to_string()
        }
    };
    if change.written {
        info(format!(
            "Device {} status: {} → {}",
            change.device_id,
            shown(&change.previous),
            shown(&change.current)
        ));
    } else {
        info(format!(
            "Device {} status unchanged: {}",
            change.device_id,
            shown(&change.current)
        ));
    }
}

pub fn handle(action: &ProblemAction, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg, action.is_read_only())?;

    match action {
        ProblemAction::Add {
            device,
            user,
            description,
            status,
            inactive,
        } => {
            let status = match status {
                Some(s) => ProblemStatus::parse(s)?,
                None => ProblemStatus::default(),
            };
            let new = NewProblem::reported(*device, *user, description.clone())
                .with_status(status)
                .with_active(!*inactive);

            let (problem, change) = ProblemStore::create(&mut pool, &new)?;
            success(format!(
                "Problem {} reported on device {}.",
                problem.id, problem.device_id
            ));
            report_change(&change);
        }
        ProblemAction::Edit {
            id,
            description,
            status,
            active,
            device,
            user,
        } => {
            let patch = ProblemPatch {
                description: description.clone(),
                active: *active,
                status: status.as_deref().map(ProblemStatus::parse).transpose()?,
                device_id: *device,
                user_id: *user,
            };
            let (problem, changes) = ProblemStore::update(&mut pool, *id, &patch)?;
            success(format!("Problem {} updated.", problem.id));
            for c in &changes {
                report_change(c);
            }
        }
        ProblemAction::Del { id } => {
            let change = ProblemStore::delete(&mut pool, *id)?;
            success(format!("Problem {} deleted.", id));
            report_change(&change);
        }
        ProblemAction::List { device } => {
            let problems = ProblemStore::list(&pool, *device)?;
            if json {
                print_json(&problems)?;
            } else if problems.is_empty() {
                println!("No problems.");
            } else {
                print_problems(&problems);
            }
        }
        ProblemAction::Show { id } => {
            let problem = ProblemStore::get(&pool, *id)?;
            if json {
                print_json(&problem)?;
            } else {
                print_problems(std::slice::from_ref(&problem));
            }
        }
    }

    Ok(())
}
