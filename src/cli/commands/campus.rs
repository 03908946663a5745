use crate::cli::commands::{ask_confirmation, open_pool, print_json};
use crate::cli::parser::CampusAction;
use crate::config::Config;
use crate::core::Hierarchy;
use crate::errors::AppResult;
use crate::models::campus::{Campus, CampusPatch, NewCampus};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

fn print_campuses(campuses: &[Campus]) {
    let mut table = Table::new(&["ID", "NUMBER", "ADDRESS"]);
    for c in campuses {
        table.add_row(vec![c.id.to_string(), c.number.to_string(), c.address.clone()]);
    }
    print!("{}", table.render());
}

pub fn handle(action: &CampusAction, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg, action.is_read_only())?;

    match action {
        CampusAction::Add { number, address } => {
            let campus = Hierarchy::create_campus(
                &mut pool,
                &NewCampus {
                    number: *number,
                    address: address.clone(),
                },
            )?;
            success(format!("Campus {} created (id {}).", campus.number, campus.id));
        }
        CampusAction::Edit {
            id,
            number,
            address,
        } => {
            let patch = CampusPatch {
                number: *number,
                address: address.clone(),
            };
            let campus = Hierarchy::update_campus(&mut pool, *id, &patch)?;
            success(format!("Campus {} updated.", campus.id));
        }
        CampusAction::Del { id, yes } => {
            let prompt = format!(
                "Delete campus {} with all its classrooms, places, devices and problems?",
                id
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
            let report = Hierarchy::delete_campus(&mut pool, *id)?;
            success(format!("Campus {} deleted: {}.", id, report.summary()));
        }
        CampusAction::List => {
            let campuses = Hierarchy::list_campuses(&pool)?;
            if json {
                print_json(&campuses)?;
            } else if campuses.is_empty() {
                println!("No campuses.");
            } else {
                print_campuses(&campuses);
            }
        }
        CampusAction::Show { id } => {
            let campus = Hierarchy::get_campus(&pool, *id)?;
            if json {
                print_json(&campus)?;
            } else {
                print_campuses(std::slice::from_ref(&campus));
            }
        }
    }

    Ok(())
}
