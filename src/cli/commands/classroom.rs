use crate::cli::commands::{ask_confirmation, open_pool, print_json};
use crate::cli::parser::ClassroomAction;
use crate::config::Config;
use crate::core::Hierarchy;
use crate::errors::AppResult;
use crate::models::classroom::{Classroom, ClassroomPatch, NewClassroom};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

fn print_classrooms(classrooms: &[Classroom]) {
    let mut table = Table::new(&["ID", "NUMBER", "CAMPUS"]);
    for c in classrooms {
        table.add_row(vec![
            c.id.to_string(),
            c.number.to_string(),
            c.campus_id.to_string(),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(action: &ClassroomAction, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg, action.is_read_only())?;

    match action {
        ClassroomAction::Add { campus, number } => {
            let classroom = Hierarchy::create_classroom(
                &mut pool,
                &NewClassroom {
                    number: *number,
                    campus_id: *campus,
                },
            )?;
            success(format!(
                "Classroom {} created in campus {} (id {}).",
                classroom.number, classroom.campus_id, classroom.id
            ));
        }
        ClassroomAction::Edit { id, number, campus } => {
            let patch = ClassroomPatch {
                number: *number,
                campus_id: *campus,
            };
            let classroom = Hierarchy::update_classroom(&mut pool, *id, &patch)?;
            success(format!("Classroom {} updated.", classroom.id));
        }
        ClassroomAction::Del { id, yes } => {
            let prompt = format!(
                "Delete classroom {} with all its places, devices and problems?",
                id
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
            let report = Hierarchy::delete_classroom(&mut pool, *id)?;
            success(format!("Classroom {} deleted: {}.", id, report.summary()));
        }
        ClassroomAction::List { campus } => {
            let classrooms = Hierarchy::list_classrooms(&pool, *campus)?;
            if json {
                print_json(&classrooms)?;
            } else if classrooms.is_empty() {
                println!("No classrooms.");
            } else {
                print_classrooms(&classrooms);
            }
        }
        ClassroomAction::Show { id } => {
            let classroom = Hierarchy::get_classroom(&pool, *id)?;
            if json {
                print_json(&classroom)?;
            } else {
                print_classrooms(std::slice::from_ref(&classroom));
            }
        }
    }

    Ok(())
}
