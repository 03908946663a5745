use crate::cli::commands::{ask_confirmation, open_pool, print_json};
use crate::cli::parser::PlaceAction;
use crate::config::Config;
use crate::core::PlacementRegistry;
use crate::errors::AppResult;
use crate::models::place::{NewPlace, Place, PlacePatch};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

fn print_places(places: &[Place]) {
    let mut table = Table::new(&["ID", "CLASSROOM", "X", "Y", "TYPE"]);
    for p in places {
        table.add_row(vec![
            p.id.to_string(),
            p.classroom_id.to_string(),
            p.x.to_string(),
            p.y.to_string(),
            p.place_type.clone(),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(action: &PlaceAction, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg, action.is_read_only())?;

    match action {
        PlaceAction::Add {
            classroom,
            x,
            y,
            place_type,
        } => {
            let place = PlacementRegistry::create_place(
                &mut pool,
                &NewPlace {
                    classroom_id: *classroom,
                    x: *x,
                    y: *y,
                    place_type: place_type.clone(),
                },
            )?;
            success(format!(
                "Place ({}, {}) created in classroom {} (id {}).",
                place.x, place.y, place.classroom_id, place.id
            ));
        }
        PlaceAction::Edit {
            id,
            x,
            y,
            place_type,
        } => {
            let patch = PlacePatch {
                x: *x,
                y: *y,
                place_type: place_type.clone(),
            };
            let place = PlacementRegistry::update_place(&mut pool, *id, &patch)?;
            success(format!(
                "Place {} now at ({}, {}) '{}'.",
                place.id, place.x, place.y, place.place_type
            ));
        }
        PlaceAction::Del { id, yes } => {
            let prompt = format!("Delete place {} with its devices and their problems?", id);
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
            let report = PlacementRegistry::delete_place(&mut pool, *id)?;
            success(format!("Place {} deleted: {}.", id, report.summary()));
        }
        PlaceAction::List { classroom } => {
            let places = PlacementRegistry::list_places(&pool, *classroom)?;
            if json {
                print_json(&places)?;
            } else if places.is_empty() {
                println!("No places.");
            } else {
                print_places(&places);
            }
        }
        PlaceAction::Show { id } => {
            let place = PlacementRegistry::get_place(&pool, *id)?;
            if json {
                print_json(&place)?;
            } else {
                print_places(std::slice::from_ref(&place));
            }
        }
    }

    Ok(())
}
