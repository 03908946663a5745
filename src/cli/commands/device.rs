use crate::cli::commands::{ask_confirmation, open_pool, opt_or_dash, print_json};
use crate::cli::parser::DeviceAction;
use crate::config::Config;
use crate::core::DeviceRegistry;
use crate::errors::AppResult;
use crate::models::device::{Device, DevicePatch, NewDevice};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_status;
use crate::utils::table::Table;

fn print_devices(devices: &[Device]) {
    let mut table = Table::new(&["ID", "PLACE", "DESCRIPTION"]);
    for d in devices {
        table.add_row(vec![
            d.id.to_string(),
            d.place_id.to_string(),
            opt_or_dash(d.description.as_deref()),
        ]);
    }

    // Status goes last so ANSI codes do not disturb column widths.
    let rendered = table.render();
    let headers = ["STATUS".to_string(), String::new()];
    let statuses = devices.iter().map(|d| colorize_status(&d.status));
    let lines = rendered.lines();
    for (line, status) in lines.zip(headers.into_iter().chain(statuses)) {
        println!("{}{}", line, status);
    }
}

pub fn handle(action: &DeviceAction, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg, action.is_read_only())?;

    match action {
        DeviceAction::Add { place, description } => {
            let device = DeviceRegistry::create_device(
                &mut pool,
                &NewDevice {
                    place_id: *place,
                    description: description.clone(),
                },
            )?;
            success(format!(
                "Device created at place {} (id {}).",
                device.place_id, device.id
            ));
        }
        DeviceAction::Edit {
            id,
            place,
            description,
        } => {
            // an empty description clears it
            let patch = DevicePatch {
                place_id: *place,
                description: description
                    .as_ref()
                    .map(|d| (!d.is_empty()).then(|| d.clone())),
            };
            let device = DeviceRegistry::update_device(&mut pool, *id, &patch)?;
            success(format!("Device {} updated.", device.id));
        }
        DeviceAction::Del { id, yes } => {
            let prompt = format!("Delete device {} with its problems?", id);
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
            let report = DeviceRegistry::delete_device(&mut pool, *id)?;
            success(format!("Device {} deleted: {}.", id, report.summary()));
        }
        DeviceAction::List { place } => {
            let devices = DeviceRegistry::list_devices(&pool, *place)?;
            if json {
                print_json(&devices)?;
            } else if devices.is_empty() {
                println!("No devices.");
            } else {
                print_devices(&devices);
            }
        }
        DeviceAction::Show { id } => {
            let device = DeviceRegistry::get_device(&pool, *id)?;
            if json {
                print_json(&device)?;
            } else {
                print_devices(std::slice::from_ref(&device));
            }
        }
    }

    Ok(())
}
