//! Device inventory.
//!
//! Callers never set `status`; it starts empty and is maintained by
//! `core::status` as problems come and go.

use crate::core::cascade::{CascadeCoordinator, CascadeReport};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::device::{Device, DevicePatch, NewDevice};
use tracing::info;

pub struct DeviceRegistry;

impl DeviceRegistry {
    pub fn create_device(pool: &mut DbPool, new: &NewDevice) -> AppResult<Device> {
        let tx = pool.begin()?;
        if queries::get_place(&tx, new.place_id)?.is_none() {
            return Err(AppError::not_found("Place", new.place_id));
        }

        let id = queries::insert_device(&tx, new)?;
        ttlog(
            &tx,
            "add",
            &format!("device {}", id),
            &format!(
                "Device at place {} ({})",
                new.place_id,
                new.description.as_deref().unwrap_or("-")
            ),
        )?;
        let device =
            queries::get_device(&tx, id)?.ok_or_else(|| AppError::not_found("Device", id))?;
        tx.commit()?;

        info!(device_id = id, place_id = new.place_id, "device created");
        Ok(device)
    }

    /// Partial update of `place_id` and `description`. Moving a device keeps
    /// its problems and therefore its status.
    pub fn update_device(
        pool: &mut DbPool,
        device_id: i64,
        patch: &DevicePatch,
    ) -> AppResult<Device> {
        let tx = pool.begin()?;
        let current = queries::get_device(&tx, device_id)?
            .ok_or_else(|| AppError::not_found("Device", device_id))?;
        if patch.is_empty() {
            return Ok(current);
        }
        if let Some(place_id) = patch.place_id
            && queries::get_place(&tx, place_id)?.is_none()
        {
            return Err(AppError::not_found("Place", place_id));
        }

        let next = Device {
            place_id: patch.place_id.unwrap_or(current.place_id),
            description: match &patch.description {
                Some(d) => d.clone(),
                None => current.description.clone(),
            },
            ..current.clone()
        };
        queries::update_device(&tx, &next)?;
        ttlog(
            &tx,
            "edit",
            &format!("device {}", device_id),
            &format!("place {} -> {}", current.place_id, next.place_id),
        )?;
        tx.commit()?;

        info!(device_id, place_id = next.place_id, "device updated");
        Ok(next)
    }

    /// Remove a device together with its problems.
    pub fn delete_device(pool: &mut DbPool, device_id: i64) -> AppResult<CascadeReport> {
        CascadeCoordinator::delete_device(pool, device_id)
    }

    pub fn get_device(pool: &DbPool, device_id: i64) -> AppResult<Device> {
        queries::get_device(&pool.conn, device_id)?
            .ok_or_else(|| AppError::not_found("Device", device_id))
    }

    pub fn list_devices(pool: &DbPool, place_id: Option<i64>) -> AppResult<Vec<Device>> {
        if let Some(id) = place_id
            && queries::get_place(&pool.conn, id)?.is_none()
        {
            return Err(AppError::not_found("Place", id));
        }
        Ok(queries::list_devices(&pool.conn, place_id)?)
    }
}
