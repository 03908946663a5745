use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, User};
use tracing::{info, warn};

pub struct UserDirectory;

impl UserDirectory {
    /// Register a ticket author. Login and email must both be unused.
    pub fn create_user(pool: &mut DbPool, new: &NewUser) -> AppResult<User> {
        if new.login.trim().is_empty() || new.email.trim().is_empty() {
            return Err(AppError::ValidationFailed("login and email must not be empty".into()));
        }

        let tx = pool.begin()?;
        if let Some(existing) = queries::find_user_by_login_or_email(&tx, &new.login, &new.email)? {
            warn!(existing = existing.id, login = %new.login, "login or email already in use");
            let what = if existing.login == new.login {
                "login"
            } else {
                "email"
            };
            return Err(AppError::Conflict(format!("{} already in use", what)));
        }

        let id = queries::insert_user(&tx, new)?;
        ttlog(
            &tx,
            "add",
            &format!("user {}", id),
            &format!("User '{}' admin={}", new.login, new.admin),
        )?;
        let user = queries::get_user(&tx, id)?.ok_or_else(|| AppError::not_found("User", id))?;
        tx.commit()?;

        info!(user_id = id, "user created");
        Ok(user)
    }

    pub fn get_user(pool: &DbPool, user_id: i64) -> AppResult<User> {
        queries::get_user(&pool.conn, user_id)?.ok_or_else(|| AppError::not_found("User", user_id))
    }

    pub fn list_users(pool: &DbPool) -> AppResult<Vec<User>> {
        Ok(queries::list_users(&pool.conn)?)
    }
}
