use crate::cli::commands::{open_pool, print_json};
use crate::cli::parser::UserAction;
use crate::config::Config;
use crate::core::UserDirectory;
use crate::errors::AppResult;
use crate::models::user::{NewUser, User};
use crate::ui::messages::success;
use crate::utils::table::Table;

fn print_users(users: &[User]) {
    let mut table = Table::new(&["ID", "LOGIN", "EMAIL", "ADMIN"]);
    for u in users {
        table.add_row(vec![
            u.id.to_string(),
            u.login.clone(),
            u.email.clone(),
            if u.admin { "yes" } else { "no" }.to_string(),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(action: &UserAction, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg, action.is_read_only())?;

    match action {
        UserAction::Add {
            login,
            email,
            password_hash,
            admin,
        } => {
            let user = UserDirectory::create_user(
                &mut pool,
                &NewUser {
                    login: login.clone(),
                    email: email.clone(),
                    password_hash: password_hash.clone(),
                    admin: *admin,
                },
            )?;
            success(format!("User '{}' created (id {}).", user.login, user.id));
        }
        UserAction::List => {
            let users = UserDirectory::list_users(&pool)?;
            if json {
                print_json(&users)?;
            } else if users.is_empty() {
                println!("No users.");
            } else {
                print_users(&users);
            }
        }
        UserAction::Show { id } => {
            let user = UserDirectory::get_user(&pool, *id)?;
            if json {
                print_json(&user)?;
            } else {
                print_users(std::slice::from_ref(&user));
            }
        }
    }

    Ok(())
}
