use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const OP_TARGET_WIDTH: usize = 40;

fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let re = ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"));
    re.replace_all(s, "").into_owned()
}

/// Colour for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "rebuild" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in entries {
            let color = color_for_operation(&e.operation);
            let mut op_target = color.paint(e.operation.as_str()).to_string();
            if !e.target.is_empty() {
                op_target.push_str(&format!(" ({})", e.target));
            }

            let padding = " ".repeat(OP_TARGET_WIDTH.saturating_sub(strip_ansi(&op_target).len()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                op_target,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
