/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Colour for a device or problem status label. An empty status (no open
/// problem) renders grey.
pub fn color_for_status(status: &str) -> &'static str {
    match status {
        "" => GREY,
        "Pending" => RED,
        "In Progress" => YELLOW,
        "Resolved" => GREEN,
        _ => RESET,
    }
}

pub fn colorize_status(status: &str) -> String {
    let shown = if status.is_empty() { "--" } else { status };
    format!("{}{}{}", color_for_status(status), shown, RESET)
}
