//! CLI command handlers.

mod account;
mod catalog;
mod config;
mod dashboard;
mod loans;
mod session;

use anyhow::{Context, Result};
use serde::Serialize;

pub use account::{run_favorites_command, run_fees_command, run_reservations_command};
pub use catalog::run_books_command;
pub use config::run_config_show_command;
pub use dashboard::run_dashboard_command;
pub use loans::{
    run_borrow_command, run_history_command, run_loans_command, run_renew_command,
    run_return_command,
};
pub use session::{
    run_login_command, run_logout_command, run_passwd_command, run_register_command,
    run_whoami_command,
};

/// Writes `value` to stdout as pretty JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}
