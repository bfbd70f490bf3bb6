//! CLI entry point for the library client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use library_client::session::default_session_path;
use library_client::{
    ClientConfig, ClientError, FileSessionStore, LibraryApi, SessionPhase,
};
use tracing::{debug, info};

mod app_config;
mod cli;
mod commands;

use app_config::FileConfig;
use cli::{Args, Command, ConfigCommand};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let loaded = app_config::load_file_config(args.config.as_deref())?;
    let config = resolve_client_config(&args, loaded.config.as_ref())?;
    let session_path = resolve_session_path(&args, loaded.config.as_ref())?;

    if let Command::Config {
        command: ConfigCommand::Show,
    } = &args.command
    {
        commands::run_config_show_command(&loaded, &config, &session_path);
        return Ok(());
    }

    let store = Arc::new(FileSessionStore::new(session_path));
    let api = LibraryApi::new(config, store)?;

    if !args.command.is_anonymous() {
        let phase = api.auth().init_auth().await;
        if phase != SessionPhase::Authenticated {
            return Err(ClientError::NotAuthenticated.into());
        }
    }

    run_command(&api, args.command).await
}

async fn run_command(api: &LibraryApi, command: Command) -> Result<()> {
    match command {
        Command::Login {
            identifier,
            password,
        } => commands::run_login_command(api, &identifier, password).await,
        Command::Logout => {
            commands::run_logout_command(api);
            Ok(())
        }
        Command::Whoami => commands::run_whoami_command(api),
        Command::Register {
            username,
            email,
            password,
        } => commands::run_register_command(api, &username, &email, password).await,
        Command::Passwd {
            old_password,
            new_password,
        } => commands::run_passwd_command(api, old_password, new_password).await,
        Command::Books { command } => commands::run_books_command(api, &command).await,
        Command::Borrow(target) => commands::run_borrow_command(api, &target).await,
        Command::Return { borrow_id } => commands::run_return_command(api, borrow_id).await,
        Command::Renew { borrow_id } => commands::run_renew_command(api, borrow_id).await,
        Command::Loans(page) => commands::run_loans_command(api, &page).await,
        Command::History(page) => commands::run_history_command(api, &page).await,
        Command::Fees { command } => commands::run_fees_command(api, &command).await,
        Command::Favorites { command } => commands::run_favorites_command(api, &command).await,
        Command::Reservations { command } => {
            commands::run_reservations_command(api, &command).await
        }
        Command::Dashboard => commands::run_dashboard_command(api).await,
        Command::Config { .. } => {
            info!("Nothing to do");
            Ok(())
        }
    }
}

/// Defaults, then config file, then `LIBRARY_*` env, then CLI flags.
fn resolve_client_config(args: &Args, file: Option<&FileConfig>) -> Result<ClientConfig> {
    let mut config = ClientConfig::default();
    if let Some(file) = file {
        config = file.apply_to(config);
    }
    let mut config = config
        .with_env_overrides()
        .context("Invalid LIBRARY_* environment override")?;

    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(mode) = args.borrow_endpoints {
        config.borrow_endpoints = mode;
    }
    config.validate()?;
    Ok(config)
}

fn resolve_session_path(args: &Args, file: Option<&FileConfig>) -> Result<PathBuf> {
    if let Some(path) = &args.session_file {
        return Ok(path.clone());
    }
    if let Some(path) = file.and_then(|file| file.session_file.clone()) {
        return Ok(path);
    }
    default_session_path().context("Cannot determine where to store the session")
}
