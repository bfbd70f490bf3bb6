//! Session command handlers: login, logout, whoami, register, passwd.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use library_client::{ClientError, LibraryApi};
use tracing::info;

use super::print_json;

pub async fn run_login_command(
    api: &LibraryApi,
    identifier: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_secret("Password")?,
    };
    let identity = api.auth().login(identifier, &password).await?;
    info!(username = %identity.username, "Login successful");
    print_json(&identity)
}

pub fn run_logout_command(api: &LibraryApi) {
    api.auth().logout();
}

pub fn run_whoami_command(api: &LibraryApi) -> Result<()> {
    let Some(identity) = api.session().identity() else {
        return Err(ClientError::NotAuthenticated.into());
    };
    print_json(&identity)
}

pub async fn run_register_command(
    api: &LibraryApi,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_secret("Password")?,
    };
    let response = api.auth().register(username, email, &password).await?;
    info!(username, "Account created; run `library-client login` to sign in");
    print_json(&response)
}

pub async fn run_passwd_command(
    api: &LibraryApi,
    old_password: Option<String>,
    new_password: Option<String>,
) -> Result<()> {
    let old_password = match old_password {
        Some(password) => password,
        None => read_secret("Current password")?,
    };
    let new_password = match new_password {
        Some(password) => password,
        None => read_secret("New password")?,
    };
    let response = api
        .auth()
        .change_password(&old_password, &new_password)
        .await?;
    info!("Password changed");
    print_json(&response)
}

/// Reads one line from stdin, prompting on stderr when interactive.
fn read_secret(prompt: &str) -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("{prompt}: ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))?;
    let value = line.trim_end_matches(['\r', '\n']);
    if value.is_empty() {
        bail!("No {} provided", prompt.to_lowercase());
    }
    Ok(value.to_string())
}
