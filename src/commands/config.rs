//! Config command handlers: show effective configuration.

use std::path::Path;

use library_client::ClientConfig;

use crate::app_config::LoadedConfig;

pub fn run_config_show_command(loaded: &LoadedConfig, effective: &ClientConfig, session: &Path) {
    let resolved_path = loaded.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded.loaded_from_file() {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("base_url = {}", effective.base_url);
    println!("connect_timeout_secs = {}", effective.connect_timeout_secs);
    println!("read_timeout_secs = {}", effective.read_timeout_secs);
    println!("borrow_endpoints = {}", effective.borrow_endpoints);
    println!("session_file = {}", session.display());
}
