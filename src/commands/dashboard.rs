use anyhow::Result;
use library_client::LibraryApi;
use tracing::warn;

use super::print_json;

pub async fn run_dashboard_command(api: &LibraryApi) -> Result<()> {
    let dashboard = api.load_dashboard().await;
    let failed = dashboard.failed_sections();
    if failed > 0 {
        warn!(failed, "Some dashboard sections could not be loaded");
    }
    print_json(&dashboard)
}
