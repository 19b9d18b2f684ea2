// Main entry point - Configuration, dependency wiring and exit status
mod application;
mod domain;
mod infrastructure;

use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::provisioning_service::{ProvisionReport, ProvisioningService};
use crate::domain::catalog::DashboardCatalog;
use crate::domain::error::ProvisionError;
use crate::infrastructure::config::load_provisioner_config;
use crate::infrastructure::dashboard_directory::DashboardDirectory;
use crate::infrastructure::http_template_source::HttpTemplateSource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let result = match DashboardCatalog::builtin() {
        Ok(catalog) => run(std::env::vars().collect(), &catalog).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            tracing::info!("Provisioned {} dashboards", report.written.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = e.exit_code();
            tracing::error!("{:#}", anyhow::Error::from(e));
            ExitCode::from(code)
        }
    }
}

/// Check preconditions, then provision every catalog dashboard.
///
/// Nothing touches the network until both the credential and the
/// destination directory have been validated.
async fn run(env: HashMap<String, String>, catalog: &DashboardCatalog) -> Result<ProvisionReport, ProvisionError> {
    let config = load_provisioner_config(env)?;
    tracing::debug!("Loaded {:?}", config);

    let directory = DashboardDirectory::open(&config.dashboard_path)?;
    let source = Arc::new(HttpTemplateSource::new(config.http_timeout)?);

    tracing::info!(
        "Provisioning {} dashboards into {}",
        catalog.len(),
        directory.path().display()
    );

    ProvisioningService::new(source, directory).provision(catalog).await
}
