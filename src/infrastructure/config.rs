use crate::domain::error::ProvisionError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Grafana admin password. Only its presence is checked here.
pub const ADMIN_PASSWORD_VAR: &str = "GF_SECURITY_ADMIN_PASSWORD";

pub const SETTINGS_ENV_PREFIX: &str = "DASHBOARD_SYNC";
pub const DEFAULT_DASHBOARD_PATH: &str = "/grafana-dashboards";
pub const DEFAULT_HTTP_TIMEOUT_SECS: i64 = 30;

#[derive(Debug, Deserialize, Clone)]
pub struct ProvisionerSettings {
    pub dashboard_path: PathBuf,
    pub http_timeout_secs: u64,
}

#[derive(Clone)]
pub struct ProvisionerConfig {
    #[allow(dead_code)]
    pub admin_password: String,
    pub dashboard_path: PathBuf,
    pub http_timeout: Duration,
}

impl fmt::Debug for ProvisionerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionerConfig")
            .field("admin_password", &"<redacted>")
            .field("dashboard_path", &self.dashboard_path)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

/// Build the run configuration from a snapshot of the process environment.
///
/// The credential is checked before any other setting is read.
pub fn load_provisioner_config(env: HashMap<String, String>) -> Result<ProvisionerConfig, ProvisionError> {
    let admin_password = match env.get(ADMIN_PASSWORD_VAR) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => return Err(ProvisionError::MissingCredential { var: ADMIN_PASSWORD_VAR }),
    };

    let settings = load_settings(env)?;
    if settings.http_timeout_secs == 0 {
        return Err(ProvisionError::InvalidTimeout);
    }

    Ok(ProvisionerConfig {
        admin_password,
        dashboard_path: settings.dashboard_path,
        http_timeout: Duration::from_secs(settings.http_timeout_secs),
    })
}

fn load_settings(env: HashMap<String, String>) -> Result<ProvisionerSettings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("dashboard_path", DEFAULT_DASHBOARD_PATH)?
        .set_default("http_timeout_secs", DEFAULT_HTTP_TIMEOUT_SECS)?
        .add_source(
            config::Environment::with_prefix(SETTINGS_ENV_PREFIX)
                .try_parsing(true)
                .source(Some(env)),
        )
        .build()?;

    settings.try_deserialize()
}
