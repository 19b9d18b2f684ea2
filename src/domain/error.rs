// Error taxonomy for a provisioning run
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Exit status for configuration and environment failures.
pub const EXIT_PRECONDITION: u8 = 1;

/// Exit status for a download or write failure in the middle of a batch.
pub const EXIT_BATCH: u8 = 2;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{var} env value is missing, exiting")]
    MissingCredential { var: &'static str },

    #[error("invalid provisioner settings")]
    Settings(#[from] config::ConfigError),

    #[error("HTTP timeout must be at least one second")]
    InvalidTimeout,

    #[error("failed to build HTTP client")]
    HttpClient(#[from] reqwest::Error),

    #[error("dashboard filename `{filename}` is listed more than once")]
    DuplicateFilename { filename: String },

    #[error("dashboard filename `{filename}` is not a plain file name")]
    InvalidFilename { filename: String },

    #[error("dashboard path {} does not exist, exiting", .path.display())]
    DestinationMissing { path: PathBuf },

    #[error("dashboard path {} is not a directory, exiting", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("dashboard path {} cannot be inspected", .path.display())]
    DestinationInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dashboard path {} is not writable, exiting", .path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to provision dashboard `{filename}`")]
    Dashboard {
        filename: String,
        #[source]
        source: BoxError,
    },
}

impl ProvisionError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ProvisionError::Dashboard { .. } => EXIT_BATCH,
            _ => EXIT_PRECONDITION,
        }
    }
}
