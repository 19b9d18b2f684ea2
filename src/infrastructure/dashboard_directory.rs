// Destination directory for provisioned dashboards
use crate::domain::error::ProvisionError;
use anyhow::Context;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DashboardDirectory {
    root: PathBuf,
}

impl DashboardDirectory {
    /// Open the destination, checking that it exists, is a directory and is writable.
    ///
    /// Writability is probed by creating a temporary file inside the directory,
    /// which also covers ACLs and read-only mounts that mode bits do not show.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProvisionError> {
        let root = path.into();

        let metadata = match std::fs::metadata(&root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProvisionError::DestinationMissing { path: root });
            }
            Err(e) => {
                return Err(ProvisionError::DestinationInaccessible { path: root, source: e });
            }
        };

        if !metadata.is_dir() {
            return Err(ProvisionError::NotADirectory { path: root });
        }

        if let Err(e) = tempfile::Builder::new()
            .prefix(".dashboard-sync-")
            .tempfile_in(&root)
        {
            return Err(ProvisionError::NotWritable { path: root, source: e });
        }

        tracing::debug!("Dashboard path {} is writable", root.display());
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `contents` to `filename`, replacing any previous file
    pub async fn write_dashboard(&self, filename: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let target = self.root.join(filename);

        tokio::fs::write(&target, contents)
            .await
            .with_context(|| format!("Failed to write dashboard file {}", target.display()))?;

        Ok(target)
    }
}
