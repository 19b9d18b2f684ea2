// Dashboard catalog - Ordered, validated set of descriptors
use super::dashboard::DashboardDescriptor;
use super::error::ProvisionError;
use std::collections::HashSet;
use std::path::{Component, Path};

const GETH_DASHBOARD_URL: &str = "https://grafana.com/api/dashboards/13877/revisions/1/download";

#[derive(Debug, Clone)]
pub struct DashboardCatalog {
    descriptors: Vec<DashboardDescriptor>,
}

impl DashboardCatalog {
    /// Build a catalog, rejecting duplicate filenames and anything that is not a plain file name
    pub fn new(descriptors: Vec<DashboardDescriptor>) -> Result<Self, ProvisionError> {
        let mut seen = HashSet::new();

        for descriptor in &descriptors {
            if !is_plain_file_name(&descriptor.filename) {
                return Err(ProvisionError::InvalidFilename {
                    filename: descriptor.filename.clone(),
                });
            }
            if !seen.insert(descriptor.filename.as_str()) {
                return Err(ProvisionError::DuplicateFilename {
                    filename: descriptor.filename.clone(),
                });
            }
        }

        Ok(Self { descriptors })
    }

    /// The dashboards shipped with the devnet Grafana image
    pub fn builtin() -> Result<Self, ProvisionError> {
        Self::new(vec![
            DashboardDescriptor::new(
                "Geth Dashboard Ethereum",
                "single_geth_eth.json",
                GETH_DASHBOARD_URL,
                "InfluxDB_eth",
            ),
            DashboardDescriptor::new(
                "Geth Dashboard Optimism",
                "single_geth_opt.json",
                GETH_DASHBOARD_URL,
                "InfluxDB",
            ),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DashboardDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }
}

fn is_plain_file_name(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == filename
    )
}
