// Provisioning service - Fetch, adapt and persist each catalog dashboard
use crate::application::template_source::TemplateSource;
use crate::domain::catalog::DashboardCatalog;
use crate::domain::dashboard::DashboardDescriptor;
use crate::domain::error::ProvisionError;
use crate::infrastructure::dashboard_directory::DashboardDirectory;
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;

/// Files written by a completed run, in catalog order
#[derive(Debug, Clone, Default)]
pub struct ProvisionReport {
    pub written: Vec<PathBuf>,
}

#[derive(Clone)]
pub struct ProvisioningService {
    source: Arc<dyn TemplateSource>,
    directory: DashboardDirectory,
}

impl ProvisioningService {
    pub fn new(source: Arc<dyn TemplateSource>, directory: DashboardDirectory) -> Self {
        Self { source, directory }
    }

    /// Provision every dashboard in order, stopping at the first failure.
    ///
    /// Files written before the failure are left in place.
    pub async fn provision(&self, catalog: &DashboardCatalog) -> Result<ProvisionReport, ProvisionError> {
        let mut report = ProvisionReport {
            written: Vec::with_capacity(catalog.len()),
        };

        for descriptor in catalog.iter() {
            let path = self
                .provision_dashboard(descriptor)
                .await
                .map_err(|e| ProvisionError::Dashboard {
                    filename: descriptor.filename.clone(),
                    source: e.into(),
                })?;

            tracing::info!("Wrote dashboard '{}' to {}", descriptor.name, path.display());
            report.written.push(path);
        }

        Ok(report)
    }

    async fn provision_dashboard(&self, descriptor: &DashboardDescriptor) -> anyhow::Result<PathBuf> {
        tracing::debug!("Fetching template for {} from {}", descriptor.filename, descriptor.url);
        let body = self.source.fetch_template(&descriptor.url).await?;

        let template = std::str::from_utf8(&body)
            .with_context(|| format!("Template from {} is not valid UTF-8", descriptor.url))?;

        let rendered = descriptor.render(template);
        self.directory.write_dashboard(&descriptor.filename, &rendered).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const TEMPLATE: &str = r#"{"title":"Geth Dashboard","uid":"QC1Arp5Wk","panels":[{"datasource":"${DS_INFLUXDB}"}]}"#;

    /// In-memory template source recording the URLs it was asked for
    #[derive(Default)]
    struct StubSource {
        bodies: HashMap<String, Vec<u8>>,
        requests: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.bodies.insert(url.to_string(), body.into());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TemplateSource for StubSource {
        async fn fetch_template(&self, url: &str) -> anyhow::Result<Bytes> {
            self.requests.lock().unwrap().push(url.to_string());
            match self.bodies.get(url) {
                Some(body) => Ok(Bytes::from(body.clone())),
                None => anyhow::bail!("Template download from {} failed with status 404 Not Found", url),
            }
        }
    }

    fn catalog(entries: &[(&str, &str, &str, &str)]) -> DashboardCatalog {
        DashboardCatalog::new(
            entries
                .iter()
                .map(|(name, filename, url, replacement)| {
                    DashboardDescriptor::new(*name, *filename, *url, *replacement)
                })
                .collect(),
        )
        .unwrap()
    }

    fn service(source: Arc<StubSource>, dir: &tempfile::TempDir) -> ProvisioningService {
        let directory = DashboardDirectory::open(dir.path()).unwrap();
        ProvisioningService::new(source, directory)
    }

    #[tokio::test]
    async fn test_provisions_each_descriptor_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(StubSource::default().with("http://catalog/geth", TEMPLATE));
        let catalog = catalog(&[
            ("Geth Dashboard Ethereum", "single_geth_eth.json", "http://catalog/geth", "InfluxDB_eth"),
            ("Geth Dashboard Optimism", "single_geth_opt.json", "http://catalog/geth", "InfluxDB"),
        ]);

        let report = service(source.clone(), &dir).provision(&catalog).await.unwrap();

        assert_eq!(
            report.written,
            vec![dir.path().join("single_geth_eth.json"), dir.path().join("single_geth_opt.json")]
        );
        assert_eq!(source.requests(), vec!["http://catalog/geth", "http://catalog/geth"]);

        let eth = std::fs::read_to_string(dir.path().join("single_geth_eth.json")).unwrap();
        assert_eq!(
            eth,
            r#"{"title":"Geth Dashboard Ethereum","uid":"QC1Arp5WkInfluxDB_eth","panels":[{"datasource":"InfluxDB_eth"}]}"#
        );

        // Each output carries only its own descriptor's values
        let opt = std::fs::read_to_string(dir.path().join("single_geth_opt.json")).unwrap();
        assert_eq!(
            opt,
            r#"{"title":"Geth Dashboard Optimism","uid":"QC1Arp5WkInfluxDB","panels":[{"datasource":"InfluxDB"}]}"#
        );
        assert!(!opt.contains("InfluxDB_eth"));
        assert!(!opt.contains("Ethereum"));
    }

    #[tokio::test]
    async fn test_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("single_geth_eth.json");
        std::fs::write(&target, "stale content that is much longer than the rendered template ".repeat(20)).unwrap();

        let source = Arc::new(StubSource::default().with("http://catalog/geth", TEMPLATE));
        let catalog = catalog(&[("Geth Dashboard Ethereum", "single_geth_eth.json", "http://catalog/geth", "InfluxDB_eth")]);
        let service = service(source, &dir);

        service.provision(&catalog).await.unwrap();
        let first = std::fs::read_to_string(&target).unwrap();
        service.provision(&catalog).await.unwrap();
        let second = std::fs::read_to_string(&target).unwrap();

        assert!(!first.contains("stale content"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_aborts_on_first_failure_and_keeps_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(
            StubSource::default()
                .with("http://catalog/one", TEMPLATE)
                .with("http://catalog/three", TEMPLATE),
        );
        let catalog = catalog(&[
            ("One", "one.json", "http://catalog/one", "A"),
            ("Two", "two.json", "http://catalog/missing", "B"),
            ("Three", "three.json", "http://catalog/three", "C"),
        ]);

        let err = service(source.clone(), &dir).provision(&catalog).await.unwrap_err();

        assert!(matches!(&err, ProvisionError::Dashboard { filename, .. } if filename == "two.json"));
        assert_eq!(source.requests(), vec!["http://catalog/one", "http://catalog/missing"]);
        assert!(dir.path().join("one.json").exists());
        assert!(!dir.path().join("two.json").exists());
        assert!(!dir.path().join("three.json").exists());
    }

    #[tokio::test]
    async fn test_rejects_non_utf8_template() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(StubSource::default().with("http://catalog/bin", vec![0x7b, 0xff, 0xfe, 0x7d]));
        let catalog = catalog(&[("Binary", "bin.json", "http://catalog/bin", "X")]);

        let err = service(source, &dir).provision(&catalog).await.unwrap_err();

        let message = format!("{:#}", anyhow::Error::from(err));
        assert!(message.contains("not valid UTF-8"), "unexpected message: {}", message);
        assert!(!dir.path().join("bin.json").exists());
    }
}
