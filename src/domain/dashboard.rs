// Dashboard domain model - Descriptors and template substitutions

/// Data-source placeholder emitted by Grafana's dashboard export.
pub const DATASOURCE_PLACEHOLDER: &str = "${DS_INFLUXDB}";

/// Generic title carried by the upstream Geth dashboard.
pub const GENERIC_TITLE: &str = "Geth Dashboard";

/// Upstream dashboard uid. Suffixed per descriptor so Grafana sees distinct dashboards.
pub const DASHBOARD_UID: &str = "QC1Arp5Wk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardDescriptor {
    pub name: String,
    pub filename: String,
    pub url: String,
    pub replacement: String,
}

impl DashboardDescriptor {
    pub fn new(
        name: impl Into<String>,
        filename: impl Into<String>,
        url: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            url: url.into(),
            replacement: replacement.into(),
        }
    }

    /// Adapt a downloaded template to this descriptor.
    ///
    /// Replacements are literal and cover every occurrence. They run in a fixed
    /// order: data source, then title, then uid.
    pub fn render(&self, template: &str) -> String {
        let uid = format!("{}{}", DASHBOARD_UID, self.replacement);

        template
            .replace(DATASOURCE_PLACEHOLDER, &self.replacement)
            .replace(GENERIC_TITLE, &self.name)
            .replace(DASHBOARD_UID, &uid)
    }
}
