// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod dashboard_directory;
pub mod http_template_source;
