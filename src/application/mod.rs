// Application layer - Provisioning use case and its ports
pub mod provisioning_service;
pub mod template_source;
