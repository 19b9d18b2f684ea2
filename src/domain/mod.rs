// Domain layer - Descriptors, catalog and error taxonomy
pub mod catalog;
pub mod dashboard;
pub mod error;
