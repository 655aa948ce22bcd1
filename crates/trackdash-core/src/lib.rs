//! Domain read-models, repository seam and configuration for trackdash.

pub mod config;
pub mod model;
pub mod repository;

pub use config::Config;
pub use repository::{JsonFileRepository, Repository};
