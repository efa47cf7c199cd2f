//! Shared configuration for sovscan: application settings and the brand catalog.

mod error;

pub mod app_config;
pub mod brands;
pub mod config;

pub use app_config::AppConfig;
pub use brands::{load_catalog, BrandCatalog, BrandSpec};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
