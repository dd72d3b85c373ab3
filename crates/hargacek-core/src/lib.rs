mod app_config;
mod config;
pub mod products;
pub mod sites;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    format_rupiah, Product, NAME_SENTINEL, PLACEHOLDER_IMAGE_URL, SELLER_SENTINEL, URL_SENTINEL,
};
pub use sites::{builtin_sites, load_sites, parse_sites, FieldSelectors, SiteProfile, SitesFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sites file {path}: {source}")]
    SitesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sites file: {0}")]
    SitesFileParse(#[from] serde_yaml::Error),

    #[error("sites validation failed: {0}")]
    Validation(String),
}
