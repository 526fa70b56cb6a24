pub mod app_config;
pub mod config;
pub mod menu;
pub mod sources;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use menu::{Day, MenuEntry, RestaurantMenus, SourceId};
pub use sources::{
    default_sources, load_sources, load_sources_or_default, SourceConfig, SourcesFile,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[source] serde_yaml::Error),

    #[error("invalid sources configuration: {0}")]
    Validation(String),
}
