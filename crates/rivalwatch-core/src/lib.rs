//! Shared domain types and configuration for rivalwatch.

pub mod app_config;
pub mod competitors;
pub mod config;
pub mod insight;
pub mod taxonomy;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use competitors::{
    load_competitors, parse_competitors, CompetitorConfig, CompetitorsFile, TargetConfig,
};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_SCRAPER_REQUEST_TIMEOUT_SECS,
    DEFAULT_SCRAPER_USER_AGENT,
};
pub use insight::{FingerprintUpdate, NewInsight};
pub use taxonomy::{Category, TargetType, UnknownVariant};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read competitors file {path}: {source}")]
    CompetitorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse competitors file: {0}")]
    CompetitorsFileParse(#[source] serde_yaml::Error),

    #[error("invalid competitors config: {0}")]
    Validation(String),
}
