pub mod app_config;
pub mod auth;
pub mod config;
pub mod search;

pub use app_config::{AppConfig, Environment};
pub use auth::{load_auth_profile, AuthBlock};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_ORIGIN};
pub use search::{PriceRange, SearchRequest, SortOrder};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read auth profile {path}: {source}")]
    AuthProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse auth profile: {0}")]
    AuthProfileParse(#[from] serde_yaml::Error),

    #[error("invalid auth profile: {0}")]
    AuthProfileInvalid(String),
}

/// Rejections raised while building a [`SearchRequest`], before any network I/O.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("page must be a positive integer, got {0}")]
    InvalidPage(i64),

    #[error("price range is inverted: {low} > {high}")]
    InvalidPriceRange { low: u64, high: u64 },

    #[error("invalid number in {field}: \"{value}\"")]
    InvalidNumber { field: &'static str, value: String },

    #[error("price filter flag is set but price_filter is missing")]
    MissingPriceFilter,

    #[error("unknown sort order \"{0}\"")]
    InvalidSortOrder(String),
}
