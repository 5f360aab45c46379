use std::net::SocketAddr;
use std::path::PathBuf;

use crate::auth::{load_auth_profile, AuthBlock};
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Scheme and host of the catalog service, without a trailing slash.
    pub upstream_origin: String,
    pub request_timeout_secs: u64,
    /// YAML file replacing the built-in web auth profile.
    pub auth_profile_path: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve the auth block: the configured profile file if set,
    /// otherwise [`AuthBlock::web`].
    ///
    /// # Errors
    ///
    /// Propagates [`load_auth_profile`] errors.
    pub fn auth_block(&self) -> Result<AuthBlock, ConfigError> {
        match &self.auth_profile_path {
            Some(path) => load_auth_profile(path),
            None => Ok(AuthBlock::web()),
        }
    }
}
