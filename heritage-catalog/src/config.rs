//! Catalog client configuration loaded with Figment.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. `.heritage/heritage.toml` in the current directory, or an explicit file
//! 3. Environment variables prefixed with `HERITAGE_` (e.g. `HERITAGE_ENDPOINT`)

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Deployment endpoint of the remote catalog service.
pub const DEFAULT_ENDPOINT: &str =
    "https://ok1ab3856l.execute-api.ap-south-1.amazonaws.com/dev/temple-ar1";

/// Client-side request timeout. The service itself documents none.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "HERITAGE_";

/// Directory and file name of the project-level configuration file.
pub const CONFIG_DIR: &str = ".heritage";
pub const CONFIG_FILE: &str = "heritage.toml";

/// Settings for talking to the remote catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("heritage-catalog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CatalogConfig {
    /// Load from defaults, the project config file if present, and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::current_dir()
            .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
            .ok();
        Self::extract(path.as_deref())
    }

    /// Load with an explicit configuration file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                message: format!("configuration file not found: {}", path.display()),
            });
        }
        Self::extract(Some(path))
    }

    fn extract(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: CatalogConfig = Self::figment(path).extract()?;
        config.validate()?;
        debug!(
            endpoint = %config.endpoint,
            timeout_secs = config.timeout_secs,
            "Loaded catalog configuration"
        );
        Ok(config)
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(CatalogConfig::default()));
        if let Some(path) = path {
            trace!("Merging configuration file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Timeouts are kept in whole seconds; any fraction rounds up.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let partial = u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = timeout.as_secs().saturating_add(partial).max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject endpoints that are not absolute http(s) URLs and zero timeouts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidValue {
            key: "endpoint".to_string(),
            message: format!("'{}' is not a valid URL: {e}", self.endpoint),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "endpoint".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Path of the project-level configuration file relative to `root`.
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}
