//! Transit service configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TransitError;

/// Prefix for environment overrides, e.g. `NEXTTRIP_BASE_URL`
const ENV_PREFIX: &str = "NEXTTRIP";

/// Configuration for the next-departure lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitConfig {
    /// Name of the registered provider to query
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Base URL of the provider API; resource paths are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (unset leaves the HTTP client's default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Target the provider's sandbox environment.
    ///
    /// Accepted and handed to the provider, but no provider routes
    /// differently on it yet.
    #[serde(default)]
    pub use_sandbox: bool,
}

fn default_provider() -> String {
    crate::registry::METRO_TRANSIT.to_string()
}

fn default_base_url() -> String {
    "https://svc.metrotransit.org/nextripv2".to_string()
}

fn default_user_agent() -> String {
    format!("nexttrip/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
            use_sandbox: false,
        }
    }
}

impl TransitConfig {
    /// Load configuration from `nexttrip.toml` in the working directory (if
    /// present) and `NEXTTRIP_*` environment variables
    pub fn load() -> Result<Self, TransitError> {
        Self::layered(
            config::File::with_name("nexttrip").required(false),
            Self::environment(),
        )
    }

    /// Load configuration from an explicit file, still honoring environment
    /// overrides
    pub fn load_from(path: &Path) -> Result<Self, TransitError> {
        Self::layered(config::File::from(path), Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).try_parsing(true)
    }

    /// Defaults, then `file`, then `env`; later layers win
    fn layered<S>(file: S, env: config::Environment) -> Result<Self, TransitError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| TransitError::ConfigurationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TransitError> {
        if self.provider.trim().is_empty() {
            return Err(TransitError::ConfigurationError(
                "provider must not be empty".to_string(),
            ));
        }

        self.parsed_base_url()?;

        if self.timeout_secs == Some(0) {
            return Err(TransitError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The base URL as a [`Url`] that path segments can be appended to
    pub fn parsed_base_url(&self) -> Result<Url, TransitError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            TransitError::ConfigurationError(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        if url.cannot_be_a_base() {
            return Err(TransitError::ConfigurationError(format!(
                "base_url '{}' cannot carry a path",
                self.base_url
            )));
        }
        Ok(url)
    }
}
