//! Client configuration.

use std::env;
use std::time::Duration;

use crate::error::{KitsuError, Result};

/// Default Kitsu API base URL.
pub const DEFAULT_API_URL: &str = "https://kitsu.io/api/edge";

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("kitsuapi/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Settings used to build a [`KitsuClient`](crate::KitsuClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use kitsuapi::ClientConfig;
///
/// let config = ClientConfig {
///     timeout: Duration::from_secs(10),
///     ..Default::default()
/// };
/// assert_eq!(config.base_url, "https://kitsu.io/api/edge");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API (e.g., `https://kitsu.io/api/edge`).
    pub base_url: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Total time allowed for a single request.
    pub timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from environment variables.
    ///
    /// Reads `KITSU_API_URL`, `KITSU_TIMEOUT_SECS` and
    /// `KITSU_CONNECT_TIMEOUT_SECS`. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout variable is not a positive whole number
    /// of seconds.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("KITSU_API_URL") {
            config.base_url = url;
        }
        if let Some(timeout) = secs_from_env("KITSU_TIMEOUT_SECS")? {
            config.timeout = timeout;
        }
        if let Some(timeout) = secs_from_env("KITSU_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = timeout;
        }

        Ok(config)
    }

    /// Replace the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn secs_from_env(name: &str) -> Result<Option<Duration>> {
    match env::var(name) {
        Ok(raw) => parse_secs(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

/// Parse a timeout in whole seconds. Zero is rejected.
fn parse_secs(name: &str, raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(KitsuError::Config(format!("{name} must be greater than zero"))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(KitsuError::Config(format!(
            "{name} must be a number of seconds, got '{raw}'"
        ))),
    }
}
