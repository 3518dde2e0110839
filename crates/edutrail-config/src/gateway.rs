use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Settings for the REST backend.
///
/// # Environment Variables
///
/// - `API_BASE_URL`: Backend root including the API prefix (default: `http://localhost:8000/api`)
/// - `API_TOKEN`: Bearer token sent with every request (default: none)
/// - `API_TIMEOUT_SECONDS`: Per-request timeout (default: `30`)
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty());
        let timeout_seconds = env::var("API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Self::new(base_url, token, timeout_seconds)
    }

    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout_seconds: u64) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Joins a path onto the base URL.
    ///
    /// ```ignore
    /// let config = GatewayConfig::new("http://host/api/", None, 30);
    /// assert_eq!(config.url("/classes/"), "http://host/api/classes/");
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None, DEFAULT_TIMEOUT_SECONDS)
    }
}
