use std::env;
use std::path::PathBuf;

/// Logging configuration.
///
/// # Environment Variables
///
/// - `LOG_LEVEL`: Default level for edutrail targets (default: `info`)
/// - `LOG_DIR`: When set, logs are also written to a daily rolling file there
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: env::var("LOG_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}
