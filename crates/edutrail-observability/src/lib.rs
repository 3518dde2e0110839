//! Logging initialisation for edutrail binaries.
//!
//! Console output is always enabled. When [`LogConfig::log_dir`] is set, a
//! JSON file layer rotating daily is added for later inspection.
//!
//! ```no_run
//! use edutrail_config::LogConfig;
//!
//! edutrail_observability::init_logging(&LogConfig::from_env()).unwrap();
//! tracing::info!("ready");
//! ```

use anyhow::Context;
use edutrail_config::LogConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the default filter directive for a level, keeping HTTP internals quiet.
pub fn default_directive(level: &str) -> String {
    format!(
        "edutrail={level},edutrail_gateway={level},edutrail_observability={level},reqwest=warn,hyper=warn,hyper_util=warn"
    )
}

pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "edutrail.json");
            Some(
                fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_current_span(true)
                    .with_filter(EnvFilter::new(default_directive("debug"))),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
