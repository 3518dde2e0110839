//! # Edutrail Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`gateway`]: Backend base URL, bearer token and request timeout
//! - [`state`]: Where the persisted navigation state lives
//! - [`logging`]: Log level and optional log directory
//!
//! # Example
//!
//! ```ignore
//! use edutrail_config::{GatewayConfig, LogConfig, StateConfig};
//!
//! let gateway = GatewayConfig::from_env();
//! let state = StateConfig::from_env();
//! let logging = LogConfig::from_env();
//! ```

pub mod gateway;
pub mod logging;
pub mod state;

pub use gateway::GatewayConfig;
pub use logging::LogConfig;
pub use state::StateConfig;
