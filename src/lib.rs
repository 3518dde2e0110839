//! # Edutrail
//!
//! Client-side navigation for an education-management platform: browsing the
//! Class → Subject → Chapter → Topic → Resource hierarchy served by a REST
//! backend.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── edutrail-core/           # Error taxonomy, serde helpers
//! ├── edutrail-config/         # Environment-driven configuration
//! ├── edutrail-models/         # Entities, ids, update DTOs
//! ├── edutrail-gateway/        # Gateway trait + reqwest implementation
//! └── edutrail-observability/  # Logging setup
//! src/
//! ├── navigation/              # Store, controller, restoration, breadcrumbs
//! ├── persistence.rs           # Saving selections across reloads
//! └── cli/                     # Terminal front end
//! ```
//!
//! ## Navigation model
//!
//! The [`navigation::NavigationStore`] holds the current level and the
//! selected entity at each shallower level (persisted), plus the fetched
//! listings (in memory). The [`navigation::LevelController`] moves between
//! levels:
//!
//! - forward: fetch the children of the selection, then transition; a failed
//!   fetch changes nothing
//! - backward: clear the selection that opened the level being left
//! - breadcrumb jumps: clear every selection deeper than the target
//!
//! After a reload, [`navigation::LevelController::restore`] refetches the
//! listings the persisted level depends on.
//!
//! ## Environment Variables
//!
//! ```bash
//! API_BASE_URL=http://localhost:8000/api
//! API_TOKEN=your-access-token
//! API_TIMEOUT_SECONDS=30
//! NAV_STATE_PATH=storage/navigation.json
//! LOG_LEVEL=info
//! LOG_DIR=storage/logs
//! ```

pub mod cli;
pub mod navigation;
pub mod persistence;

// Re-export workspace crates for convenience
pub use edutrail_config;
pub use edutrail_core;
pub use edutrail_gateway;
pub use edutrail_models;
