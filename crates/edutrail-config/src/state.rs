use std::env;
use std::path::PathBuf;

pub const DEFAULT_STATE_PATH: &str = "storage/navigation.json";

/// Location of the persisted navigation selections.
///
/// - `NAV_STATE_PATH`: JSON file path (default: `storage/navigation.json`)
#[derive(Clone, Debug)]
pub struct StateConfig {
    pub state_path: PathBuf,
}

impl StateConfig {
    pub fn from_env() -> Self {
        let state_path = env::var("NAV_STATE_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH));

        Self { state_path }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
        }
    }
}
