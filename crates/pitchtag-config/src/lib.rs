use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::paths::PathsConfig;
use self::recorder::RecorderConfig;

pub mod editor;
pub mod error;
pub mod logging;
pub mod paths;
pub mod recorder;
pub mod roster;

pub use editor::ConfigEditor;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use recorder::PendingPointPolicy;
pub use roster::{Roster, Team};

/// Runtime settings, resolved from the environment with defaults.
///
/// The roster itself lives in a separate JSON file (see [`Roster`]); this
/// only says where to find things and how the recorder behaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub paths: PathsConfig,
    pub recorder: RecorderConfig,
    pub logging: LoggingConfig,
    /// Capacity of the front end -> app channel
    pub event_capacity: usize,
}

impl Settings {
    pub fn new() -> Self {
        let event_capacity = env::var("PITCHTAG_EVENT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        Settings {
            paths: PathsConfig::new(),
            recorder: RecorderConfig::new(),
            logging: LoggingConfig::new(),
            event_capacity,
        }
    }

    /// Resolve every relative path against `base_dir`
    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        self.paths = self.paths.resolved(base_dir);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
