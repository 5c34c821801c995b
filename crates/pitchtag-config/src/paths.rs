use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_image() -> PathBuf {
    PathBuf::from("field.png")
}

fn default_log() -> PathBuf {
    PathBuf::from("events.csv")
}

fn default_config() -> PathBuf {
    PathBuf::from("config.json")
}

/// File locations used by the tagger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Field image the clicks are made on
    #[serde(default = "default_image")]
    pub image: PathBuf,
    /// CSV log receiving one row per tagged action
    #[serde(default = "default_log")]
    pub log: PathBuf,
    /// Roster/action definition file
    #[serde(default = "default_config")]
    pub config: PathBuf,
}

impl PathsConfig {
    pub fn new() -> Self {
        let image = env::var("PITCHTAG_IMAGE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_image());
        let log = env::var("PITCHTAG_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_log());
        let config = env::var("PITCHTAG_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config());

        Self { image, log, config }
    }

    pub fn resolved(&self, base_dir: &Path) -> Self {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base_dir.join(p)
            }
        };

        Self {
            image: resolve(&self.image),
            log: resolve(&self.log),
            config: resolve(&self.config),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            log: default_log(),
            config: default_config(),
        }
    }
}
