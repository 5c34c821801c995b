use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Team index out of range: {0}")]
    TeamIndex(usize),

    #[error("Slot {slot} out of range (len {len})")]
    SlotIndex { slot: usize, len: usize },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
