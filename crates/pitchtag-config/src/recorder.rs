use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What happens to a buffered first point when the selection changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingPointPolicy {
    /// Drop the pending point so a pair never spans two selections
    #[default]
    Discard,
    /// Keep it; the finished pair is attributed to the new selection
    Keep,
}

impl FromStr for PendingPointPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "keep" => Ok(Self::Keep),
            other => Err(format!("unknown pending point policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    pub pending_point: PendingPointPolicy,
}

impl RecorderConfig {
    pub fn new() -> Self {
        let pending_point = env::var("PITCHTAG_PENDING_POINT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self { pending_point }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            pending_point: PendingPointPolicy::default(),
        }
    }
}
