//! Error types
//!
//! None of these ever escape a frame step: asset and playback failures are
//! recorded or logged and the game keeps running. Only [`StartupError`] is
//! shown to the player.

use crate::assets::AssetId;

/// A single asset that never became usable
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load {asset:?} ({file}): {reason}")]
    LoadFailed {
        asset: AssetId,
        file: &'static str,
        reason: String,
    },
}

/// The game cannot leave the loading screen
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StartupError {
    #[error("asset loading timed out after {waited_ms:.0} ms; still pending: {pending:?}")]
    Timeout {
        waited_ms: f64,
        pending: Vec<AssetId>,
    },

    #[error("required asset {0:?} is unavailable")]
    CriticalAssetMissing(AssetId),
}

/// Sound playback was refused by the environment
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    #[error("sound {0:?} is not ready")]
    NotReady(AssetId),

    #[error("playback of {asset:?} rejected: {reason}")]
    Rejected { asset: AssetId, reason: String },
}

/// Key-value store failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// Invalid configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
