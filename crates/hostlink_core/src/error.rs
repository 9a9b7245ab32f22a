//! Bridge error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the bridge itself
///
/// Host API failures are not here: they are logged where they happen
/// (see `hostlink_platform::HostError`).
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Config file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// The entry thread could not be spawned
    #[error("Failed to launch native entry: {0}")]
    EntryLaunch(#[source] std::io::Error),

    /// Entry is only ever launched once per session
    #[error("Native entry already launched")]
    AlreadyLaunched,
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
