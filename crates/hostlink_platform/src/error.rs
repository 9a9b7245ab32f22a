//! Host error types

use thiserror::Error;

/// Failures reported by host platform APIs
///
/// None of these reach the native engine. Forwarders log them and move on;
/// the only host outcome that crosses back is a permission result, which is
/// flattened to a boolean first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host could not hand back the top-level window
    #[error("Failed to obtain the top window: {0}")]
    WindowLookup(String),

    /// The host returned a window with a negative id
    #[error("Invalid window id: {0}")]
    InvalidWindowId(i32),

    /// Setting a pointer style or custom cursor failed
    #[error("Failed to set the pointer style: {0}")]
    PointerStyle(String),

    /// The user or policy refused a runtime permission
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The host does not provide this capability
    #[error("Not supported by host: {0}")]
    Unsupported(String),

    /// Generic host failure
    #[error("Host error: {0}")]
    Other(String),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
