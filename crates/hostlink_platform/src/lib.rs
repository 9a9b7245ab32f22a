//! Hostlink platform contracts
//!
//! Types shared by the lifecycle bridge and the host integrations:
//!
//! - [`NativeEngine`]: the embedded engine's one-way entry points
//! - [`HostCallbacks`]: what the engine may ask of the host
//! - [`HostError`]: host API failures (logged, never propagated to the engine)

pub mod callbacks;
pub mod engine;
pub mod error;

pub use callbacks::{CursorImage, HostCallbacks, WindowRect};
pub use engine::{DisplayOrientation, NativeEngine, ResourceManagerHandle, ScreenResolution};
pub use error::{HostError, Result};
