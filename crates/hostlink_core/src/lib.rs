//! Hostlink Core
//!
//! The lifecycle bridge between a host UI environment and an embedded
//! native engine:
//!
//! - **Lifecycle Bridge**: `Uninitialized` / `Resumed` / `Paused` state
//!   machine that starts the engine exactly once, after its resources are
//!   bound
//! - **Signal routing**: host events mapped to transitions or one-way calls
//! - **Orientation and cursor mapping**: pure translations for the host's
//!   window and pointer APIs
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hostlink_core::testing::{NullCallbacks, RecordingEngine};
//! use hostlink_core::{BridgeConfig, HostSignal, LifecycleBridge, LifecycleState};
//! use hostlink_platform::{ResourceManagerHandle, ScreenResolution};
//!
//! let engine = Arc::new(RecordingEngine::default());
//! let mut bridge = LifecycleBridge::new(engine.clone(), Arc::new(NullCallbacks), &BridgeConfig::default());
//!
//! bridge.bind_resources(
//!     "/data/storage/cache",
//!     ResourceManagerHandle::null(),
//!     ScreenResolution::fullscreen(1080, 2340, 3.0, 60.0),
//! ).unwrap();
//!
//! bridge.dispatch(HostSignal::Show).unwrap();
//! assert!(bridge.is_in(LifecycleState::Resumed));
//! bridge.launcher_mut().join();
//! assert_eq!(engine.count("entry"), 1);
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod launcher;
pub mod lifecycle;
pub mod logging;
pub mod orientation;
pub mod signals;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{BridgeConfig, EntryConfig, LifecycleConfig, LoggingConfig};
pub use cursor::{pointer_style_for_id, PointerStyle, SystemCursor};
pub use error::{BridgeError, Result};
pub use launcher::EntryLauncher;
pub use lifecycle::{LifecycleBridge, LifecycleState, PausePolicy, TransitionOutcome};
pub use logging::init_logging;
pub use orientation::{resolve_orientation, Orientation, OrientationHint};
pub use signals::{HostSignal, SignalRoute};
