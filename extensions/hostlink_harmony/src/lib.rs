//! Hostlink HarmonyOS Host
//!
//! Hosts a native engine inside an ArkUI page.
//!
//! # Architecture
//!
//! - **[`HarmonySession`]** receives the page lifecycle hooks and drives the
//!   lifecycle bridge
//! - **[`HarmonyCallbacks`]** is handed to the engine at init and forwards
//!   title, orientation, cursor, IME and permission requests to the host
//! - **[`HostDispatcher`]** runs host calls off the engine thread
//! - **N-API bridge** exposes all of the above over a C ABI for the glue
//!   module
//!
//! # Usage
//!
//! ```ignore
//! use hostlink_harmony::{HarmonySession, HostDispatcher, ResourceContext};
//!
//! let mut session = HarmonySession::new(engine, window_api, HostDispatcher::current()?, &config);
//! session.about_to_appear(&ResourceContext::new(cache_dir, resource_manager)?, resolution);
//! session.page_show();
//! ```
//!
//! # Building for HarmonyOS
//!
//! Requires DevEco Studio and OHOS SDK:
//!
//! ```bash
//! # Build with hvigorw
//! hvigorw assembleHap
//! ```

pub mod app;
pub mod dispatch;
pub mod input;
pub mod napi_bridge;
pub mod resources;
pub mod window;

pub use app::HarmonySession;
pub use dispatch::HostDispatcher;
pub use input::KeyAction;
pub use napi_bridge::{EngineVTable, HostApiVTable};
pub use resources::ResourceContext;
pub use window::{HarmonyCallbacks, HostWindowApi};
