//! Native engine contract
//!
//! The embedded multimedia engine is an external collaborator. The bridge
//! reaches it only through [`NativeEngine`], a set of one-way calls whose
//! return values are never consumed.

use std::ffi::c_void;
use std::path::Path;
use std::sync::Arc;

use crate::callbacks::HostCallbacks;

/// Opaque resource manager handle (NativeResourceManager* on OHOS)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceManagerHandle(*mut c_void);

impl ResourceManagerHandle {
    /// Wrap a raw handle obtained from the host
    pub fn from_raw(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    /// A handle that points at nothing
    pub fn null() -> Self {
        Self(std::ptr::null_mut())
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

// SAFETY: the handle is never dereferenced on the Rust side; it is only
// passed through to the engine, which owns its thread-safety rules.
unsafe impl Send for ResourceManagerHandle {}
unsafe impl Sync for ResourceManagerHandle {}

/// Screen geometry reported to the engine before entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenResolution {
    /// Physical display width in pixels
    pub device_width: u32,
    /// Physical display height in pixels
    pub device_height: u32,
    /// Rendering surface width in pixels
    pub surface_width: u32,
    /// Rendering surface height in pixels
    pub surface_height: u32,
    /// Display density (scale factor)
    pub density: f32,
    /// Display refresh rate in Hz
    pub refresh_rate: f32,
}

impl ScreenResolution {
    /// Resolution where the surface covers the whole device
    pub fn fullscreen(width: u32, height: u32, density: f32, refresh_rate: f32) -> Self {
        Self {
            device_width: width,
            device_height: height,
            surface_width: width,
            surface_height: height,
            density,
            refresh_rate,
        }
    }
}

/// Current physical display orientation as reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DisplayOrientation {
    #[default]
    Unknown,
    Landscape,
    LandscapeFlipped,
    Portrait,
    PortraitFlipped,
}

impl DisplayOrientation {
    /// Convert a host display rotation (0..=3, quarter turns clockwise
    /// from the natural portrait position)
    pub fn from_rotation(rotation: i32) -> Self {
        match rotation {
            0 => Self::Portrait,
            1 => Self::Landscape,
            2 => Self::PortraitFlipped,
            3 => Self::LandscapeFlipped,
            _ => Self::Unknown,
        }
    }
}

/// The embedded engine as seen from the bridge
///
/// Every call except [`NativeEngine::entry`] is a one-way notification.
/// `entry` blocks for the whole session running the engine's own loop, so
/// it must only ever be called from a dedicated thread.
pub trait NativeEngine: Send + Sync + 'static {
    /// Register the outbound capability set. Called before entry.
    fn init(&self, callbacks: Arc<dyn HostCallbacks>);

    /// Run the engine. Blocks until the engine exits.
    fn entry(&self, module_id: &str, symbol: &str);

    fn resume(&self);

    fn pause(&self);

    fn focus_changed(&self, focused: bool);

    /// Advisory quit; the engine owns its own shutdown ordering
    fn send_quit(&self);

    fn key_down(&self, code: i32);

    fn key_up(&self, code: i32);

    /// The soft keyboard lost focus; stop text input
    fn keyboard_focus_lost(&self);

    /// The rendering surface changed size; the engine re-reads it
    fn surface_resized(&self);

    /// `count` is the number of characters in `text`
    fn text_input(&self, count: usize, text: &str);

    fn permission_result(&self, granted: bool);

    fn orientation_changed(&self, orientation: DisplayOrientation);

    fn set_resource_manager(&self, cache_dir: &Path, handle: ResourceManagerHandle);

    fn set_screen_resolution(&self, resolution: ScreenResolution);
}
