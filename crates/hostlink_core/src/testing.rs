//! Test doubles for the engine and host callbacks
//!
//! Used by this crate's tests and available to host integrations that
//! want to drive a bridge without a real engine.

use std::path::Path;
use std::sync::{Arc, Condvar, Mutex};

use hostlink_platform::{
    CursorImage, DisplayOrientation, HostCallbacks, NativeEngine, ResourceManagerHandle,
    ScreenResolution, WindowRect,
};

#[derive(Default)]
struct Recorded {
    calls: Vec<String>,
    entries: Vec<(String, String, Option<String>)>,
    focus: Vec<bool>,
    keys: Vec<i32>,
    key_ups: Vec<i32>,
    text_inputs: Vec<(usize, String)>,
    permission_results: Vec<bool>,
    orientations: Vec<DisplayOrientation>,
    resolutions: Vec<ScreenResolution>,
}

/// Engine that records every call it receives
///
/// `entry` returns immediately unless the engine was built with
/// [`RecordingEngine::gated`], in which case it blocks until
/// [`RecordingEngine::release_entry`] is called.
#[derive(Default)]
pub struct RecordingEngine {
    recorded: Mutex<Recorded>,
    gate: Option<(Mutex<bool>, Condvar)>,
}

impl RecordingEngine {
    /// Engine whose entry blocks like a real run loop
    pub fn gated() -> Self {
        Self {
            recorded: Mutex::default(),
            gate: Some((Mutex::new(false), Condvar::new())),
        }
    }

    /// Let a gated entry return
    pub fn release_entry(&self) {
        if let Some((open, cvar)) = &self.gate {
            *open.lock().unwrap() = true;
            cvar.notify_all();
        }
    }

    /// Call names in order
    pub fn calls(&self) -> Vec<String> {
        self.recorded.lock().unwrap().calls.clone()
    }

    /// Number of times `name` was called
    pub fn count(&self, name: &str) -> usize {
        self.recorded
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    /// `(module, symbol, thread name)` of each entry call
    pub fn entries(&self) -> Vec<(String, String, Option<String>)> {
        self.recorded.lock().unwrap().entries.clone()
    }

    pub fn focus_changes(&self) -> Vec<bool> {
        self.recorded.lock().unwrap().focus.clone()
    }

    pub fn keys(&self) -> Vec<i32> {
        self.recorded.lock().unwrap().keys.clone()
    }

    pub fn key_ups(&self) -> Vec<i32> {
        self.recorded.lock().unwrap().key_ups.clone()
    }

    pub fn text_inputs(&self) -> Vec<(usize, String)> {
        self.recorded.lock().unwrap().text_inputs.clone()
    }

    pub fn permission_results(&self) -> Vec<bool> {
        self.recorded.lock().unwrap().permission_results.clone()
    }

    pub fn orientations(&self) -> Vec<DisplayOrientation> {
        self.recorded.lock().unwrap().orientations.clone()
    }

    pub fn resolutions(&self) -> Vec<ScreenResolution> {
        self.recorded.lock().unwrap().resolutions.clone()
    }

    fn record(&self, name: &str) -> std::sync::MutexGuard<'_, Recorded> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.calls.push(name.to_string());
        recorded
    }
}

impl NativeEngine for RecordingEngine {
    fn init(&self, _callbacks: Arc<dyn HostCallbacks>) {
        self.record("init");
    }

    fn entry(&self, module_id: &str, symbol: &str) {
        let thread_name = std::thread::current().name().map(str::to_string);
        self.record("entry")
            .entries
            .push((module_id.to_string(), symbol.to_string(), thread_name));

        if let Some((open, cvar)) = &self.gate {
            let mut released = open.lock().unwrap();
            while !*released {
                released = cvar.wait(released).unwrap();
            }
        }
    }

    fn resume(&self) {
        self.record("resume");
    }

    fn pause(&self) {
        self.record("pause");
    }

    fn focus_changed(&self, focused: bool) {
        self.record("focus_changed").focus.push(focused);
    }

    fn send_quit(&self) {
        self.record("send_quit");
    }

    fn key_down(&self, code: i32) {
        self.record("key_down").keys.push(code);
    }

    fn key_up(&self, code: i32) {
        self.record("key_up").key_ups.push(code);
    }

    fn keyboard_focus_lost(&self) {
        self.record("keyboard_focus_lost");
    }

    fn surface_resized(&self) {
        self.record("surface_resized");
    }

    fn text_input(&self, count: usize, text: &str) {
        self.record("text_input")
            .text_inputs
            .push((count, text.to_string()));
    }

    fn permission_result(&self, granted: bool) {
        self.record("permission_result")
            .permission_results
            .push(granted);
    }

    fn orientation_changed(&self, orientation: DisplayOrientation) {
        self.record("orientation_changed")
            .orientations
            .push(orientation);
    }

    fn set_resource_manager(&self, _cache_dir: &Path, _handle: ResourceManagerHandle) {
        self.record("set_resource_manager");
    }

    fn set_screen_resolution(&self, resolution: ScreenResolution) {
        self.record("set_screen_resolution")
            .resolutions
            .push(resolution);
    }
}

/// Callbacks that ignore every request
pub struct NullCallbacks;

impl HostCallbacks for NullCallbacks {
    fn set_title(&self, _title: &str) {}

    fn set_window_style(&self, _fullscreen: bool) {}

    fn set_orientation(&self, _width: i32, _height: i32, _resizable: bool, _hint: &str) {}

    fn should_minimize_on_focus_loss(&self) {}

    fn show_text_input(&self, _area: WindowRect) {}

    fn hide_text_input(&self) {}

    fn request_permission(&self, _permission: &str) {}

    fn set_pointer(&self, _cursor_id: i32) {}

    fn set_custom_cursor(&self, _image: CursorImage, _hot_x: i32, _hot_y: i32) {}

    fn set_window_resize(&self, _area: WindowRect) {}
}
