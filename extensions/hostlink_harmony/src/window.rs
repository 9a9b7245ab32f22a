//! HarmonyOS window and pointer forwarding
//!
//! [`HarmonyCallbacks`] is the capability set handed to the engine at init.
//! It translates each request into calls on the host window API and runs
//! them through the [`HostDispatcher`], so the engine thread never waits on
//! the host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use hostlink_core::{pointer_style_for_id, resolve_orientation, Orientation, PointerStyle};
use hostlink_platform::{
    CursorImage, HostCallbacks, HostError, NativeEngine, Result, WindowRect,
};
use tokio::task::JoinHandle;

use crate::dispatch::HostDispatcher;

/// Host platform window API (`@ohos.window`, `@ohos.multimodalInput.pointer`,
/// `@ohos.abilityAccessCtrl`)
///
/// Methods may block; they are only ever called from dispatcher tasks.
pub trait HostWindowApi: Send + Sync + 'static {
    /// Id of the top-most window of the page context
    fn last_window_id(&self) -> Result<i32>;

    fn set_title(&self, title: &str) -> Result<()>;

    fn set_layout_fullscreen(&self, fullscreen: bool) -> Result<()>;

    fn set_preferred_orientation(&self, orientation: Orientation) -> Result<()>;

    fn set_pointer_style(&self, window_id: i32, style: PointerStyle) -> Result<()>;

    fn set_custom_cursor(
        &self,
        window_id: i32,
        image: &CursorImage,
        hot_x: i32,
        hot_y: i32,
    ) -> Result<()>;

    fn show_text_input(&self, area: WindowRect) -> Result<()>;

    fn hide_text_input(&self) -> Result<()>;

    /// Prompt for a runtime permission; `Ok(true)` when granted
    fn request_permission(&self, permission: &str) -> Result<bool>;

    fn resize_window(&self, area: WindowRect) -> Result<()>;

    fn minimize_on_focus_loss(&self) -> Result<()>;
}

/// Look up the top window and reject negative ids
fn top_window(api: &dyn HostWindowApi) -> Result<i32> {
    let window_id = api.last_window_id()?;
    if window_id < 0 {
        return Err(HostError::InvalidWindowId(window_id));
    }
    Ok(window_id)
}

/// Outbound forwarders backed by the HarmonyOS host
pub struct HarmonyCallbacks {
    api: Arc<dyn HostWindowApi>,
    dispatcher: HostDispatcher,
    engine: Weak<dyn NativeEngine>,
    quit: Arc<AtomicBool>,
}

impl HarmonyCallbacks {
    pub fn new(
        api: Arc<dyn HostWindowApi>,
        dispatcher: HostDispatcher,
        engine: Weak<dyn NativeEngine>,
    ) -> Self {
        Self {
            api,
            dispatcher,
            engine,
            quit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop forwarding cursor changes; set once the page is torn down
    pub fn mark_quit(&self) {
        self.quit.store(true, Ordering::SeqCst);
    }

    pub fn is_quit(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    pub fn apply_title(&self, title: &str) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let title = title.to_string();
        self.dispatcher
            .spawn("set_title", move || api.set_title(&title))
    }

    pub fn apply_window_style(&self, fullscreen: bool) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        self.dispatcher
            .spawn("set_window_style", move || api.set_layout_fullscreen(fullscreen))
    }

    /// Resolve and request a preferred orientation
    pub fn apply_orientation(
        &self,
        width: i32,
        height: i32,
        resizable: bool,
        hint: &str,
    ) -> JoinHandle<()> {
        let orientation = resolve_orientation(width, height, resizable, hint);
        tracing::debug!(width, height, resizable, hint, ?orientation, "orientation request");
        let api = Arc::clone(&self.api);
        self.dispatcher.spawn("set_orientation", move || {
            api.set_preferred_orientation(orientation)
        })
    }

    /// Apply a system cursor. `None` once quit has been signalled.
    pub fn apply_pointer(&self, cursor_id: i32) -> Option<JoinHandle<()>> {
        if self.is_quit() {
            return None;
        }
        let style = pointer_style_for_id(cursor_id);
        let api = Arc::clone(&self.api);
        Some(self.dispatcher.spawn("set_pointer", move || {
            let window_id = top_window(api.as_ref())?;
            api.set_pointer_style(window_id, style)
        }))
    }

    /// Apply a custom cursor image. `None` once quit has been signalled.
    pub fn apply_custom_cursor(
        &self,
        image: CursorImage,
        hot_x: i32,
        hot_y: i32,
    ) -> Option<JoinHandle<()>> {
        if self.is_quit() {
            return None;
        }
        let api = Arc::clone(&self.api);
        Some(self.dispatcher.spawn("set_custom_cursor", move || {
            let window_id = top_window(api.as_ref())?;
            api.set_custom_cursor(window_id, &image, hot_x, hot_y)
        }))
    }

    pub fn apply_show_text_input(&self, area: WindowRect) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        self.dispatcher
            .spawn("show_text_input", move || api.show_text_input(area))
    }

    pub fn apply_hide_text_input(&self) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        self.dispatcher
            .spawn("hide_text_input", move || api.hide_text_input())
    }

    pub fn apply_window_resize(&self, area: WindowRect) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        self.dispatcher
            .spawn("set_window_resize", move || api.resize_window(area))
    }

    pub fn apply_minimize_on_focus_loss(&self) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        self.dispatcher
            .spawn("should_minimize_on_focus_loss", move || api.minimize_on_focus_loss())
    }

    /// Prompt for a permission and deliver the result to the engine
    pub fn apply_permission(&self, permission: &str) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let engine = self.engine.clone();
        self.dispatcher.spawn_permission(
            permission.to_string(),
            move |name| api.request_permission(name),
            move |granted| match engine.upgrade() {
                Some(engine) => engine.permission_result(granted),
                None => tracing::warn!("engine dropped before permission result"),
            },
        )
    }
}

impl HostCallbacks for HarmonyCallbacks {
    fn set_title(&self, title: &str) {
        self.apply_title(title);
    }

    fn set_window_style(&self, fullscreen: bool) {
        self.apply_window_style(fullscreen);
    }

    fn set_orientation(&self, width: i32, height: i32, resizable: bool, hint: &str) {
        self.apply_orientation(width, height, resizable, hint);
    }

    fn should_minimize_on_focus_loss(&self) {
        self.apply_minimize_on_focus_loss();
    }

    fn show_text_input(&self, area: WindowRect) {
        self.apply_show_text_input(area);
    }

    fn hide_text_input(&self) {
        self.apply_hide_text_input();
    }

    fn request_permission(&self, permission: &str) {
        self.apply_permission(permission);
    }

    fn set_pointer(&self, cursor_id: i32) {
        self.apply_pointer(cursor_id);
    }

    fn set_custom_cursor(&self, image: CursorImage, hot_x: i32, hot_y: i32) {
        self.apply_custom_cursor(image, hot_x, hot_y);
    }

    fn set_window_resize(&self, area: WindowRect) {
        self.apply_window_resize(area);
    }
}
