//! N-API bridge for HarmonyOS
//!
//! C ABI used by the N-API glue module. The glue registers two function
//! tables, one for the native engine and one for the host window API,
//! and then forwards ArkUI lifecycle hooks to the exported
//! `hostlink_session_*` functions with the session pointer it was given.
//!
//! # ArkTS Usage
//!
//! ```typescript
//! import hostlink from 'libhostlink_harmony.so'
//!
//! @Entry
//! @Component
//! struct EnginePage {
//!   aboutToAppear() {
//!     hostlink.aboutToAppear(getContext(this).cacheDir, getContext(this).resourceManager)
//!   }
//!   onPageShow() { hostlink.onPageShow() }
//!   onPageHide() { hostlink.onPageHide() }
//!   aboutToDisappear() { hostlink.aboutToDisappear() }
//! }
//! ```
//!
//! The engine receives a [`CallbacksHandle`] in its `init` entry and calls
//! the exported `hostlink_callbacks_*` functions with it.

use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::path::Path;
use std::sync::Arc;

use hostlink_core::{init_logging, BridgeConfig, Orientation, PointerStyle};
use hostlink_platform::{
    CursorImage, DisplayOrientation, HostCallbacks, HostError, NativeEngine,
    ResourceManagerHandle, Result, ScreenResolution, WindowRect,
};

use crate::app::HarmonySession;
use crate::dispatch::HostDispatcher;
use crate::resources::ResourceContext;
use crate::window::HostWindowApi;

/// Engine entry points registered by the glue module
///
/// Every entry is optional; missing ones are skipped.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EngineVTable {
    pub user_data: *mut c_void,
    pub init: Option<unsafe extern "C" fn(*mut c_void, *const CallbacksHandle)>,
    pub entry: Option<unsafe extern "C" fn(*mut c_void, *const c_char, *const c_char)>,
    pub resume: Option<unsafe extern "C" fn(*mut c_void)>,
    pub pause: Option<unsafe extern "C" fn(*mut c_void)>,
    pub focus_changed: Option<unsafe extern "C" fn(*mut c_void, c_int)>,
    pub send_quit: Option<unsafe extern "C" fn(*mut c_void)>,
    pub key_down: Option<unsafe extern "C" fn(*mut c_void, c_int)>,
    pub key_up: Option<unsafe extern "C" fn(*mut c_void, c_int)>,
    pub keyboard_focus_lost: Option<unsafe extern "C" fn(*mut c_void)>,
    pub surface_resized: Option<unsafe extern "C" fn(*mut c_void)>,
    pub text_input: Option<unsafe extern "C" fn(*mut c_void, c_int, *const c_char)>,
    pub permission_result: Option<unsafe extern "C" fn(*mut c_void, c_int)>,
    pub orientation_changed: Option<unsafe extern "C" fn(*mut c_void, c_int)>,
    pub set_resource_manager: Option<unsafe extern "C" fn(*mut c_void, *const c_char, *mut c_void)>,
    pub set_screen_resolution:
        Option<unsafe extern "C" fn(*mut c_void, c_int, c_int, c_int, c_int, f32, f32)>,
}

/// Host window API registered by the glue module
///
/// Status-returning entries use 0 for success and a negative value for
/// failure. `last_window_id` returns the id (negative on failure);
/// `request_permission` returns 1 granted, 0 denied, negative on failure.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostApiVTable {
    pub user_data: *mut c_void,
    pub last_window_id: Option<unsafe extern "C" fn(*mut c_void) -> c_int>,
    pub set_title: Option<unsafe extern "C" fn(*mut c_void, *const c_char) -> c_int>,
    pub set_layout_fullscreen: Option<unsafe extern "C" fn(*mut c_void, c_int) -> c_int>,
    pub set_preferred_orientation: Option<unsafe extern "C" fn(*mut c_void, c_int) -> c_int>,
    pub set_pointer_style: Option<unsafe extern "C" fn(*mut c_void, c_int, c_int) -> c_int>,
    pub set_custom_cursor: Option<
        unsafe extern "C" fn(*mut c_void, c_int, *const u8, c_int, c_int, c_int, c_int, c_int) -> c_int,
    >,
    pub show_text_input: Option<unsafe extern "C" fn(*mut c_void, c_int, c_int, c_int, c_int) -> c_int>,
    pub hide_text_input: Option<unsafe extern "C" fn(*mut c_void) -> c_int>,
    pub request_permission: Option<unsafe extern "C" fn(*mut c_void, *const c_char) -> c_int>,
    pub resize_window: Option<unsafe extern "C" fn(*mut c_void, c_int, c_int, c_int, c_int) -> c_int>,
    pub minimize_on_focus_loss: Option<unsafe extern "C" fn(*mut c_void) -> c_int>,
}

/// Callback set as seen by the engine
pub struct CallbacksHandle(Arc<dyn HostCallbacks>);

/// [`NativeEngine`] over an [`EngineVTable`]
pub struct FfiEngine {
    vtable: EngineVTable,
}

// SAFETY: the glue module guarantees its engine entry points may be called
// from any thread; `user_data` is never dereferenced on the Rust side.
unsafe impl Send for FfiEngine {}
unsafe impl Sync for FfiEngine {}

fn to_cstring(value: &str) -> CString {
    CString::new(value.replace('\0', "")).unwrap_or_default()
}

impl FfiEngine {
    pub fn new(vtable: EngineVTable) -> Self {
        Self { vtable }
    }
}

impl NativeEngine for FfiEngine {
    fn init(&self, callbacks: Arc<dyn HostCallbacks>) {
        if let Some(init) = self.vtable.init {
            // Lives for the rest of the process: the engine may call back
            // at any time.
            let handle = Box::into_raw(Box::new(CallbacksHandle(callbacks)));
            unsafe { init(self.vtable.user_data, handle) };
        }
    }

    fn entry(&self, module_id: &str, symbol: &str) {
        if let Some(entry) = self.vtable.entry {
            let module_id = to_cstring(module_id);
            let symbol = to_cstring(symbol);
            unsafe { entry(self.vtable.user_data, module_id.as_ptr(), symbol.as_ptr()) };
        }
    }

    fn resume(&self) {
        if let Some(resume) = self.vtable.resume {
            unsafe { resume(self.vtable.user_data) };
        }
    }

    fn pause(&self) {
        if let Some(pause) = self.vtable.pause {
            unsafe { pause(self.vtable.user_data) };
        }
    }

    fn focus_changed(&self, focused: bool) {
        if let Some(focus_changed) = self.vtable.focus_changed {
            unsafe { focus_changed(self.vtable.user_data, focused as c_int) };
        }
    }

    fn send_quit(&self) {
        if let Some(send_quit) = self.vtable.send_quit {
            unsafe { send_quit(self.vtable.user_data) };
        }
    }

    fn key_down(&self, code: i32) {
        if let Some(key_down) = self.vtable.key_down {
            unsafe { key_down(self.vtable.user_data, code) };
        }
    }

    fn key_up(&self, code: i32) {
        if let Some(key_up) = self.vtable.key_up {
            unsafe { key_up(self.vtable.user_data, code) };
        }
    }

    fn keyboard_focus_lost(&self) {
        if let Some(keyboard_focus_lost) = self.vtable.keyboard_focus_lost {
            unsafe { keyboard_focus_lost(self.vtable.user_data) };
        }
    }

    fn surface_resized(&self) {
        if let Some(surface_resized) = self.vtable.surface_resized {
            unsafe { surface_resized(self.vtable.user_data) };
        }
    }

    fn text_input(&self, count: usize, text: &str) {
        if let Some(text_input) = self.vtable.text_input {
            let text = to_cstring(text);
            let count = c_int::try_from(count).unwrap_or(c_int::MAX);
            unsafe { text_input(self.vtable.user_data, count, text.as_ptr()) };
        }
    }

    fn permission_result(&self, granted: bool) {
        if let Some(permission_result) = self.vtable.permission_result {
            unsafe { permission_result(self.vtable.user_data, granted as c_int) };
        }
    }

    fn orientation_changed(&self, orientation: DisplayOrientation) {
        if let Some(orientation_changed) = self.vtable.orientation_changed {
            let raw = match orientation {
                DisplayOrientation::Unknown => 0,
                DisplayOrientation::Landscape => 1,
                DisplayOrientation::LandscapeFlipped => 2,
                DisplayOrientation::Portrait => 3,
                DisplayOrientation::PortraitFlipped => 4,
            };
            unsafe { orientation_changed(self.vtable.user_data, raw) };
        }
    }

    fn set_resource_manager(&self, cache_dir: &Path, handle: ResourceManagerHandle) {
        if let Some(set_resource_manager) = self.vtable.set_resource_manager {
            let cache_dir = to_cstring(&cache_dir.to_string_lossy());
            unsafe {
                set_resource_manager(self.vtable.user_data, cache_dir.as_ptr(), handle.as_ptr())
            };
        }
    }

    fn set_screen_resolution(&self, r: ScreenResolution) {
        if let Some(set_screen_resolution) = self.vtable.set_screen_resolution {
            let dim = |v: u32| c_int::try_from(v).unwrap_or(c_int::MAX);
            unsafe {
                set_screen_resolution(
                    self.vtable.user_data,
                    dim(r.device_width),
                    dim(r.device_height),
                    dim(r.surface_width),
                    dim(r.surface_height),
                    r.density,
                    r.refresh_rate,
                )
            };
        }
    }
}

/// [`HostWindowApi`] over a [`HostApiVTable`]
pub struct FfiHostApi {
    vtable: HostApiVTable,
}

// SAFETY: the glue module posts each call to the ArkTS thread itself, so
// its entries may be called from dispatcher worker threads.
unsafe impl Send for FfiHostApi {}
unsafe impl Sync for FfiHostApi {}

fn status(op: &str, code: c_int) -> Result<()> {
    if code < 0 {
        Err(HostError::Other(format!("{} returned {}", op, code)))
    } else {
        Ok(())
    }
}

fn missing(op: &str) -> HostError {
    HostError::Unsupported(op.to_string())
}

impl FfiHostApi {
    pub fn new(vtable: HostApiVTable) -> Self {
        Self { vtable }
    }
}

impl HostWindowApi for FfiHostApi {
    fn last_window_id(&self) -> Result<i32> {
        let f = self.vtable.last_window_id.ok_or_else(|| missing("last_window_id"))?;
        let id = unsafe { f(self.vtable.user_data) };
        if id < 0 {
            return Err(HostError::WindowLookup(format!("host returned {}", id)));
        }
        Ok(id)
    }

    fn set_title(&self, title: &str) -> Result<()> {
        let f = self.vtable.set_title.ok_or_else(|| missing("set_title"))?;
        let title = to_cstring(title);
        status("set_title", unsafe { f(self.vtable.user_data, title.as_ptr()) })
    }

    fn set_layout_fullscreen(&self, fullscreen: bool) -> Result<()> {
        let f = self
            .vtable
            .set_layout_fullscreen
            .ok_or_else(|| missing("set_layout_fullscreen"))?;
        status("set_layout_fullscreen", unsafe {
            f(self.vtable.user_data, fullscreen as c_int)
        })
    }

    fn set_preferred_orientation(&self, orientation: Orientation) -> Result<()> {
        let f = self
            .vtable
            .set_preferred_orientation
            .ok_or_else(|| missing("set_preferred_orientation"))?;
        status("set_preferred_orientation", unsafe {
            f(self.vtable.user_data, orientation.as_raw())
        })
    }

    fn set_pointer_style(&self, window_id: i32, style: PointerStyle) -> Result<()> {
        let f = self
            .vtable
            .set_pointer_style
            .ok_or_else(|| missing("set_pointer_style"))?;
        let code = unsafe { f(self.vtable.user_data, window_id, style.as_raw()) };
        if code < 0 {
            return Err(HostError::PointerStyle(format!("host returned {}", code)));
        }
        Ok(())
    }

    fn set_custom_cursor(
        &self,
        window_id: i32,
        image: &CursorImage,
        hot_x: i32,
        hot_y: i32,
    ) -> Result<()> {
        let f = self
            .vtable
            .set_custom_cursor
            .ok_or_else(|| missing("set_custom_cursor"))?;
        let code = unsafe {
            f(
                self.vtable.user_data,
                window_id,
                image.pixels().as_ptr(),
                image.width() as c_int,
                image.height() as c_int,
                image.bytes_per_pixel() as c_int,
                hot_x,
                hot_y,
            )
        };
        if code < 0 {
            return Err(HostError::PointerStyle(format!(
                "custom cursor rejected with {}",
                code
            )));
        }
        Ok(())
    }

    fn show_text_input(&self, area: WindowRect) -> Result<()> {
        let f = self
            .vtable
            .show_text_input
            .ok_or_else(|| missing("show_text_input"))?;
        status("show_text_input", unsafe {
            f(self.vtable.user_data, area.x, area.y, area.width, area.height)
        })
    }

    fn hide_text_input(&self) -> Result<()> {
        let f = self
            .vtable
            .hide_text_input
            .ok_or_else(|| missing("hide_text_input"))?;
        status("hide_text_input", unsafe { f(self.vtable.user_data) })
    }

    fn request_permission(&self, permission: &str) -> Result<bool> {
        let f = self
            .vtable
            .request_permission
            .ok_or_else(|| missing("request_permission"))?;
        let name = to_cstring(permission);
        match unsafe { f(self.vtable.user_data, name.as_ptr()) } {
            1 => Ok(true),
            0 => Ok(false),
            code => Err(HostError::Other(format!(
                "request_permission returned {}",
                code
            ))),
        }
    }

    fn resize_window(&self, area: WindowRect) -> Result<()> {
        let f = self
            .vtable
            .resize_window
            .ok_or_else(|| missing("resize_window"))?;
        status("resize_window", unsafe {
            f(self.vtable.user_data, area.x, area.y, area.width, area.height)
        })
    }

    fn minimize_on_focus_loss(&self) -> Result<()> {
        let f = self
            .vtable
            .minimize_on_focus_loss
            .ok_or_else(|| missing("minimize_on_focus_loss"))?;
        status("minimize_on_focus_loss", unsafe { f(self.vtable.user_data) })
    }
}

/// Session owned by the glue module through a raw pointer
pub struct FfiSession {
    session: HarmonySession,
    runtime: tokio::runtime::Runtime,
}

impl FfiSession {
    pub fn session(&self) -> &HarmonySession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut HarmonySession {
        &mut self.session
    }
}

unsafe fn opt_str<'a>(ptr: *const c_char) -> Option<std::borrow::Cow<'a, str>> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy())
    }
}

unsafe fn session_mut<'a>(session: *mut FfiSession) -> Option<&'a mut HarmonySession> {
    session.as_mut().map(FfiSession::session_mut)
}

/// Create a session
///
/// `config_toml` may be null for defaults. Returns null if the config does
/// not parse or the host runtime cannot be started.
///
/// # Safety
///
/// `config_toml` must be null or a valid NUL-terminated string. The vtable
/// entries must be safe to call from any thread for the life of the session.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_new(
    engine: EngineVTable,
    host: HostApiVTable,
    config_toml: *const c_char,
) -> *mut FfiSession {
    let config = match opt_str(config_toml) {
        Some(text) => match BridgeConfig::from_toml_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "invalid hostlink config");
                return std::ptr::null_mut();
            }
        },
        None => BridgeConfig::default(),
    };

    init_logging(&config.logging.filter);
    tracing::info!("hostlink_harmony: session created");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("hostlink-host")
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "failed to start host runtime");
            return std::ptr::null_mut();
        }
    };

    let engine: Arc<dyn NativeEngine> = Arc::new(FfiEngine::new(engine));
    let api: Arc<dyn HostWindowApi> = Arc::new(FfiHostApi::new(host));
    let dispatcher = HostDispatcher::new(runtime.handle().clone());
    let session = HarmonySession::new(engine, api, dispatcher, &config);

    Box::into_raw(Box::new(FfiSession {
        session,
        runtime,
    }))
}

/// Release a session. The entry thread, if running, is left detached.
///
/// # Safety
///
/// `session` must come from [`hostlink_session_new`] and not be used again.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_free(session: *mut FfiSession) {
    if !session.is_null() {
        let FfiSession {
            mut session,
            runtime,
        } = *Box::from_raw(session);
        session.bridge_mut().launcher_mut().detach();
        drop(session);
        // Pending host calls are abandoned rather than awaited.
        runtime.shutdown_background();
    }
}

/// # Safety
///
/// `session` must be null or live; `cache_dir` a valid NUL-terminated string.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn hostlink_session_about_to_appear(
    session: *mut FfiSession,
    cache_dir: *const c_char,
    resource_manager: *mut c_void,
    device_width: c_int,
    device_height: c_int,
    surface_width: c_int,
    surface_height: c_int,
    density: f32,
    refresh_rate: f32,
) {
    let Some(session) = session_mut(session) else {
        return;
    };
    let cache_dir = opt_str(cache_dir).unwrap_or_default().into_owned();
    let resources = match ResourceContext::new(cache_dir, resource_manager) {
        Ok(resources) => resources,
        Err(e) => {
            tracing::error!(error = %e, "aboutToAppear without resources");
            return;
        }
    };
    let dim = |v: c_int| u32::try_from(v).unwrap_or(0);
    session.about_to_appear(
        &resources,
        ScreenResolution {
            device_width: dim(device_width),
            device_height: dim(device_height),
            surface_width: dim(surface_width),
            surface_height: dim(surface_height),
            density,
            refresh_rate,
        },
    );
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_window_stage_created(
    session: *mut FfiSession,
    fullscreen: c_int,
) {
    if let Some(session) = session_mut(session) {
        session.window_stage_created(fullscreen != 0);
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_page_show(session: *mut FfiSession) {
    if let Some(session) = session_mut(session) {
        session.page_show();
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_page_hide(session: *mut FfiSession) {
    if let Some(session) = session_mut(session) {
        session.page_hide();
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_about_to_disappear(session: *mut FfiSession) {
    if let Some(session) = session_mut(session) {
        session.about_to_disappear();
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_key_event(
    session: *mut FfiSession,
    action: c_int,
    code: c_int,
) {
    if let Some(session) = session_mut(session) {
        session.key_event(action, code);
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_key_down(session: *mut FfiSession, code: c_int) {
    if let Some(session) = session_mut(session) {
        session.key_down(code);
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_key_up(session: *mut FfiSession, code: c_int) {
    if let Some(session) = session_mut(session) {
        session.key_up(code);
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_keyboard_focus_lost(session: *mut FfiSession) {
    if let Some(session) = session_mut(session) {
        session.keyboard_focus_lost();
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_surface_resized(session: *mut FfiSession) {
    if let Some(session) = session_mut(session) {
        session.surface_resized();
    }
}

/// # Safety
///
/// `session` must be null or live; `text` null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_text_input(
    session: *mut FfiSession,
    count: c_int,
    text: *const c_char,
) {
    let (Some(session), Some(text)) = (session_mut(session), opt_str(text)) else {
        return;
    };
    session.text_input(usize::try_from(count).unwrap_or(0), &text);
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_display_rotation(
    session: *mut FfiSession,
    rotation: c_int,
) {
    if let Some(session) = session_mut(session) {
        session.display_rotation_changed(rotation);
    }
}

/// # Safety
///
/// `session` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn hostlink_session_permission_result(
    session: *mut FfiSession,
    granted: c_int,
) {
    if let Some(session) = session_mut(session) {
        session.permission_result(granted != 0);
    }
}

unsafe fn callbacks<'a>(handle: *const CallbacksHandle) -> Option<&'a dyn HostCallbacks> {
    handle.as_ref().map(|h| h.0.as_ref())
}

/// # Safety
///
/// `handle` must come from the engine's `init`; `title` a valid string.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_set_title(
    handle: *const CallbacksHandle,
    title: *const c_char,
) {
    if let (Some(cb), Some(title)) = (callbacks(handle), opt_str(title)) {
        cb.set_title(&title);
    }
}

/// # Safety
///
/// `handle` must come from the engine's `init`.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_set_window_style(
    handle: *const CallbacksHandle,
    fullscreen: c_int,
) {
    if let Some(cb) = callbacks(handle) {
        cb.set_window_style(fullscreen != 0);
    }
}

/// # Safety
///
/// `handle` must come from the engine's `init`; `hint` null or a valid string.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_set_orientation(
    handle: *const CallbacksHandle,
    width: c_int,
    height: c_int,
    resizable: c_int,
    hint: *const c_char,
) {
    if let Some(cb) = callbacks(handle) {
        let hint = opt_str(hint).unwrap_or_default();
        cb.set_orientation(width, height, resizable != 0, &hint);
    }
}

/// # Safety
///
/// `handle` must come from the engine's `init`.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_should_minimize_on_focus_loss(
    handle: *const CallbacksHandle,
) {
    if let Some(cb) = callbacks(handle) {
        cb.should_minimize_on_focus_loss();
    }
}

/// # Safety
///
/// `handle` must come from the engine's `init`.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_show_text_input(
    handle: *const CallbacksHandle,
    x: c_int,
    y: c_int,
    width: c_int,
    height: c_int,
) {
    if let Some(cb) = callbacks(handle) {
        cb.show_text_input(WindowRect::new(x, y, width, height));
    }
}

/// # Safety
///
/// `handle` must come from the engine's `init`.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_hide_text_input(handle: *const CallbacksHandle) {
    if let Some(cb) = callbacks(handle) {
        cb.hide_text_input();
    }
}

/// # Safety
///
/// `handle` must come from the engine's `init`; `permission` a valid string.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_request_permission(
    handle: *const CallbacksHandle,
    permission: *const c_char,
) {
    if let (Some(cb), Some(permission)) = (callbacks(handle), opt_str(permission)) {
        cb.request_permission(&permission);
    }
}

/// # Safety
///
/// `handle` must come from the engine's `init`.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_set_pointer(
    handle: *const CallbacksHandle,
    cursor_id: c_int,
) {
    if let Some(cb) = callbacks(handle) {
        cb.set_pointer(cursor_id);
    }
}

/// Copies the pixel buffer; the caller keeps ownership of `pixels`.
///
/// # Safety
///
/// `handle` must come from the engine's `init`; `pixels` must point to
/// `width * height * bytes_per_pixel` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_set_custom_cursor(
    handle: *const CallbacksHandle,
    pixels: *const u8,
    width: c_int,
    height: c_int,
    bytes_per_pixel: c_int,
    hot_x: c_int,
    hot_y: c_int,
) -> c_int {
    let Some(cb) = callbacks(handle) else {
        return -1;
    };
    let (Ok(width), Ok(height), Ok(bpp)) = (
        u32::try_from(width),
        u32::try_from(height),
        u32::try_from(bytes_per_pixel),
    ) else {
        return -1;
    };
    if pixels.is_null() {
        return -1;
    }
    let Some(len) = CursorImage::byte_len(width, height, bpp) else {
        tracing::warn!(width, height, bpp, "custom cursor size overflows");
        return -1;
    };
    let buffer = std::slice::from_raw_parts(pixels, len).to_vec();
    match CursorImage::new(width, height, bpp, buffer) {
        Ok(image) => {
            cb.set_custom_cursor(image, hot_x, hot_y);
            0
        }
        Err(e) => {
            tracing::warn!(error = %e, "invalid custom cursor");
            -1
        }
    }
}

/// # Safety
///
/// `handle` must come from the engine's `init`.
#[no_mangle]
pub unsafe extern "C" fn hostlink_callbacks_set_window_resize(
    handle: *const CallbacksHandle,
    x: c_int,
    y: c_int,
    width: c_int,
    height: c_int,
) {
    if let Some(cb) = callbacks(handle) {
        cb.set_window_resize(WindowRect::new(x, y, width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn push(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn wait_for(&self, call: &str) -> bool {
            let deadline = Instant::now() + Duration::from_secs(5);
            while Instant::now() < deadline {
                if self.calls().iter().any(|c| c == call) {
                    return true;
                }
                std::thread::sleep(Duration::from_millis(5));
            }
            false
        }
    }

    unsafe fn recorder<'a>(user_data: *mut c_void) -> &'a Recorder {
        &*(user_data as *const Recorder)
    }

    unsafe extern "C" fn rec_init(ud: *mut c_void, _cb: *const CallbacksHandle) {
        recorder(ud).push("init".into());
    }

    unsafe extern "C" fn rec_entry(ud: *mut c_void, module: *const c_char, symbol: *const c_char) {
        let module = CStr::from_ptr(module).to_string_lossy();
        let symbol = CStr::from_ptr(symbol).to_string_lossy();
        recorder(ud).push(format!("entry:{}:{}", module, symbol));
    }

    unsafe extern "C" fn rec_resume(ud: *mut c_void) {
        recorder(ud).push("resume".into());
    }

    unsafe extern "C" fn rec_pause(ud: *mut c_void) {
        recorder(ud).push("pause".into());
    }

    unsafe extern "C" fn rec_key_up(ud: *mut c_void, code: c_int) {
        recorder(ud).push(format!("key_up:{}", code));
    }

    unsafe extern "C" fn rec_focus_lost(ud: *mut c_void) {
        recorder(ud).push("keyboard_focus_lost".into());
    }

    unsafe extern "C" fn rec_resized(ud: *mut c_void) {
        recorder(ud).push("surface_resized".into());
    }

    unsafe extern "C" fn rec_text(ud: *mut c_void, count: c_int, text: *const c_char) {
        let text = CStr::from_ptr(text).to_string_lossy();
        recorder(ud).push(format!("text:{}:{}", count, text));
    }

    unsafe extern "C" fn rec_window_id(_ud: *mut c_void) -> c_int {
        -1
    }

    unsafe extern "C" fn rec_permission(_ud: *mut c_void, _name: *const c_char) -> c_int {
        0
    }

    fn engine_vtable(recorder: &Recorder) -> EngineVTable {
        EngineVTable {
            user_data: recorder as *const Recorder as *mut c_void,
            init: Some(rec_init),
            entry: Some(rec_entry),
            resume: Some(rec_resume),
            pause: Some(rec_pause),
            focus_changed: None,
            send_quit: None,
            key_down: None,
            key_up: Some(rec_key_up),
            keyboard_focus_lost: Some(rec_focus_lost),
            surface_resized: Some(rec_resized),
            text_input: Some(rec_text),
            permission_result: None,
            orientation_changed: None,
            set_resource_manager: None,
            set_screen_resolution: None,
        }
    }

    fn host_vtable() -> HostApiVTable {
        HostApiVTable {
            user_data: std::ptr::null_mut(),
            last_window_id: Some(rec_window_id),
            set_title: None,
            set_layout_fullscreen: None,
            set_preferred_orientation: None,
            set_pointer_style: None,
            set_custom_cursor: None,
            show_text_input: None,
            hide_text_input: None,
            request_permission: Some(rec_permission),
            resize_window: None,
            minimize_on_focus_loss: None,
        }
    }

    #[test]
    fn test_engine_forwards_strings() {
        let rec = Recorder::default();
        let engine = FfiEngine::new(engine_vtable(&rec));
        engine.entry("libgame.so", "SDL_main");
        engine.text_input(2, "hé");
        engine.key_down(7);
        assert_eq!(rec.calls(), vec!["entry:libgame.so:SDL_main", "text:2:hé"]);
    }

    #[test]
    fn test_host_api_status_mapping() {
        let api = FfiHostApi::new(host_vtable());
        assert!(matches!(
            api.last_window_id(),
            Err(HostError::WindowLookup(_))
        ));
        assert_eq!(api.request_permission("ohos.permission.CAMERA"), Ok(false));
        assert_eq!(
            api.set_title("x"),
            Err(HostError::Unsupported("set_title".to_string()))
        );
    }

    #[test]
    fn test_session_lifecycle_over_c_abi() {
        let rec = Recorder::default();
        let config = CString::new("[entry]\nsymbol = \"SDL_main\"\n").unwrap();
        unsafe {
            let session = hostlink_session_new(engine_vtable(&rec), host_vtable(), config.as_ptr());
            assert!(!session.is_null());

            hostlink_session_page_show(session);
            assert!(!(*session).session().bridge().has_entered());

            let cache = CString::new("/data/cache").unwrap();
            let manager = std::ptr::NonNull::<u8>::dangling().as_ptr() as *mut c_void;
            hostlink_session_about_to_appear(session, cache.as_ptr(), manager, 1080, 2340, 1080, 2340, 3.0, 60.0);
            assert!(rec.wait_for("entry:libentry.so:SDL_main"));

            hostlink_session_page_hide(session);
            hostlink_session_page_show(session);
            hostlink_session_free(session);
        }

        let calls = rec.calls();
        assert_eq!(calls.iter().filter(|c| *c == "init").count(), 1);
        assert_eq!(calls.iter().filter(|c| c.starts_with("entry")).count(), 1);
        assert!(calls.contains(&"pause".to_string()));
        assert!(calls.contains(&"resume".to_string()));
    }

    #[test]
    fn test_key_up_and_surface_hooks_reach_engine() {
        let rec = Recorder::default();
        unsafe {
            let session = hostlink_session_new(engine_vtable(&rec), host_vtable(), std::ptr::null());
            assert!(!session.is_null());
            hostlink_session_key_event(session, 1, 2017);
            hostlink_session_key_up(session, 2018);
            hostlink_session_keyboard_focus_lost(session);
            hostlink_session_surface_resized(session);
            hostlink_session_free(session);
        }
        assert_eq!(
            rec.calls(),
            vec![
                "init",
                "key_up:2017",
                "key_up:2018",
                "keyboard_focus_lost",
                "surface_resized"
            ]
        );
    }

    #[test]
    fn test_oversized_custom_cursor_is_rejected() {
        let handle = CallbacksHandle(Arc::new(hostlink_core::testing::NullCallbacks));
        let pixel = [0u8; 4];
        let code = unsafe {
            hostlink_callbacks_set_custom_cursor(
                &handle,
                pixel.as_ptr(),
                c_int::MAX,
                c_int::MAX,
                c_int::MAX,
                0,
                0,
            )
        };
        assert_eq!(code, -1);

        let code = unsafe {
            hostlink_callbacks_set_custom_cursor(&handle, pixel.as_ptr(), 1, 1, 4, 0, 0)
        };
        assert_eq!(code, 0);
    }

    #[test]
    fn test_invalid_config_yields_null() {
        let rec = Recorder::default();
        let config = CString::new("[lifecycle]\npause_policy = \"sometimes\"\n").unwrap();
        let session =
            unsafe { hostlink_session_new(engine_vtable(&rec), host_vtable(), config.as_ptr()) };
        assert!(session.is_null());
    }

    #[test]
    fn test_null_session_is_ignored() {
        unsafe {
            hostlink_session_page_show(std::ptr::null_mut());
            hostlink_session_free(std::ptr::null_mut());
        }
    }
}
