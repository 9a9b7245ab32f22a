//! HarmonyOS page session
//!
//! One [`HarmonySession`] per hosted page. The page's ArkUI lifecycle hooks
//! (`aboutToAppear`, `onPageShow`, `onPageHide`, `aboutToDisappear`) and
//! its input handlers call into it; it drives the lifecycle bridge and owns
//! the callbacks handed to the engine.

use std::sync::Arc;

use hostlink_core::{BridgeConfig, HostSignal, LifecycleBridge, TransitionOutcome};
use hostlink_platform::{NativeEngine, ScreenResolution};

use crate::dispatch::HostDispatcher;
use crate::input;
use crate::resources::ResourceContext;
use crate::window::{HarmonyCallbacks, HostWindowApi};

pub struct HarmonySession {
    bridge: LifecycleBridge,
    callbacks: Arc<HarmonyCallbacks>,
}

impl HarmonySession {
    pub fn new(
        engine: Arc<dyn NativeEngine>,
        api: Arc<dyn HostWindowApi>,
        dispatcher: HostDispatcher,
        config: &BridgeConfig,
    ) -> Self {
        let callbacks = Arc::new(HarmonyCallbacks::new(
            api,
            dispatcher,
            Arc::downgrade(&engine),
        ));
        let bridge = LifecycleBridge::new(engine, callbacks.clone(), config);
        Self { bridge, callbacks }
    }

    pub fn bridge(&self) -> &LifecycleBridge {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut LifecycleBridge {
        &mut self.bridge
    }

    pub fn callbacks(&self) -> &Arc<HarmonyCallbacks> {
        &self.callbacks
    }

    /// `onWindowStageCreate`: apply the initial layout style
    pub fn window_stage_created(&self, fullscreen: bool) {
        self.callbacks.apply_window_style(fullscreen);
    }

    /// `aboutToAppear`: bind resources; starts the engine if a show already
    /// arrived
    pub fn about_to_appear(
        &mut self,
        resources: &ResourceContext,
        resolution: ScreenResolution,
    ) -> Option<TransitionOutcome> {
        let bound = self.bridge.bind_resources(
            resources.cache_dir(),
            resources.resource_manager(),
            resolution,
        );
        match bound {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "failed to start native engine");
                None
            }
        }
    }

    /// `onPageShow`
    pub fn page_show(&mut self) -> Option<TransitionOutcome> {
        self.deliver(HostSignal::FocusChanged(true));
        self.deliver(HostSignal::Show)
    }

    /// `onPageHide`
    pub fn page_hide(&mut self) -> Option<TransitionOutcome> {
        self.deliver(HostSignal::FocusChanged(false));
        self.deliver(HostSignal::Hide)
    }

    /// `aboutToDisappear`
    pub fn about_to_disappear(&mut self) {
        self.callbacks.mark_quit();
        self.deliver(HostSignal::Quit);
    }

    pub fn key_event(&mut self, action: i32, code: i32) {
        if let Some(signal) = input::from_xcomponent_key(action, code) {
            self.deliver(signal);
        }
    }

    pub fn key_down(&mut self, code: i32) {
        self.deliver(HostSignal::KeyDown(code));
    }

    pub fn key_up(&mut self, code: i32) {
        self.deliver(HostSignal::KeyUp(code));
    }

    /// `onNativeKeyboardFocusLost`
    pub fn keyboard_focus_lost(&mut self) {
        self.deliver(HostSignal::KeyboardFocusLost);
    }

    /// `onNativeResize`
    pub fn surface_resized(&mut self) {
        self.deliver(HostSignal::SurfaceResized);
    }

    pub fn text_input(&mut self, count: usize, text: &str) {
        if let Some(signal) = input::from_text_input(count, text) {
            self.deliver(signal);
        }
    }

    pub fn display_rotation_changed(&mut self, rotation: i32) {
        self.deliver(input::from_display_rotation(rotation));
    }

    /// Permission result reported by the page rather than by the callbacks
    pub fn permission_result(&mut self, granted: bool) {
        self.deliver(HostSignal::PermissionResult(granted));
    }

    fn deliver(&mut self, signal: HostSignal) -> Option<TransitionOutcome> {
        let name = signal.name();
        match self.bridge.dispatch(signal) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(signal = name, error = %e, "host signal failed");
                None
            }
        }
    }
}
