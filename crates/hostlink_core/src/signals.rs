//! Host signal routing
//!
//! Each host event maps immediately to either a lifecycle transition or a
//! one-shot call into the engine. Nothing is queued here; ordering comes
//! from the host's own event delivery.

use hostlink_platform::DisplayOrientation;

use crate::lifecycle::LifecycleState;

/// An event delivered by the host environment
#[derive(Clone, Debug, PartialEq)]
pub enum HostSignal {
    /// Page or surface became visible
    Show,
    /// Page or surface was hidden
    Hide,
    FocusChanged(bool),
    /// Key pressed (host key code)
    KeyDown(i32),
    /// Key released (host key code)
    KeyUp(i32),
    /// Soft keyboard dismissed
    KeyboardFocusLost,
    /// Rendering surface changed size
    SurfaceResized,
    /// Committed text from the soft keyboard or IME
    TextInput {
        /// Character count as reported by the host
        count: usize,
        text: String,
    },
    OrientationChanged(DisplayOrientation),
    /// Result of an earlier permission request
    PermissionResult(bool),
    /// Page or surface is being torn down
    Quit,
}

/// Where a [`HostSignal`] goes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalRoute {
    /// Request a lifecycle transition
    Transition(LifecycleState),
    /// Forward straight to the engine, no state effect
    Forward,
}

impl HostSignal {
    /// Text input with the count taken from the text itself
    pub fn text_input(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::TextInput {
            count: text.chars().count(),
            text,
        }
    }

    /// Decide whether this signal drives the state machine
    pub fn route(&self) -> SignalRoute {
        match self {
            HostSignal::Show => SignalRoute::Transition(LifecycleState::Resumed),
            HostSignal::Hide => SignalRoute::Transition(LifecycleState::Paused),
            _ => SignalRoute::Forward,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            HostSignal::Show => "show",
            HostSignal::Hide => "hide",
            HostSignal::FocusChanged(_) => "focus_changed",
            HostSignal::KeyDown(_) => "key_down",
            HostSignal::KeyUp(_) => "key_up",
            HostSignal::KeyboardFocusLost => "keyboard_focus_lost",
            HostSignal::SurfaceResized => "surface_resized",
            HostSignal::TextInput { .. } => "text_input",
            HostSignal::OrientationChanged(_) => "orientation_changed",
            HostSignal::PermissionResult(_) => "permission_result",
            HostSignal::Quit => "quit",
        }
    }
}
