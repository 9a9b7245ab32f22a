//! HarmonyOS input conversion
//!
//! Converts XComponent key events and display rotation into host signals.

use hostlink_core::HostSignal;
use hostlink_platform::DisplayOrientation;

/// Key action from OH_NativeXComponent_KeyEvent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// OH_NATIVEXCOMPONENT_KEY_ACTION_DOWN
    Down,
    /// OH_NATIVEXCOMPONENT_KEY_ACTION_UP
    Up,
}

impl KeyAction {
    pub fn from_raw(action: i32) -> Option<Self> {
        match action {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            _ => None,
        }
    }
}

/// Convert an XComponent key event
///
/// Unknown actions are dropped.
pub fn from_xcomponent_key(action: i32, code: i32) -> Option<HostSignal> {
    match KeyAction::from_raw(action)? {
        KeyAction::Down => Some(HostSignal::KeyDown(code)),
        KeyAction::Up => Some(HostSignal::KeyUp(code)),
    }
}

/// Convert committed IME text. `count` is trusted when it is non-zero.
pub fn from_text_input(count: usize, text: &str) -> Option<HostSignal> {
    if text.is_empty() {
        return None;
    }
    if count == 0 {
        return Some(HostSignal::text_input(text));
    }
    Some(HostSignal::TextInput {
        count,
        text: text.to_string(),
    })
}

/// Convert a `display.rotation` value
pub fn from_display_rotation(rotation: i32) -> HostSignal {
    HostSignal::OrientationChanged(DisplayOrientation::from_rotation(rotation))
}
