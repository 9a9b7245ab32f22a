//! Preferred orientation resolution
//!
//! Turns the engine's `(width, height, resizable, hint)` request into one
//! concrete orientation for the host window API. The hint lists the
//! allowed orientations, e.g. `"LandscapeLeft LandscapeRight"`.

/// Orientation values understood by the OHOS window API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Unspecified,
    Portrait,
    Landscape,
    PortraitInverted,
    LandscapeInverted,
    AutoRotation,
    AutoRotationPortrait,
    AutoRotationLandscape,
}

impl Orientation {
    /// Numeric `window.Orientation` value
    pub fn as_raw(self) -> i32 {
        match self {
            Orientation::Unspecified => 0,
            Orientation::Portrait => 1,
            Orientation::Landscape => 2,
            Orientation::PortraitInverted => 3,
            Orientation::LandscapeInverted => 4,
            Orientation::AutoRotation => 5,
            Orientation::AutoRotationPortrait => 6,
            Orientation::AutoRotationLandscape => 7,
        }
    }

    pub fn is_auto_rotation(self) -> bool {
        matches!(
            self,
            Orientation::AutoRotation
                | Orientation::AutoRotationPortrait
                | Orientation::AutoRotationLandscape
        )
    }
}

/// Orientations named in a hint string
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrientationHint {
    pub landscape_right: bool,
    pub landscape_left: bool,
    pub portrait: bool,
    pub portrait_upside_down: bool,
}

impl OrientationHint {
    /// Parse a hint by looking for each orientation name anywhere in it;
    /// separators and unknown text are ignored
    pub fn parse(hint: &str) -> Self {
        Self {
            landscape_right: hint.contains("LandscapeRight"),
            landscape_left: hint.contains("LandscapeLeft"),
            portrait: hint.contains("Portrait"),
            portrait_upside_down: hint.contains("PortraitUpsideDown"),
        }
    }

    /// Resolved landscape choice, `None` if no landscape variant is allowed
    pub fn landscape(&self) -> Option<Orientation> {
        match (self.landscape_right, self.landscape_left) {
            (true, true) => Some(Orientation::AutoRotationLandscape),
            (true, false) => Some(Orientation::Landscape),
            (false, true) => Some(Orientation::LandscapeInverted),
            (false, false) => None,
        }
    }

    /// Resolved portrait choice, `None` if no portrait variant is allowed
    pub fn portrait(&self) -> Option<Orientation> {
        match (self.portrait, self.portrait_upside_down) {
            (true, true) => Some(Orientation::AutoRotationPortrait),
            (true, false) => Some(Orientation::Portrait),
            (false, true) => Some(Orientation::PortraitInverted),
            (false, false) => None,
        }
    }
}

/// Pick the orientation to request from the host
pub fn resolve_orientation(width: i32, height: i32, resizable: bool, hint: &str) -> Orientation {
    let hint = OrientationHint::parse(hint);
    let is_wide = width > height;

    match (hint.landscape(), hint.portrait()) {
        (None, None) => {
            if is_wide {
                Orientation::AutoRotationLandscape
            } else {
                Orientation::AutoRotationPortrait
            }
        }
        (Some(landscape), None) => landscape,
        (None, Some(portrait)) => portrait,
        (Some(landscape), Some(portrait)) => {
            if resizable {
                Orientation::AutoRotation
            } else if is_wide {
                landscape
            } else {
                portrait
            }
        }
    }
}
