//! System cursor to host pointer style mapping

/// The engine's built-in cursors, by numeric id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemCursor {
    None,
    Arrow,
    IBeam,
    Wait,
    Crosshair,
    WaitArrow,
    SizeNwse,
    SizeNesw,
    SizeWe,
    SizeNs,
    SizeAll,
    No,
    Hand,
}

impl SystemCursor {
    /// Look up a cursor id; ids outside `-1..=11` yield `None`
    pub fn from_id(id: i32) -> Option<Self> {
        let cursor = match id {
            -1 => Self::None,
            0 => Self::Arrow,
            1 => Self::IBeam,
            2 => Self::Wait,
            3 => Self::Crosshair,
            4 => Self::WaitArrow,
            5 => Self::SizeNwse,
            6 => Self::SizeNesw,
            7 => Self::SizeWe,
            8 => Self::SizeNs,
            9 => Self::SizeAll,
            10 => Self::No,
            11 => Self::Hand,
            _ => return None,
        };
        Some(cursor)
    }

    /// Host pointer style used to show this cursor
    ///
    /// The host has no dedicated wait, crosshair, diagonal resize or
    /// no-drop styles; those fall back to the default pointer.
    pub fn pointer_style(self) -> PointerStyle {
        match self {
            Self::IBeam => PointerStyle::TextCursor,
            Self::SizeWe => PointerStyle::HorizontalTextCursor,
            Self::SizeAll => PointerStyle::HandGrabbing,
            Self::Hand => PointerStyle::HandOpen,
            _ => PointerStyle::Default,
        }
    }
}

/// Host pointer styles (`pointer.PointerStyle`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerStyle {
    #[default]
    Default,
    TextCursor,
    HorizontalTextCursor,
    HandGrabbing,
    HandOpen,
}

impl PointerStyle {
    /// Numeric `pointer.PointerStyle` value
    pub fn as_raw(self) -> i32 {
        match self {
            PointerStyle::Default => 0,
            PointerStyle::HandGrabbing => 17,
            PointerStyle::HandOpen => 18,
            PointerStyle::TextCursor => 26,
            PointerStyle::HorizontalTextCursor => 39,
        }
    }
}

/// Map a cursor id straight to a pointer style; unknown ids get the default
pub fn pointer_style_for_id(id: i32) -> PointerStyle {
    SystemCursor::from_id(id)
        .map(SystemCursor::pointer_style)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_cursors() {
        assert_eq!(pointer_style_for_id(1), PointerStyle::TextCursor);
        assert_eq!(pointer_style_for_id(7), PointerStyle::HorizontalTextCursor);
        assert_eq!(pointer_style_for_id(9), PointerStyle::HandGrabbing);
        assert_eq!(pointer_style_for_id(11), PointerStyle::HandOpen);
    }

    #[test]
    fn test_unmapped_cursors_use_default() {
        for id in [-1, 0, 2, 3, 4, 5, 6, 8, 10] {
            assert_eq!(pointer_style_for_id(id), PointerStyle::Default, "id {}", id);
        }
    }

    #[test]
    fn test_out_of_range_ids_use_default() {
        for id in [i32::MIN, -2, 12, 255, i32::MAX] {
            assert_eq!(SystemCursor::from_id(id), None);
            assert_eq!(pointer_style_for_id(id), PointerStyle::Default);
        }
    }
}
