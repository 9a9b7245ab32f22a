//! Host callback capability set
//!
//! The engine calls back into the host through [`HostCallbacks`]. Every
//! method is fire-and-forget: implementations hand the work to the host
//! and return immediately, logging any failure instead of reporting it.

use crate::error::{HostError, Result};

/// Rectangle in surface pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pixel data for a custom cursor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorImage {
    width: u32,
    height: u32,
    bytes_per_pixel: u32,
    pixels: Vec<u8>,
}

impl CursorImage {
    /// Buffer size for the given dimensions, `None` if it overflows `usize`
    pub fn byte_len(width: u32, height: u32, bytes_per_pixel: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(bytes_per_pixel as usize)
    }

    /// Create a cursor image, checking the buffer covers the whole surface
    pub fn new(width: u32, height: u32, bytes_per_pixel: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = Self::byte_len(width, height, bytes_per_pixel).ok_or_else(|| {
            HostError::Other(format!(
                "cursor size {}x{}x{} overflows",
                width, height, bytes_per_pixel
            ))
        })?;
        if pixels.len() != expected {
            return Err(HostError::Other(format!(
                "cursor buffer is {} bytes, expected {} for {}x{}x{}",
                pixels.len(),
                expected,
                width,
                height,
                bytes_per_pixel
            )));
        }
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        self.bytes_per_pixel
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Outbound requests from the engine to the host
pub trait HostCallbacks: Send + Sync + 'static {
    fn set_title(&self, title: &str);

    /// Switch between full-screen layout and a regular window
    fn set_window_style(&self, fullscreen: bool);

    /// Ask for a preferred orientation derived from the current size and a
    /// hint such as `"LandscapeLeft LandscapeRight"`
    fn set_orientation(&self, width: i32, height: i32, resizable: bool, hint: &str);

    fn should_minimize_on_focus_loss(&self);

    fn show_text_input(&self, area: WindowRect);

    fn hide_text_input(&self);

    /// The granted/denied result is delivered to the engine asynchronously
    fn request_permission(&self, permission: &str);

    /// Apply one of the engine's system cursors
    fn set_pointer(&self, cursor_id: i32);

    fn set_custom_cursor(&self, image: CursorImage, hot_x: i32, hot_y: i32);

    fn set_window_resize(&self, area: WindowRect);
}
