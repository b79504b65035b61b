//! Overlay surface capability.

use crate::color::OverlayLayer;
use crate::error::OverlayError;

/// Screen rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Bounds {
    /// A rectangle anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Trait for host windowing backends that can show the overlay.
///
/// An implementation owns at most one surface. The surface must cover the
/// given bounds, ignore pointer input, stay above other windows, stay out of
/// the task switcher, and be neither resizable nor focusable.
///
/// This allows for mock implementations in tests.
pub trait OverlaySurface {
    /// Bounds of the primary display.
    fn primary_bounds(&self) -> Result<Bounds, OverlayError>;

    /// Create the surface over `bounds` with its first content.
    fn create(&mut self, bounds: Bounds, layer: &OverlayLayer) -> Result<(), OverlayError>;

    /// Replace the content of the existing surface.
    fn set_content(&mut self, layer: &OverlayLayer) -> Result<(), OverlayError>;

    /// Release the surface entirely.
    fn destroy(&mut self);
}

/// Query the primary display size from the OS.
#[cfg(windows)]
pub fn primary_display_bounds() -> Result<Bounds, OverlayError> {
    use windows_sys::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    if width <= 0 || height <= 0 {
        return Err(OverlayError::NoDisplay);
    }
    Ok(Bounds::from_size(width as u32, height as u32))
}

/// Query the primary display size from the OS.
///
/// Not available on this platform; backends fall back to their own monitor
/// query.
#[cfg(not(windows))]
pub fn primary_display_bounds() -> Result<Bounds, OverlayError> {
    Err(OverlayError::NoDisplay)
}
