//! Overlay colour and opacity computation.
//!
//! The overlay is two full-screen layers composited over the desktop: a warm
//! tint whose hue and strength follow the warmth control, and a black layer
//! whose opacity follows the brightness control.

/// Red channel of the tint layer.
pub const TINT_RED: u8 = 255;
/// Green channel at warmth 0.
pub const TINT_GREEN_BASE: f32 = 200.0;
/// Green drop between warmth 0 and warmth 1.
pub const TINT_GREEN_SLOPE: f32 = 120.0;
/// Blue channel at warmth 0.
pub const TINT_BLUE_BASE: f32 = 150.0;
/// Blue drop between warmth 0 and warmth 1.
pub const TINT_BLUE_SLOPE: f32 = 140.0;
/// Tint opacity at warmth 0.
pub const TINT_OPACITY_FLOOR: f32 = 0.06;
/// Extra tint opacity at warmth 1.
pub const TINT_OPACITY_SLOPE: f32 = 0.28;
/// Darkness opacity reached at brightness 0.
pub const DARKNESS_SCALE: f32 = 0.65;

const WARMEST_KELVIN: f32 = 2700.0;
const COOLEST_KELVIN: f32 = 6500.0;

/// An RGB colour with a straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity.
    pub a: f32,
}

impl Rgba {
    /// Quantise to four bytes, alpha rounded to the nearest 1/255.
    pub fn to_rgba8(self) -> [u8; 4] {
        let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, alpha]
    }

    /// CSS-style `rgba(r,g,b,a)` text.
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// The two composited layers of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayer {
    /// Warm tint, painted first.
    pub tint: Rgba,
    /// Black dimming layer, painted over the tint.
    pub darkness: Rgba,
}

/// Compute the overlay for a warmth and brightness in `[0, 1]`.
///
/// Inputs are expected to be clamped by the caller.
///
/// ```
/// use eyecare_core::compute_layer;
///
/// let layer = compute_layer(0.0, 1.0);
/// assert_eq!(layer.darkness.a, 0.0);
/// assert_eq!((layer.tint.r, layer.tint.g, layer.tint.b), (255, 200, 150));
/// ```
pub fn compute_layer(warmth: f32, brightness: f32) -> OverlayLayer {
    let green = (TINT_GREEN_BASE - warmth * TINT_GREEN_SLOPE).round() as u8;
    let blue = (TINT_BLUE_BASE - warmth * TINT_BLUE_SLOPE).round() as u8;

    OverlayLayer {
        tint: Rgba {
            r: TINT_RED,
            g: green,
            b: blue,
            a: tint_opacity(warmth),
        },
        darkness: Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: darkness_opacity(brightness),
        },
    }
}

/// Opacity of the tint layer.
pub fn tint_opacity(warmth: f32) -> f32 {
    TINT_OPACITY_FLOOR + warmth * TINT_OPACITY_SLOPE
}

/// Opacity of the dimming layer.
pub fn darkness_opacity(brightness: f32) -> f32 {
    (1.0 - brightness) * DARKNESS_SCALE
}

/// Equivalent colour temperature in kelvin, shown next to the warmth slider.
pub fn color_temperature_kelvin(warmth: f32) -> u32 {
    (WARMEST_KELVIN + (1.0 - warmth) * (COOLEST_KELVIN - WARMEST_KELVIN)).round() as u32
}
