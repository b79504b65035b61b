//! Filter state.

/// Lowest brightness the controls allow.
pub const MIN_BRIGHTNESS: f32 = 0.3;
/// Warmth at application start.
pub const DEFAULT_WARMTH: f32 = 0.3;
/// Brightness at application start.
pub const DEFAULT_BRIGHTNESS: f32 = 1.0;

/// The user's current filter settings.
///
/// Warmth is kept in `[0, 1]` and brightness in `[MIN_BRIGHTNESS, 1]`; every
/// setter clamps, so a `FilterState` can be forwarded to the renderer as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    warmth: f32,
    brightness: f32,
    /// Whether the overlay should be shown.
    pub enabled: bool,
}

impl FilterState {
    /// Create a state, clamping both values into their domains.
    pub fn new(warmth: f32, brightness: f32, enabled: bool) -> Self {
        Self {
            warmth: clamp_warmth(warmth),
            brightness: clamp_brightness(brightness),
            enabled,
        }
    }

    /// Warmth in `[0, 1]`.
    pub fn warmth(&self) -> f32 {
        self.warmth
    }

    /// Brightness in `[MIN_BRIGHTNESS, 1]`.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Set warmth, clamped to `[0, 1]`.
    pub fn set_warmth(&mut self, warmth: f32) {
        self.warmth = clamp_warmth(warmth);
    }

    /// Set brightness, clamped to `[MIN_BRIGHTNESS, 1]`.
    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = clamp_brightness(brightness);
    }

    /// Brightness as a whole percentage.
    pub fn brightness_percent(&self) -> u8 {
        (self.brightness * 100.0).round() as u8
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            warmth: DEFAULT_WARMTH,
            brightness: DEFAULT_BRIGHTNESS,
            enabled: false,
        }
    }
}

fn clamp_warmth(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

fn clamp_brightness(value: f32) -> f32 {
    if value.is_nan() {
        DEFAULT_BRIGHTNESS
    } else {
        value.clamp(MIN_BRIGHTNESS, 1.0)
    }
}
