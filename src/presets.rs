//! Built-in filter presets.

use std::fmt;

/// A named, fixed warmth/brightness pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Slightly warmer and darker than office.
    Health,
    /// Balanced everyday setting.
    Office,
    /// Warm and dim for long reading sessions.
    Reading,
    /// Barely filtered.
    Game,
    /// Dim for dark rooms.
    Movie,
    /// Light filtering that keeps colours close to true.
    Editing,
    /// The user's own slot.
    Custom,
}

impl Preset {
    /// All presets in display order.
    pub const ALL: [Preset; 7] = [
        Preset::Health,
        Preset::Office,
        Preset::Reading,
        Preset::Game,
        Preset::Movie,
        Preset::Editing,
        Preset::Custom,
    ];

    /// Warmth applied by this preset.
    pub fn warmth(self) -> f32 {
        match self {
            Preset::Health => 0.4,
            Preset::Office => 0.2,
            Preset::Reading => 0.5,
            Preset::Game => 0.1,
            Preset::Movie => 0.3,
            Preset::Editing => 0.15,
            Preset::Custom => 0.3,
        }
    }

    /// Brightness applied by this preset.
    pub fn brightness(self) -> f32 {
        match self {
            Preset::Health => 0.85,
            Preset::Office => 1.0,
            Preset::Reading => 0.8,
            Preset::Game => 1.0,
            Preset::Movie => 0.7,
            Preset::Editing => 0.95,
            Preset::Custom => 0.9,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Health => "Health",
            Preset::Office => "Office",
            Preset::Reading => "Reading",
            Preset::Game => "Game",
            Preset::Movie => "Movie",
            Preset::Editing => "Editing",
            Preset::Custom => "Custom",
        }
    }

    /// One-line description shown under the preset grid.
    pub fn description(self) -> &'static str {
        match self {
            Preset::Health => {
                "Slightly lower color temperature and brightness, darker than office mode, \
                 suitable for people who are sensitive to light"
            }
            Preset::Office => "Balanced settings for comfortable office work",
            Preset::Reading => "Warmer tones and reduced brightness for extended reading",
            Preset::Game => "Minimal filtering for color accuracy in gaming",
            Preset::Movie => "Optimized for watching movies in darker environments",
            Preset::Editing => "Slight filtering while maintaining color accuracy",
            Preset::Custom => "Your personalized settings",
        }
    }

    /// Look up a preset by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Day / Night
// =============================================================================

/// Warmth of the Day quick setting.
pub const DAY_WARMTH: f32 = 0.15;
/// Brightness of the Day quick setting.
pub const DAY_BRIGHTNESS: f32 = 1.0;
/// Warmth of the Night quick setting.
pub const NIGHT_WARMTH: f32 = 0.6;
/// Brightness of the Night quick setting.
pub const NIGHT_BRIGHTNESS: f32 = 0.7;
