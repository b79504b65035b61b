//! Application preferences and keyboard shortcuts.

/// Light or dark control window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme, selected by the Day quick setting.
    #[default]
    Light,
    /// Dark theme, selected by the Night quick setting.
    Dark,
}

/// General preferences shown on the settings page.
///
/// Startup and tray flags are only recorded here; registering with the OS is
/// left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    /// Start with the user session.
    pub launch_at_startup: bool,
    /// Close to the notification area instead of quitting.
    pub minimize_to_tray: bool,
    /// Show a notice when something needs the user's attention.
    pub show_notifications: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            launch_at_startup: false,
            minimize_to_tray: true,
            show_notifications: true,
        }
    }
}

/// Global keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl+Alt+F: show or hide the overlay.
    ToggleOverlay,
    /// Ctrl+Alt+D: bring up the display page.
    ShowDashboard,
    /// Ctrl+Alt+S: bring up the settings page.
    ShowSettings,
}

impl Shortcut {
    /// All shortcuts, in the order the settings page lists them.
    pub const ALL: [Shortcut; 3] = [
        Shortcut::ToggleOverlay,
        Shortcut::ShowDashboard,
        Shortcut::ShowSettings,
    ];

    /// The letter pressed together with Ctrl+Alt.
    pub fn key(self) -> char {
        match self {
            Shortcut::ToggleOverlay => 'f',
            Shortcut::ShowDashboard => 'd',
            Shortcut::ShowSettings => 's',
        }
    }

    /// Key combination as shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Shortcut::ToggleOverlay => "Ctrl+Alt+F",
            Shortcut::ShowDashboard => "Ctrl+Alt+D",
            Shortcut::ShowSettings => "Ctrl+Alt+S",
        }
    }

    /// What the shortcut does.
    pub fn description(self) -> &'static str {
        match self {
            Shortcut::ToggleOverlay => "Toggle filter",
            Shortcut::ShowDashboard => "Open dashboard",
            Shortcut::ShowSettings => "Open settings",
        }
    }

    /// Resolve a key press.
    pub fn from_key(ctrl: bool, alt: bool, key: char) -> Option<Self> {
        if !(ctrl && alt) {
            return None;
        }
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|shortcut| shortcut.key() == key)
    }
}
