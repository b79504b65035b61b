//! Control surface view model.
//!
//! [`ControlPanel`] holds what the sliders, preset grid and toggles show, and
//! turns every user action into [`OverlayCommand`]s. Values are clamped here,
//! so the renderer never sees anything out of range.

use crate::channel::{CommandSender, OverlayCommand};
use crate::color::color_temperature_kelvin;
use crate::presets::{DAY_BRIGHTNESS, DAY_WARMTH, NIGHT_BRIGHTNESS, NIGHT_WARMTH, Preset};
use crate::schedule::{ScheduleConfig, SchedulePhase};
use crate::settings::{AppSettings, ThemeMode};
use crate::state::FilterState;

use chrono::NaiveDateTime;
use log::{debug, info};

/// State behind the control window.
pub struct ControlPanel {
    filter: FilterState,
    active_preset: Option<Preset>,
    theme: ThemeMode,
    schedule: ScheduleConfig,
    settings: AppSettings,
    schedule_phase: SchedulePhase,
    schedule_engaged: bool,
    commands: CommandSender,
}

impl ControlPanel {
    /// Create a panel with default values, sending to `commands`.
    pub fn new(commands: CommandSender) -> Self {
        Self {
            filter: FilterState::default(),
            active_preset: None,
            theme: ThemeMode::default(),
            schedule: ScheduleConfig::default(),
            settings: AppSettings::default(),
            schedule_phase: SchedulePhase::Inactive,
            schedule_engaged: false,
            commands,
        }
    }

    /// Current filter values.
    pub fn filter(&self) -> FilterState {
        self.filter
    }

    /// The preset whose values are showing, until a slider moves.
    pub fn active_preset(&self) -> Option<Preset> {
        self.active_preset
    }

    /// Theme selected by the day/night buttons.
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Auto schedule.
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    /// Auto schedule, for editing.
    pub fn schedule_mut(&mut self) -> &mut ScheduleConfig {
        &mut self.schedule
    }

    /// General preferences.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// General preferences, for editing.
    pub fn settings_mut(&mut self) -> &mut AppSettings {
        &mut self.settings
    }

    /// Colour temperature shown next to the warmth slider.
    pub fn color_temperature(&self) -> u32 {
        color_temperature_kelvin(self.filter.warmth())
    }

    /// Brightness shown next to the brightness slider.
    pub fn brightness_percent(&self) -> u8 {
        self.filter.brightness_percent()
    }

    /// Warmth slider moved.
    pub fn set_warmth(&mut self, warmth: f32) {
        self.filter.set_warmth(warmth);
        self.active_preset = None;
        self.push_filter();
    }

    /// Brightness slider moved.
    pub fn set_brightness(&mut self, brightness: f32) {
        self.filter.set_brightness(brightness);
        self.active_preset = None;
        self.push_filter();
    }

    /// Preset button pressed.
    pub fn apply_preset(&mut self, preset: Preset) {
        debug!("applying preset {}", preset);
        self.filter.set_warmth(preset.warmth());
        self.filter.set_brightness(preset.brightness());
        self.active_preset = Some(preset);
        self.push_filter();
    }

    /// Day quick setting: barely warm, full brightness, light theme.
    pub fn apply_day(&mut self) {
        self.apply_quick_setting(DAY_WARMTH, DAY_BRIGHTNESS, ThemeMode::Light);
    }

    /// Night quick setting: warm, dimmed, dark theme.
    pub fn apply_night(&mut self) {
        self.apply_quick_setting(NIGHT_WARMTH, NIGHT_BRIGHTNESS, ThemeMode::Dark);
    }

    /// Enable or disable the filter.
    ///
    /// The user takes over from the schedule: it will neither fade the filter
    /// back in nor switch it off when the current window closes.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.release_schedule();
        self.send_enabled(enabled);
    }

    /// The enable/disable button.
    pub fn toggle_enabled(&mut self) {
        self.set_enabled(!self.filter.enabled);
    }

    /// The global toggle shortcut.
    pub fn toggle_overlay_shortcut(&mut self) {
        self.release_schedule();
        self.filter.enabled = !self.filter.enabled;
        self.commands.send(OverlayCommand::Toggle);
    }

    /// Whether the schedule switched the filter on and still owns it.
    pub fn schedule_engaged(&self) -> bool {
        self.schedule_engaged
    }

    /// Record what the renderer actually shows, without sending anything.
    pub fn sync_enabled(&mut self, visible: bool) {
        self.filter.enabled = visible;
    }

    /// Restore every preference and the schedule to their defaults.
    pub fn reset_settings(&mut self) {
        info!("resetting settings");
        self.settings = AppSettings::default();
        self.schedule = ScheduleConfig::default();
        self.theme = ThemeMode::default();
    }

    /// Feed the clock to the schedule.
    ///
    /// Acts only on phase changes: entering the window switches the filter on
    /// (fading in when ramping), leaving it switches the filter off again if
    /// the schedule was the one that switched it on.
    pub fn tick_schedule(&mut self, now: NaiveDateTime) {
        let phase = self.schedule.phase_at(now);
        if phase == self.schedule_phase {
            return;
        }
        let previous = std::mem::replace(&mut self.schedule_phase, phase);

        match phase {
            SchedulePhase::Inactive => {
                if self.schedule_engaged {
                    info!("schedule window closed");
                    self.schedule_engaged = false;
                    self.send_enabled(false);
                }
            }
            SchedulePhase::Ramping(progress) => {
                if previous == SchedulePhase::Inactive {
                    self.engage_schedule();
                }
                if self.filter.enabled && self.schedule_engaged {
                    let (warmth, brightness) = self.ramped(progress);
                    self.commands.send(OverlayCommand::SetFilter { warmth, brightness });
                }
            }
            SchedulePhase::Active => {
                if previous == SchedulePhase::Inactive {
                    self.engage_schedule();
                }
                if self.filter.enabled && self.schedule_engaged {
                    self.push_filter();
                }
            }
        }
    }

    fn engage_schedule(&mut self) {
        if self.filter.enabled {
            return;
        }
        info!("schedule window opened");
        self.schedule_engaged = true;
        self.send_enabled(true);
    }

    fn release_schedule(&mut self) {
        if self.schedule_engaged {
            debug!("schedule released by user");
            self.schedule_engaged = false;
        }
    }

    fn send_enabled(&mut self, enabled: bool) {
        self.filter.enabled = enabled;
        self.commands.send(OverlayCommand::SetEnabled(enabled));
    }

    /// Values partway from neutral toward the current filter.
    fn ramped(&self, progress: f32) -> (f32, f32) {
        let progress = progress.clamp(0.0, 1.0);
        let warmth = self.filter.warmth() * progress;
        let brightness = 1.0 - (1.0 - self.filter.brightness()) * progress;
        (warmth, brightness)
    }

    fn apply_quick_setting(&mut self, warmth: f32, brightness: f32, theme: ThemeMode) {
        self.filter.set_warmth(warmth);
        self.filter.set_brightness(brightness);
        self.active_preset = None;
        self.theme = theme;
        self.push_filter();
    }

    /// Send the current values, switching the filter on first if needed.
    fn push_filter(&mut self) {
        if !self.filter.enabled {
            self.send_enabled(true);
        }
        self.commands.send(OverlayCommand::SetFilter {
            warmth: self.filter.warmth(),
            brightness: self.filter.brightness(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{CommandReceiver, command_channel};
    use crate::mock::MockSurface;
    use crate::renderer::OverlayRenderer;
    use chrono::NaiveDate;

    fn panel() -> (ControlPanel, CommandReceiver) {
        let (tx, rx) = command_channel();
        (ControlPanel::new(tx), rx)
    }

    fn sent(rx: &CommandReceiver) -> Vec<OverlayCommand> {
        rx.drain()
    }

    #[test]
    fn test_first_adjustment_auto_enables() {
        let (mut panel, rx) = panel();

        panel.set_warmth(0.5);
        assert!(panel.filter().enabled);
        assert_eq!(
            sent(&rx),
            vec![
                OverlayCommand::SetEnabled(true),
                OverlayCommand::SetFilter {
                    warmth: 0.5,
                    brightness: 1.0
                },
            ]
        );

        panel.set_brightness(0.8);
        assert_eq!(
            sent(&rx),
            vec![OverlayCommand::SetFilter {
                warmth: 0.5,
                brightness: 0.8
            }]
        );
    }

    #[test]
    fn test_values_clamped_before_sending() {
        let (mut panel, rx) = panel();

        panel.set_warmth(1.7);
        panel.set_brightness(0.05);
        let last = sent(&rx).pop().unwrap();
        assert_eq!(
            last,
            OverlayCommand::SetFilter {
                warmth: 1.0,
                brightness: 0.3
            }
        );
    }

    #[test]
    fn test_day_and_night_switch_theme() {
        let (mut panel, _rx) = panel();

        panel.apply_preset(Preset::Reading);
        panel.apply_night();
        assert_eq!(panel.theme(), ThemeMode::Dark);
        assert_eq!(panel.active_preset(), None);
        assert_eq!(panel.filter().warmth(), 0.6);
        assert_eq!(panel.filter().brightness(), 0.7);

        panel.apply_day();
        assert_eq!(panel.theme(), ThemeMode::Light);
        assert_eq!(panel.filter().warmth(), 0.15);
        assert_eq!(panel.brightness_percent(), 100);
    }

    #[test]
    fn test_toggle_button_sends_set_enabled() {
        let (mut panel, rx) = panel();

        panel.toggle_enabled();
        panel.toggle_enabled();
        assert_eq!(
            sent(&rx),
            vec![
                OverlayCommand::SetEnabled(true),
                OverlayCommand::SetEnabled(false)
            ]
        );
    }

    #[test]
    fn test_color_temperature_follows_warmth() {
        let (mut panel, _rx) = panel();
        assert_eq!(panel.color_temperature(), 5360);
        panel.set_warmth(1.0);
        assert_eq!(panel.color_temperature(), 2700);
    }

    #[test]
    fn test_reset_settings() {
        let (mut panel, _rx) = panel();
        panel.settings_mut().launch_at_startup = true;
        panel.schedule_mut().enabled = true;
        panel.apply_night();

        panel.reset_settings();
        assert_eq!(*panel.settings(), AppSettings::default());
        assert_eq!(*panel.schedule(), ScheduleConfig::default());
        assert_eq!(panel.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_schedule_fades_in_and_releases() {
        let (mut panel, rx) = panel();
        panel.schedule_mut().enabled = true;
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        panel.tick_schedule(monday.and_hms_opt(19, 0, 0).unwrap());
        assert!(sent(&rx).is_empty());

        panel.tick_schedule(monday.and_hms_opt(20, 15, 0).unwrap());
        assert!(panel.filter().enabled);
        let commands = sent(&rx);
        assert_eq!(commands[0], OverlayCommand::SetEnabled(true));
        assert_eq!(
            commands[1],
            OverlayCommand::SetFilter {
                warmth: 0.15,
                brightness: 1.0
            }
        );

        panel.tick_schedule(monday.and_hms_opt(21, 0, 0).unwrap());
        assert_eq!(
            sent(&rx),
            vec![OverlayCommand::SetFilter {
                warmth: 0.3,
                brightness: 1.0
            }]
        );

        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        panel.tick_schedule(tuesday.and_hms_opt(6, 0, 0).unwrap());
        assert!(!panel.filter().enabled);
        assert_eq!(sent(&rx), vec![OverlayCommand::SetEnabled(false)]);
    }

    #[test]
    fn test_schedule_leaves_manual_filter_alone() {
        let (mut panel, rx) = panel();
        panel.set_enabled(true);
        panel.schedule_mut().enabled = true;
        panel.schedule_mut().transition = crate::schedule::Transition::Instant;
        let _ = sent(&rx);

        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        panel.tick_schedule(monday.and_hms_opt(22, 0, 0).unwrap());
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        panel.tick_schedule(tuesday.and_hms_opt(7, 0, 0).unwrap());

        assert!(panel.filter().enabled);
        assert!(sent(&rx).is_empty());
    }

    #[test]
    fn test_manual_disable_during_ramp_stays_off() {
        let (mut panel, rx) = panel();
        let mut renderer = OverlayRenderer::new(MockSurface::new());
        panel.schedule_mut().enabled = true;
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        panel.tick_schedule(monday.and_hms_opt(20, 5, 0).unwrap());
        assert!(rx.pump(&mut renderer).is_empty());
        assert!(renderer.is_visible());
        assert!(panel.schedule_engaged());

        panel.toggle_enabled();
        rx.pump(&mut renderer);
        assert!(!renderer.is_visible());
        assert!(!panel.schedule_engaged());

        // Further ramp ticks and the switch to full strength send nothing.
        panel.tick_schedule(monday.and_hms_opt(20, 5, 30).unwrap());
        panel.tick_schedule(monday.and_hms_opt(20, 45, 0).unwrap());
        assert!(sent(&rx).is_empty());
        assert!(!renderer.is_visible());
        assert!(!panel.filter().enabled);
    }

    #[test]
    fn test_shortcut_during_window_keeps_filter_past_close() {
        let (mut panel, rx) = panel();
        panel.schedule_mut().enabled = true;
        panel.schedule_mut().transition = crate::schedule::Transition::Instant;
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        panel.tick_schedule(monday.and_hms_opt(22, 0, 0).unwrap());
        panel.toggle_overlay_shortcut();
        panel.toggle_overlay_shortcut();
        let _ = sent(&rx);
        assert!(panel.filter().enabled);

        // The user switched it back on, so the window closing leaves it on.
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        panel.tick_schedule(tuesday.and_hms_opt(7, 0, 0).unwrap());
        assert!(panel.filter().enabled);
        assert!(sent(&rx).is_empty());
    }
}
