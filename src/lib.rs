//! Warm-tint and dimming overlay engine for the EyeCare desktop utility.
//!
//! This crate computes the overlay that tints the screen toward orange and
//! dims it, and owns the lifecycle of the single full-screen surface that
//! shows it. The host windowing toolkit plugs in through [`OverlaySurface`].
//!
//! # Architecture
//!
//! - [`ControlPanel`] holds the slider, preset and schedule state of the
//!   control window and emits [`OverlayCommand`]s.
//! - The commands travel one way over [`command_channel`].
//! - [`OverlayRenderer`] applies them: it computes the layer with
//!   [`compute_layer`] and creates, repaints or releases the surface.
//!
//! # Example
//!
//! ```no_run
//! use eyecare_core::{
//!     ControlPanel, MockSurface, OverlayRenderer, Preset, command_channel,
//! };
//!
//! let (tx, rx) = command_channel();
//! let mut panel = ControlPanel::new(tx);
//! let mut renderer = OverlayRenderer::new(MockSurface::new());
//!
//! // Apply a preset; the first adjustment switches the filter on.
//! panel.apply_preset(Preset::Reading);
//!
//! // Deliver the commands to the renderer.
//! for err in rx.pump(&mut renderer) {
//!     eprintln!("overlay error: {}", err);
//! }
//! assert!(renderer.is_visible());
//! ```
//!
//! # Testing
//!
//! Use [`MockSurface`] to test code without a display:
//!
//! ```
//! use eyecare_core::{MockSurface, OverlayRenderer};
//!
//! let surface = MockSurface::new();
//! let log = surface.log();
//! let mut renderer = OverlayRenderer::new(surface);
//! renderer.set_enabled(true).unwrap();
//! renderer.set_enabled(true).unwrap();
//! assert_eq!(log.lock().unwrap().live, 1);
//! ```

#![warn(missing_docs)]

mod channel;
mod color;
mod control;
mod error;
mod mock;
mod presets;
mod renderer;
mod schedule;
mod settings;
mod state;
mod surface;

// Re-export public API
pub use channel::{CommandReceiver, CommandSender, OverlayCommand, coalesce, command_channel};
pub use color::{
    DARKNESS_SCALE, OverlayLayer, Rgba, TINT_OPACITY_FLOOR, color_temperature_kelvin,
    compute_layer, darkness_opacity, tint_opacity,
};
pub use control::ControlPanel;
pub use error::OverlayError;
pub use mock::{MockSurface, SurfaceLog};
pub use presets::{DAY_BRIGHTNESS, DAY_WARMTH, NIGHT_BRIGHTNESS, NIGHT_WARMTH, Preset};
pub use renderer::{OverlayRenderer, OverlayState};
pub use schedule::{
    GRADUAL_RAMP_SECS, ScheduleConfig, SchedulePhase, Transition, parse_time, week, weekday_label,
};
pub use settings::{AppSettings, Shortcut, ThemeMode};
pub use state::{DEFAULT_BRIGHTNESS, DEFAULT_WARMTH, FilterState, MIN_BRIGHTNESS};
pub use surface::{Bounds, OverlaySurface, primary_display_bounds};

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (
        ControlPanel,
        CommandReceiver,
        OverlayRenderer<MockSurface>,
        std::sync::Arc<std::sync::Mutex<SurfaceLog>>,
    ) {
        let (tx, rx) = command_channel();
        let surface = MockSurface::new();
        let log = surface.log();
        (ControlPanel::new(tx), rx, OverlayRenderer::new(surface), log)
    }

    #[test]
    fn test_double_enable_keeps_one_surface() {
        let surface = MockSurface::new();
        let log = surface.log();
        let mut renderer = OverlayRenderer::new(surface);

        renderer.apply(OverlayCommand::SetEnabled(true)).unwrap();
        renderer.apply(OverlayCommand::SetEnabled(true)).unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.live, 1);
        assert_eq!(log.created, 1);
        assert_eq!(renderer.state(), OverlayState::Visible);
    }

    #[test]
    fn test_enable_disable_round_trip() {
        let surface = MockSurface::new();
        let log = surface.log();
        let mut renderer = OverlayRenderer::new(surface);

        renderer.apply(OverlayCommand::SetEnabled(true)).unwrap();
        renderer.apply(OverlayCommand::SetEnabled(false)).unwrap();

        assert_eq!(renderer.state(), OverlayState::Hidden);
        assert!(renderer.current_layer().is_none());
        assert_eq!(log.lock().unwrap().live, 0);
    }

    #[test]
    fn test_set_filter_while_hidden_shows_with_given_values() {
        let surface = MockSurface::new();
        let log = surface.log();
        let mut renderer = OverlayRenderer::new(surface);

        renderer
            .apply(OverlayCommand::SetFilter {
                warmth: 0.8,
                brightness: 0.6,
            })
            .unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.painted, vec![compute_layer(0.8, 0.6)]);
    }

    #[test]
    fn test_movie_preset_then_warmth_slider() {
        let (mut panel, rx, mut renderer, log) = session();

        panel.apply_preset(Preset::Movie);
        assert_eq!(panel.active_preset(), Some(Preset::Movie));
        assert_eq!(panel.filter().warmth(), 0.3);
        assert_eq!(panel.filter().brightness(), 0.7);

        panel.set_warmth(0.55);
        assert_eq!(panel.active_preset(), None);
        assert_eq!(panel.filter().brightness(), 0.7);

        assert!(rx.pump(&mut renderer).is_empty());
        assert_eq!(
            log.lock().unwrap().current(),
            Some(&compute_layer(0.55, 0.7))
        );
    }

    #[test]
    fn test_shortcut_toggle_reuses_last_values() {
        let (mut panel, rx, mut renderer, log) = session();

        panel.set_warmth(0.7);
        panel.set_brightness(0.5);
        panel.toggle_overlay_shortcut();
        assert!(rx.pump(&mut renderer).is_empty());
        assert!(!renderer.is_visible());
        assert!(!panel.filter().enabled);
        assert_eq!(log.lock().unwrap().live, 0);

        panel.toggle_overlay_shortcut();
        assert!(rx.pump(&mut renderer).is_empty());
        assert!(renderer.is_visible());
        assert_eq!(renderer.current_layer(), Some(compute_layer(0.7, 0.5)));

        panel.toggle_overlay_shortcut();
        assert!(rx.pump(&mut renderer).is_empty());
        let log = log.lock().unwrap();
        assert_eq!(log.live, 0);
        assert_eq!(log.created, log.destroyed);
    }

    #[test]
    fn test_shortcut_before_any_adjustment_uses_defaults() {
        let (mut panel, rx, mut renderer, _log) = session();

        panel.toggle_overlay_shortcut();
        rx.pump(&mut renderer);
        assert_eq!(
            renderer.current_layer(),
            Some(compute_layer(DEFAULT_WARMTH, DEFAULT_BRIGHTNESS))
        );
    }

    #[test]
    fn test_failed_enable_resyncs_panel() {
        let (tx, rx) = command_channel();
        let mut panel = ControlPanel::new(tx);
        let mut renderer = OverlayRenderer::new(MockSurface::without_display());

        panel.apply_preset(Preset::Health);
        let errors = rx.pump(&mut renderer);
        assert!(!errors.is_empty());
        assert!(errors.iter().all(|e| matches!(e, OverlayError::NoDisplay)));

        panel.sync_enabled(renderer.is_visible());
        assert!(!panel.filter().enabled);
        assert_eq!(panel.filter().warmth(), 0.4);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(Preset::from_name("movie"), Some(Preset::Movie));
        assert_eq!(Preset::from_name("Nope"), None);
        assert_eq!(Preset::ALL.len(), 7);
        for preset in Preset::ALL {
            let state = FilterState::new(preset.warmth(), preset.brightness(), true);
            assert_eq!(state.warmth(), preset.warmth());
            assert_eq!(state.brightness(), preset.brightness());
        }
    }

    #[test]
    fn test_filter_state_clamps() {
        let state = FilterState::new(-0.5, 0.0, false);
        assert_eq!(state.warmth(), 0.0);
        assert_eq!(state.brightness(), MIN_BRIGHTNESS);

        let state = FilterState::new(f32::NAN, f32::NAN, false);
        assert_eq!(state.warmth(), 0.0);
        assert_eq!(state.brightness(), DEFAULT_BRIGHTNESS);
    }
}
