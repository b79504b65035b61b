//! Overlay renderer session.

use crate::channel::OverlayCommand;
use crate::color::{OverlayLayer, compute_layer};
use crate::error::OverlayError;
use crate::state::{DEFAULT_BRIGHTNESS, DEFAULT_WARMTH};
use crate::surface::OverlaySurface;

use log::{debug, info, warn};

/// Whether the overlay surface currently exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    /// No surface.
    #[default]
    Hidden,
    /// Exactly one surface is on screen.
    Visible,
}

/// Owns the overlay surface and its show/update/hide lifecycle.
///
/// The renderer starts [`OverlayState::Hidden`]. Enabling while visible is a
/// no-op, disabling releases the surface entirely, and dropping the renderer
/// releases it too.
///
/// # Example
///
/// ```
/// use eyecare_core::{MockSurface, OverlayRenderer, OverlayState};
///
/// let mut renderer = OverlayRenderer::new(MockSurface::new());
/// renderer.set_filter(0.5, 0.8)?;
/// assert_eq!(renderer.state(), OverlayState::Visible);
/// renderer.set_enabled(false)?;
/// assert_eq!(renderer.state(), OverlayState::Hidden);
/// # Ok::<(), eyecare_core::OverlayError>(())
/// ```
pub struct OverlayRenderer<S: OverlaySurface> {
    surface: S,
    state: OverlayState,
    warmth: f32,
    brightness: f32,
}

impl<S: OverlaySurface> OverlayRenderer<S> {
    /// Create a hidden renderer over `surface`.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: OverlayState::Hidden,
            warmth: DEFAULT_WARMTH,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Whether the surface is on screen.
    pub fn is_visible(&self) -> bool {
        self.state == OverlayState::Visible
    }

    /// Last warmth and brightness received.
    pub fn filter(&self) -> (f32, f32) {
        (self.warmth, self.brightness)
    }

    /// The layer on screen, if any.
    pub fn current_layer(&self) -> Option<OverlayLayer> {
        self.is_visible()
            .then(|| compute_layer(self.warmth, self.brightness))
    }

    /// The surface backend.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface backend, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Show or hide the overlay.
    ///
    /// # Errors
    ///
    /// Returns the surface error if the overlay could not be shown; the
    /// renderer then stays hidden.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), OverlayError> {
        if enabled {
            self.show()
        } else {
            self.hide();
            Ok(())
        }
    }

    /// Apply a new warmth and brightness, showing the overlay if hidden.
    ///
    /// The values are remembered even if showing fails.
    pub fn set_filter(&mut self, warmth: f32, brightness: f32) -> Result<(), OverlayError> {
        self.warmth = warmth;
        self.brightness = brightness;

        match self.state {
            OverlayState::Hidden => self.show(),
            OverlayState::Visible => {
                let layer = compute_layer(warmth, brightness);
                debug!("repainting overlay: {:?}", layer);
                self.surface.set_content(&layer).inspect_err(|e| {
                    warn!("overlay repaint failed: {}", e);
                })
            }
        }
    }

    /// Hide if visible, otherwise show with the last-used values.
    pub fn toggle(&mut self) -> Result<OverlayState, OverlayError> {
        match self.state {
            OverlayState::Visible => self.hide(),
            OverlayState::Hidden => self.show()?,
        }
        Ok(self.state)
    }

    /// Apply one command from the control surface.
    pub fn apply(&mut self, command: OverlayCommand) -> Result<(), OverlayError> {
        debug!("applying {:?}", command);
        match command {
            OverlayCommand::SetEnabled(enabled) => self.set_enabled(enabled),
            OverlayCommand::SetFilter { warmth, brightness } => self.set_filter(warmth, brightness),
            OverlayCommand::Toggle => self.toggle().map(|_| ()),
        }
    }

    /// Release the surface, if any.
    pub fn shutdown(&mut self) {
        self.hide();
    }

    fn show(&mut self) -> Result<(), OverlayError> {
        if self.is_visible() {
            debug!("overlay already visible");
            return Ok(());
        }

        let layer = compute_layer(self.warmth, self.brightness);
        let result = self
            .surface
            .primary_bounds()
            .and_then(|bounds| self.surface.create(bounds, &layer).map(|()| bounds));

        match result {
            Ok(bounds) => {
                self.state = OverlayState::Visible;
                info!(
                    "overlay shown over {}x{} (warmth={}, brightness={})",
                    bounds.width, bounds.height, self.warmth, self.brightness
                );
                Ok(())
            }
            Err(e) => {
                warn!("could not show overlay: {}", e);
                Err(e)
            }
        }
    }

    fn hide(&mut self) {
        if !self.is_visible() {
            return;
        }
        self.surface.destroy();
        self.state = OverlayState::Hidden;
        info!("overlay hidden");
    }
}

impl<S: OverlaySurface> Drop for OverlayRenderer<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSurface;

    #[test]
    fn test_starts_hidden_without_surface() {
        let surface = MockSurface::new();
        let log = surface.log();
        let renderer = OverlayRenderer::new(surface);

        assert_eq!(renderer.state(), OverlayState::Hidden);
        assert!(renderer.current_layer().is_none());
        assert_eq!(log.lock().unwrap().created, 0);
    }

    #[test]
    fn test_update_keeps_surface_identity() {
        let surface = MockSurface::new();
        let log = surface.log();
        let mut renderer = OverlayRenderer::new(surface);

        renderer.set_filter(0.2, 0.9).unwrap();
        renderer.set_filter(0.4, 0.8).unwrap();
        renderer.set_filter(0.6, 0.7).unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.created, 1);
        assert_eq!(log.live, 1);
        assert_eq!(log.painted.len(), 3);
        assert_eq!(log.current(), Some(&compute_layer(0.6, 0.7)));
    }

    #[test]
    fn test_surface_covers_primary_display() {
        let surface = MockSurface::new();
        let log = surface.log();
        let mut renderer = OverlayRenderer::new(surface);

        renderer.set_enabled(true).unwrap();
        let bounds = log.lock().unwrap().bounds.unwrap();
        assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (0, 0, 1920, 1080));
    }

    #[test]
    fn test_enable_uses_defaults_first_time() {
        let mut renderer = OverlayRenderer::new(MockSurface::new());
        renderer.set_enabled(true).unwrap();
        assert_eq!(
            renderer.current_layer(),
            Some(compute_layer(DEFAULT_WARMTH, DEFAULT_BRIGHTNESS))
        );
    }

    #[test]
    fn test_no_display_leaves_hidden() {
        let mut renderer = OverlayRenderer::new(MockSurface::without_display());

        let err = renderer.set_enabled(true).unwrap_err();
        assert!(matches!(err, OverlayError::NoDisplay));
        assert_eq!(renderer.state(), OverlayState::Hidden);
    }

    #[test]
    fn test_create_failure_remembers_values() {
        let mut renderer = OverlayRenderer::new(MockSurface::failing());

        assert!(renderer.set_filter(0.8, 0.5).is_err());
        assert_eq!(renderer.state(), OverlayState::Hidden);
        assert_eq!(renderer.filter(), (0.8, 0.5));
    }

    #[test]
    fn test_disable_when_hidden_is_noop() {
        let surface = MockSurface::new();
        let log = surface.log();
        let mut renderer = OverlayRenderer::new(surface);

        renderer.set_enabled(false).unwrap();
        assert_eq!(log.lock().unwrap().destroyed, 0);
    }

    #[test]
    fn test_drop_releases_surface() {
        let surface = MockSurface::new();
        let log = surface.log();
        {
            let mut renderer = OverlayRenderer::new(surface);
            renderer.set_enabled(true).unwrap();
            assert_eq!(log.lock().unwrap().live, 1);
        }
        let log = log.lock().unwrap();
        assert_eq!(log.live, 0);
        assert_eq!(log.destroyed, 1);
    }

    #[test]
    fn test_apply_toggle_command() {
        let mut renderer = OverlayRenderer::new(MockSurface::new());
        renderer.apply(OverlayCommand::Toggle).unwrap();
        assert!(renderer.is_visible());
        renderer.apply(OverlayCommand::Toggle).unwrap();
        assert!(!renderer.is_visible());
    }
}
