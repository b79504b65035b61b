//! Overlay surface backed by an iced window.

use eyecare_core::{Bounds, OverlayError, OverlayLayer, OverlaySurface, primary_display_bounds};
use iced::{Point, Size, Task, window};
use log::debug;

/// Shows the overlay as a borderless, transparent, always-on-top iced window.
///
/// iced creates and closes windows through tasks, so the backend queues them
/// and the application runs them after each batch of commands.
///
/// Where the OS query for the primary display is unavailable, the monitor
/// size iced reported for the control window is used instead.
#[derive(Default)]
pub struct IcedSurface {
    window: Option<window::Id>,
    owner: Option<window::Id>,
    layer: Option<OverlayLayer>,
    monitor: Option<Bounds>,
    pending: Vec<Task<crate::Message>>,
}

impl IcedSurface {
    /// A surface that hands focus back to `owner` after opening.
    pub fn new(owner: window::Id) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    /// Remember the size of the monitor the control window is on.
    pub fn set_monitor_size(&mut self, size: Size) {
        let bounds = Bounds::from_size(size.width.round() as u32, size.height.round() as u32);
        debug!("monitor size {}x{}", bounds.width, bounds.height);
        self.monitor = (!bounds.is_empty()).then_some(bounds);
    }

    /// The overlay window, if open.
    pub fn window(&self) -> Option<window::Id> {
        self.window
    }

    /// The layer the overlay window should paint.
    pub fn layer(&self) -> Option<OverlayLayer> {
        self.layer
    }

    /// Take the window tasks queued since the last call.
    pub fn take_tasks(&mut self) -> Task<crate::Message> {
        Task::batch(self.pending.drain(..))
    }
}

impl OverlaySurface for IcedSurface {
    fn primary_bounds(&self) -> Result<Bounds, OverlayError> {
        primary_display_bounds().or_else(|e| self.monitor.ok_or(e))
    }

    fn create(&mut self, bounds: Bounds, layer: &OverlayLayer) -> Result<(), OverlayError> {
        if bounds.is_empty() {
            return Err(OverlayError::SurfaceCreate(format!(
                "empty bounds {}x{}",
                bounds.width, bounds.height
            )));
        }

        let (id, open) = window::open(overlay_settings(bounds));
        debug!("opening overlay window {:?}", id);
        let mut task = open.then(move |id| window::enable_mouse_passthrough(id));
        if let Some(owner) = self.owner {
            task = task.chain(window::gain_focus(owner));
        }
        self.pending.push(task);
        self.window = Some(id);
        self.layer = Some(*layer);
        Ok(())
    }

    fn set_content(&mut self, layer: &OverlayLayer) -> Result<(), OverlayError> {
        if self.window.is_none() {
            return Err(OverlayError::SurfaceUpdate("overlay window is closed".to_string()));
        }
        self.layer = Some(*layer);
        Ok(())
    }

    fn destroy(&mut self) {
        if let Some(id) = self.window.take() {
            debug!("closing overlay window {:?}", id);
            self.pending.push(window::close(id));
        }
        self.layer = None;
    }
}

// iced has no option for a window that refuses focus. Focus goes back to the
// owner right after opening and every click passes through.
fn overlay_settings(bounds: Bounds) -> window::Settings {
    window::Settings {
        size: Size::new(bounds.width as f32, bounds.height as f32),
        position: window::Position::Specific(Point::new(bounds.x as f32, bounds.y as f32)),
        resizable: false,
        decorations: false,
        transparent: true,
        level: window::Level::AlwaysOnTop,
        exit_on_close_request: false,
        #[cfg(target_os = "windows")]
        platform_specific: window::settings::PlatformSpecific {
            skip_taskbar: true,
            ..Default::default()
        },
        ..window::Settings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_size_backs_primary_bounds() {
        let mut surface = IcedSurface::default();
        surface.set_monitor_size(Size::new(2560.0, 1440.0));

        let bounds = surface.primary_bounds().unwrap();
        assert!(!bounds.is_empty());
        #[cfg(not(windows))]
        assert_eq!(bounds, Bounds::from_size(2560, 1440));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_no_monitor_reports_no_display() {
        let mut surface = IcedSurface::default();
        assert!(matches!(surface.primary_bounds(), Err(OverlayError::NoDisplay)));

        surface.set_monitor_size(Size::new(0.0, 0.0));
        assert!(matches!(surface.primary_bounds(), Err(OverlayError::NoDisplay)));
    }

    #[test]
    fn test_create_and_destroy_queue_window_tasks() {
        let mut surface = IcedSurface::default();
        let layer = eyecare_core::compute_layer(0.3, 1.0);

        surface.create(Bounds::from_size(800, 600), &layer).unwrap();
        assert!(surface.window().is_some());
        assert_eq!(surface.layer(), Some(layer));
        assert_eq!(surface.pending.len(), 1);

        surface.destroy();
        assert!(surface.window().is_none());
        assert!(surface.layer().is_none());
        assert_eq!(surface.pending.len(), 2);
    }
}
