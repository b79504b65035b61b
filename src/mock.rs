//! Mock surface for testing.

use crate::color::OverlayLayer;
use crate::error::OverlayError;
use crate::surface::{Bounds, OverlaySurface};
use log::debug;
use std::sync::{Arc, Mutex};

/// What a [`MockSurface`] has been asked to do so far.
#[derive(Debug, Clone, Default)]
pub struct SurfaceLog {
    /// Surfaces currently alive (0 or 1 for a well-behaved renderer).
    pub live: usize,
    /// Total `create` calls that succeeded.
    pub created: usize,
    /// Total `destroy` calls that released a surface.
    pub destroyed: usize,
    /// Bounds of the last created surface.
    pub bounds: Option<Bounds>,
    /// Every layer painted, in order, including the initial one.
    pub painted: Vec<OverlayLayer>,
}

impl SurfaceLog {
    /// The layer currently on screen, if a surface is alive.
    pub fn current(&self) -> Option<&OverlayLayer> {
        if self.live > 0 { self.painted.last() } else { None }
    }
}

/// A mock overlay surface for testing.
///
/// This allows testing the renderer without a display. The log is shared, so
/// a handle kept by the test can inspect the surface after it has been moved
/// into the renderer.
///
/// # Example
///
/// ```
/// use eyecare_core::{MockSurface, OverlayRenderer};
///
/// let surface = MockSurface::new();
/// let log = surface.log();
/// let mut renderer = OverlayRenderer::new(surface);
/// renderer.set_enabled(true).unwrap();
/// assert_eq!(log.lock().unwrap().live, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockSurface {
    log: Arc<Mutex<SurfaceLog>>,
    bounds: Option<Bounds>,
    fail_create: bool,
}

impl MockSurface {
    /// Create a mock with a 1920x1080 primary display.
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(SurfaceLog::default())),
            bounds: Some(Bounds::from_size(1920, 1080)),
            fail_create: false,
        }
    }

    /// Create a mock that reports no display at all.
    pub fn without_display() -> Self {
        Self {
            bounds: None,
            ..Self::new()
        }
    }

    /// Create a mock whose `create` always fails.
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::new()
        }
    }

    /// Shared handle to the call log.
    pub fn log(&self) -> Arc<Mutex<SurfaceLog>> {
        Arc::clone(&self.log)
    }

    /// Snapshot of the call log.
    pub fn snapshot(&self) -> SurfaceLog {
        self.log.lock().unwrap().clone()
    }
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySurface for MockSurface {
    fn primary_bounds(&self) -> Result<Bounds, OverlayError> {
        self.bounds.ok_or(OverlayError::NoDisplay)
    }

    fn create(&mut self, bounds: Bounds, layer: &OverlayLayer) -> Result<(), OverlayError> {
        if self.fail_create {
            return Err(OverlayError::SurfaceCreate("mock refused".to_string()));
        }
        let mut log = self.log.lock().unwrap();
        log.live += 1;
        log.created += 1;
        log.bounds = Some(bounds);
        log.painted.push(*layer);
        debug!("mock surface created at {:?}", bounds);
        Ok(())
    }

    fn set_content(&mut self, layer: &OverlayLayer) -> Result<(), OverlayError> {
        let mut log = self.log.lock().unwrap();
        if log.live == 0 {
            return Err(OverlayError::SurfaceUpdate("no surface".to_string()));
        }
        log.painted.push(*layer);
        Ok(())
    }

    fn destroy(&mut self) {
        let mut log = self.log.lock().unwrap();
        if log.live > 0 {
            log.live -= 1;
            log.destroyed += 1;
            debug!("mock surface destroyed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::OverlayRenderer;

    #[test]
    fn test_clones_share_one_log() {
        let surface = MockSurface::new();
        let observer = surface.clone();
        let mut renderer = OverlayRenderer::new(surface);

        renderer.set_filter(0.5, 0.8).unwrap();
        renderer.set_enabled(false).unwrap();

        let log = observer.snapshot();
        assert_eq!((log.created, log.destroyed, log.live), (1, 1, 0));
        assert_eq!(log.bounds, Some(Bounds::from_size(1920, 1080)));
        assert!(log.current().is_none());
    }
}
