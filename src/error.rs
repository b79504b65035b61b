//! Error types for the overlay engine.

/// Errors that can occur while driving the overlay.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// No display could be found to cover.
    #[error("No display available for the overlay")]
    NoDisplay,

    /// The host refused to create the overlay surface.
    #[error("Failed to create overlay surface: {0}")]
    SurfaceCreate(String),

    /// The host failed to repaint the overlay surface.
    #[error("Failed to update overlay surface: {0}")]
    SurfaceUpdate(String),

    /// The renderer end of the command channel is gone.
    #[error("Overlay renderer is no longer listening")]
    ChannelClosed,

    /// A schedule time was not in `HH:MM` form.
    #[error("Invalid time of day '{0}' (expected HH:MM)")]
    InvalidTime(String),
}
