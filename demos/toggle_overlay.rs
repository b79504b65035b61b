//! Example: drive the overlay from a control panel on another thread.
//!
//! Run with: `RUST_LOG=debug cargo run --example toggle_overlay`

use eyecare_core::{
    ControlPanel, MockSurface, OverlayError, OverlayRenderer, Preset, command_channel,
};

fn main() -> Result<(), OverlayError> {
    // Initialize logging (optional)
    env_logger::init();

    let (tx, rx) = command_channel();
    let surface = MockSurface::new();
    // Clones share one call log
    let observer = surface.clone();

    // The renderer owns the surface on its own thread
    let renderer = std::thread::spawn(move || {
        let mut renderer = OverlayRenderer::new(surface);
        rx.run(&mut renderer);
    });

    let mut panel = ControlPanel::new(tx);

    println!("Applying preset {}...", Preset::Reading);
    panel.apply_preset(Preset::Reading);
    println!(
        "Current state: {}K, brightness={}%",
        panel.color_temperature(),
        panel.brightness_percent()
    );

    println!("Night mode");
    panel.apply_night();

    println!("Toggling overlay off and on again");
    panel.toggle_overlay_shortcut();
    panel.toggle_overlay_shortcut();

    // Dropping the panel closes the channel and releases the surface
    drop(panel);
    if renderer.join().is_err() {
        eprintln!("renderer thread panicked");
    }

    let log = observer.snapshot();
    println!(
        "Surfaces created={}, destroyed={}, repaints={}",
        log.created,
        log.destroyed,
        log.painted.len()
    );
    if let Some(layer) = log.painted.last() {
        println!("Last tint {}, darkness {}", layer.tint.to_css(), layer.darkness.to_css());
    }

    Ok(())
}
