//! One-way command channel from the control surface to the renderer.

use crate::error::OverlayError;
use crate::renderer::OverlayRenderer;
use crate::surface::OverlaySurface;

use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// A fire-and-forget message to the overlay renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayCommand {
    /// Show or hide the overlay.
    SetEnabled(bool),
    /// Apply new values, showing the overlay if hidden.
    SetFilter {
        /// Warmth in `[0, 1]`.
        warmth: f32,
        /// Brightness in `[0, 1]`.
        brightness: f32,
    },
    /// Flip visibility, keeping the last-used values.
    Toggle,
}

/// Create a connected sender/receiver pair.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::channel();
    (CommandSender { tx }, CommandReceiver { rx })
}

/// Sending end, held by the control surface.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<OverlayCommand>,
}

impl CommandSender {
    /// Send a command without waiting for it to be applied.
    ///
    /// A send to a renderer that has gone away is logged and dropped.
    pub fn send(&self, command: OverlayCommand) {
        if let Err(e) = self.try_send(command) {
            warn!("dropping {:?}: {}", command, e);
        }
    }

    /// Send a command, reporting a closed channel.
    pub fn try_send(&self, command: OverlayCommand) -> Result<(), OverlayError> {
        self.tx
            .send(command)
            .map_err(|_| OverlayError::ChannelClosed)
    }
}

/// Receiving end, held by whoever owns the renderer.
#[derive(Debug)]
pub struct CommandReceiver {
    rx: Receiver<OverlayCommand>,
}

impl CommandReceiver {
    /// Take every pending command, merging runs of `SetFilter` into their
    /// last value.
    pub fn drain(&self) -> Vec<OverlayCommand> {
        let mut pending = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(command) => pending.push(command),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        coalesce(pending)
    }

    /// Apply every pending command to `renderer`, in order.
    ///
    /// Failures do not stop later commands; they are returned so the caller
    /// can report them.
    pub fn pump<S: OverlaySurface>(&self, renderer: &mut OverlayRenderer<S>) -> Vec<OverlayError> {
        self.drain()
            .into_iter()
            .filter_map(|command| renderer.apply(command).err())
            .collect()
    }

    /// Apply commands as they arrive until every sender is dropped, then
    /// release the surface.
    pub fn run<S: OverlaySurface>(self, renderer: &mut OverlayRenderer<S>) {
        while let Ok(first) = self.rx.recv() {
            let mut batch = vec![first];
            batch.extend(self.rx.try_iter());
            for command in coalesce(batch) {
                if let Err(e) = renderer.apply(command) {
                    warn!("overlay command {:?} failed: {}", command, e);
                }
            }
        }
        debug!("command channel closed, shutting renderer down");
        renderer.shutdown();
    }
}

/// Merge consecutive `SetFilter` commands, keeping the last of each run.
pub fn coalesce(commands: Vec<OverlayCommand>) -> Vec<OverlayCommand> {
    let mut merged: Vec<OverlayCommand> = Vec::with_capacity(commands.len());
    for command in commands {
        if let (Some(OverlayCommand::SetFilter { .. }), OverlayCommand::SetFilter { .. }) =
            (merged.last(), command)
        {
            merged.pop();
        }
        merged.push(command);
    }
    merged
}
