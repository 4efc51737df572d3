//! Single-consumer request queue between trigger sources and the placer.
//!
//! Hotkey callbacks, menus and the CLI only ever post [`Request`]s. One thread
//! owns the [`Placer`] and drains the queue, so placements never overlap.

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tracing::{debug, trace};

use crate::{placer::Placer, port::WindowGeometry, preset::Preset};

/// A message for the placement loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Apply a preset to the focused window.
    Apply(Preset),
    /// Stop the loop.
    Shutdown,
}

/// Posting side of the queue. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct RequestSender {
    /// Channel sender.
    tx: Sender<Request>,
}

impl RequestSender {
    /// Ask for `preset` to be applied. Returns `false` if the loop is gone.
    pub fn apply(&self, preset: Preset) -> bool {
        self.tx.send(Request::Apply(preset)).is_ok()
    }

    /// Ask the loop to stop. Returns `false` if the loop is gone.
    pub fn shutdown(&self) -> bool {
        self.tx.send(Request::Shutdown).is_ok()
    }
}

/// Consuming side of the queue.
#[derive(Debug)]
pub struct RequestQueue {
    /// Channel receiver.
    rx: Receiver<Request>,
}

impl RequestQueue {
    /// Create a connected sender/queue pair.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (RequestSender, Self) {
        let (tx, rx) = unbounded();
        (RequestSender { tx }, Self { rx })
    }

    /// Process requests on the calling thread until [`Request::Shutdown`]
    /// arrives or every sender is dropped. Returns the number of presets applied.
    pub fn run<W: WindowGeometry>(&self, placer: &Placer<W>) -> usize {
        let mut applied = 0;
        while let Ok(req) = self.rx.recv() {
            match req {
                Request::Apply(preset) => {
                    trace!(%preset, "request");
                    placer.apply_preset(preset);
                    applied += 1;
                }
                Request::Shutdown => {
                    debug!("request loop shutdown");
                    break;
                }
            }
        }
        applied
    }

    /// Process whatever is pending without blocking. Stops early at
    /// [`Request::Shutdown`]. Returns the number of presets applied.
    pub fn drain<W: WindowGeometry>(&self, placer: &Placer<W>) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(Request::Apply(preset)) => {
                    placer.apply_preset(preset);
                    applied += 1;
                }
                Ok(Request::Shutdown) | Err(TryRecvError::Empty | TryRecvError::Disconnected) => {
                    break;
                }
            }
        }
        applied
    }
}
