//! Global hotkey capture for macOS.
//!
//! A [`Manager`] owns a table of registered [`Chord`]s. Once started, a
//! CoreGraphics event tap runs on its own thread and CFRunLoop; every keyboard
//! event is matched against the table and classified by [`policy::classify`].
//! Matched presses are swallowed and delivered as [`Event`]s over a crossbeam
//! channel.
//!
//! Only the table and matching logic are platform independent; `start` fails
//! with [`Error::Unsupported`] off macOS.
#![warn(missing_docs)]

mod error;
pub mod policy;
#[cfg(target_os = "macos")]
mod sys;

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::Arc,
    thread::JoinHandle,
};

use crossbeam_channel::{Receiver, Sender, unbounded};
pub use error::{Error, Result};
use mac_keycode::{Chord, Key, Modifier};
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Key pressed, including OS auto-repeat.
    KeyDown,
    /// Key released.
    KeyUp,
}

/// A matched hotkey press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Registration id returned by [`Manager::register`].
    pub id: u32,
    /// The registered chord.
    pub chord: Chord,
    /// Press or release.
    pub kind: EventKind,
    /// OS auto-repeat.
    pub repeat: bool,
}

/// Registration table and tap state shared with the tap thread.
#[derive(Debug, Default)]
pub(crate) struct Inner {
    /// Next id to hand out.
    next_id: u32,
    /// Registered chords by id.
    by_id: HashMap<u32, Chord>,
    /// Reverse index for matching.
    by_chord: HashMap<Chord, u32>,
    /// Keys whose press was intercepted and whose release is still pending.
    held: HashSet<Key>,
}

impl Inner {
    /// Add `chord` to the table.
    fn register(&mut self, chord: Chord) -> Result<u32> {
        if self.by_chord.contains_key(&chord) {
            return Err(Error::Duplicate(chord));
        }
        self.next_id += 1;
        let id = self.next_id;
        self.by_chord.insert(chord.clone(), id);
        self.by_id.insert(id, chord);
        Ok(id)
    }

    /// Remove the registration `id`.
    fn unregister(&mut self, id: u32) -> Result<Chord> {
        let chord = self.by_id.remove(&id).ok_or(Error::InvalidId)?;
        self.by_chord.remove(&chord);
        Ok(chord)
    }

    /// Find the registration whose chord is exactly `key` plus `mods`.
    pub(crate) fn match_event(&self, key: Key, mods: &BTreeSet<Modifier>) -> Option<(u32, &Chord)> {
        let wanted = Chord {
            modifiers: mods.clone(),
            key,
        };
        let (chord, id) = self.by_chord.get_key_value(&wanted)?;
        Some((*id, chord))
    }

    /// Decide what to do with one keyboard event, updating held-key state.
    /// Returns the event to emit, if any, and whether to swallow the input.
    pub(crate) fn handle(
        &mut self,
        key: Key,
        mods: &BTreeSet<Modifier>,
        kind: EventKind,
        repeat: bool,
    ) -> (Option<Event>, bool) {
        let matched = self.match_event(key, mods).map(|(id, _)| id);
        let mut d = policy::classify(matched, kind);

        match kind {
            EventKind::KeyDown if d.intercept => {
                self.held.insert(key);
            }
            // Modifiers are often released before the key; the release still
            // belongs to the swallowed press.
            EventKind::KeyUp => {
                if self.held.remove(&key) {
                    d.intercept = true;
                }
            }
            EventKind::KeyDown => {}
        }

        let event = if d.emit {
            matched.and_then(|id| {
                self.by_id.get(&id).map(|chord| Event {
                    id,
                    chord: chord.clone(),
                    kind,
                    repeat,
                })
            })
        } else {
            None
        };
        (event, d.intercept)
    }
}

/// State handed to the tap callback.
#[derive(Clone)]
pub(crate) struct CallbackCtx {
    /// Shared registration table.
    pub(crate) inner: Arc<Mutex<Inner>>,
    /// Event sink.
    pub(crate) tx: Sender<Event>,
}

/// Owner of hotkey registrations and the event-tap thread.
pub struct Manager {
    /// Shared with the tap callback.
    ctx: CallbackCtx,
    /// Handle used to stop the tap's run loop.
    #[cfg(target_os = "macos")]
    ctrl: Arc<sys::SysControl>,
    /// The tap thread, while running.
    thread: Option<JoinHandle<()>>,
}

impl Manager {
    /// Create a stopped manager and the receiver its events arrive on.
    pub fn new() -> (Self, Receiver<Event>) {
        let (tx, rx) = unbounded();
        let mgr = Self {
            ctx: CallbackCtx {
                inner: Arc::new(Mutex::new(Inner::default())),
                tx,
            },
            #[cfg(target_os = "macos")]
            ctrl: Arc::new(sys::SysControl::new()),
            thread: None,
        };
        (mgr, rx)
    }

    /// Register `chord`. Fails with [`Error::Duplicate`] if it is already bound.
    pub fn register(&self, chord: Chord) -> Result<u32> {
        let id = self.ctx.inner.lock().register(chord.clone())?;
        debug!(id, %chord, "hotkey registered");
        Ok(id)
    }

    /// Remove a registration.
    pub fn unregister(&self, id: u32) -> Result<()> {
        let chord = self.ctx.inner.lock().unregister(id)?;
        debug!(id, %chord, "hotkey unregistered");
        Ok(())
    }

    /// Start the event tap. Requires Input Monitoring permission. Returns once
    /// the tap is installed, or with the error that prevented it.
    pub fn start(&mut self) -> Result<()> {
        if self.thread.is_some() {
            return Ok(());
        }
        if !permissions::input_monitoring_ok() {
            return Err(Error::PermissionDenied("Input Monitoring"));
        }
        self.spawn_tap()
    }

    /// Spawn the tap thread and wait for it to report readiness.
    #[cfg(target_os = "macos")]
    fn spawn_tap(&mut self) -> Result<()> {
        use std::thread;

        use tracing::warn;

        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);
        let ctx = self.ctx.clone();
        let ctrl = self.ctrl.clone();
        let handle = thread::Builder::new()
            .name("presize-hotkeys".into())
            .spawn(move || {
                if let Err(e) = sys::run_event_loop(ctx, ready_tx, ctrl) {
                    warn!(error = %e, "event tap exited with error");
                }
            })
            .map_err(|e| Error::OsError(e.to_string()))?;
        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.thread = Some(handle);
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(Error::EventTapStart)
            }
        }
    }

    /// Hotkey capture needs CoreGraphics.
    #[cfg(not(target_os = "macos"))]
    fn spawn_tap(&mut self) -> Result<()> {
        Err(Error::Unsupported)
    }

    /// Stop the tap thread if it is running and wait for it to exit.
    pub fn stop(&mut self) {
        let Some(handle) = self.thread.take() else {
            return;
        };
        #[cfg(target_os = "macos")]
        self.ctrl.stop();
        if handle.join().is_err() {
            trace!("tap thread panicked");
        }
        debug!("hotkey capture stopped");
    }

    /// Feed one event through the matcher as the tap would, without an OS tap.
    /// Returns whether the event would be swallowed.
    pub fn inject(&self, key: Key, mods: &BTreeSet<Modifier>, kind: EventKind, repeat: bool) -> bool {
        let (event, intercept) = self.ctx.inner.lock().handle(key, mods, kind, repeat);
        if let Some(ev) = event {
            let _ = self.ctx.tx.send(ev);
        }
        intercept
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        self.stop();
    }
}
