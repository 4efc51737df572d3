//! Daemon wiring: hotkey tap → dispatch thread → request queue → placer.
//!
//! The placer lives on the main thread, which is where AppKit screen queries
//! must happen. The tap runs on its own thread inside [`mac_hotkey::Manager`];
//! a small dispatch thread turns matched chords into [`Request`]s.
//!
//! [`Request`]: presize_engine::Request

use std::{collections::HashMap, sync::Arc, thread};

use crossbeam_channel::Receiver;
use exclusions::ExclusionStore;
use mac_hotkey::{Event, EventKind, Manager};
use mac_winops::{AxPermission, AxWindowPort, ScreenSource};
use presize_engine::{Context, Outcome, Placer, Preset, RequestQueue, RequestSender};
use tracing::{debug, info, trace, warn};

use crate::{
    bindings::Bindings,
    config::Config,
    error::{Error, Result},
};

/// The production placer: AX window port, NSScreen displays, the process's
/// Accessibility grant and the on-disk exclusion list.
pub fn build_placer(exclusions: Arc<ExclusionStore>) -> Placer<AxWindowPort> {
    Placer::new(Context::new(
        AxWindowPort,
        Arc::new(ScreenSource),
        Arc::new(AxPermission),
        exclusions,
    ))
}

/// Register every binding, returning the id → preset routing table.
fn register_all(hotkeys: &Manager, bindings: &Bindings) -> Result<HashMap<u32, Preset>> {
    let mut routes = HashMap::new();
    for (preset, chord) in bindings.iter() {
        let id = hotkeys.register(chord.clone())?;
        debug!(%preset, %chord, id, "bound");
        routes.insert(id, preset);
    }
    Ok(routes)
}

/// Drop every registration so nothing more is intercepted.
fn release_all(hotkeys: &Manager, routes: &HashMap<u32, Preset>) {
    for (&id, preset) in routes {
        if let Err(e) = hotkeys.unregister(id) {
            debug!(%preset, id, error = %e, "unregister failed");
        }
    }
}

/// Forward key-downs of bound chords to the placement loop until either side
/// hangs up. Returns the number of requests posted.
pub fn dispatch(events: &Receiver<Event>, routes: &HashMap<u32, Preset>, tx: &RequestSender) -> usize {
    let mut posted = 0;
    for ev in events {
        if ev.kind != EventKind::KeyDown {
            continue;
        }
        let Some(&preset) = routes.get(&ev.id) else {
            trace!(id = ev.id, "event for unknown registration");
            continue;
        };
        trace!(%preset, chord = %ev.chord, repeat = ev.repeat, "hotkey");
        if !tx.apply(preset) {
            break;
        }
        posted += 1;
    }
    posted
}

/// Run until interrupted.
pub fn run(cfg: &Config) -> Result<()> {
    let store = Arc::new(ExclusionStore::load(&cfg.exclusions)?);
    let status = permissions::check_permissions();
    if !status.accessibility_ok {
        warn!("Accessibility not granted; hotkeys will be ignored until it is");
    }

    let placer = build_placer(store);
    let (tx, queue) = RequestQueue::new();

    let (mut hotkeys, events) = Manager::new();
    let routes = register_all(&hotkeys, &cfg.bindings)?;
    hotkeys.start()?;

    let interrupt = tx.clone();
    ctrlc::set_handler(move || {
        debug!("interrupt");
        interrupt.shutdown();
    })?;

    let forward = tx.clone();
    let table = routes.clone();
    let dispatcher = thread::Builder::new()
        .name("presize-dispatch".into())
        .spawn(move || dispatch(&events, &table, &forward))?;
    drop(tx);

    info!(bindings = cfg.bindings.iter().count(), "presize running");
    let applied = queue.run(&placer);

    release_all(&hotkeys, &routes);
    hotkeys.stop();
    drop(hotkeys);
    match dispatcher.join() {
        Ok(posted) => debug!(posted, applied, "stopped"),
        Err(_) => warn!("dispatch thread panicked"),
    }
    Ok(())
}

/// Apply one preset to the frontmost window and report what happened.
pub fn apply_once(cfg: &Config, preset: Preset) -> Result<Outcome> {
    let store = Arc::new(ExclusionStore::load(&cfg.exclusions)?);
    build_placer(store).try_apply(preset).map_err(Error::from)
}
