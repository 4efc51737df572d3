//! macOS event tap (CoreGraphics) integration for hotkey interception.
//!
//! The tap callback returns `CallbackResult::Drop` for intercepted events;
//! `core-graphics` maps that to a NULL `CGEventRef`, which is the only return
//! CoreGraphics treats as "do not deliver".

use std::{
    ffi::c_void,
    ptr,
    sync::{
        Arc,
        atomic::{AtomicPtr, Ordering},
    },
};

use core_foundation::{
    base::TCFType,
    mach_port::CFMachPortRef,
    runloop::{CFRunLoop, kCFRunLoopCommonModes},
};
use core_graphics::event::{self as cge, CallbackResult};
use crossbeam_channel::Sender;
use mac_keycode::{Key, modifiers_from_cg_flags};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::{CallbackCtx, Error, EventKind, Result};

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGEventTapEnable(tap: CFMachPortRef, enable: bool);
}

// Subset of CGEventField constants used by this module.
const FIELD_KEYBOARD_EVENT_AUTOREPEAT: u32 = 8;
const FIELD_KEYBOARD_EVENT_KEYCODE: u32 = 9;

/// Shared handle to stop the tap's run loop from other threads.
pub(crate) struct SysControl {
    /// Run loop of the tap thread, once it is running.
    rl: Mutex<Option<CFRunLoop>>,
}

impl SysControl {
    /// A handle with no run loop attached yet.
    pub(crate) fn new() -> Self {
        Self {
            rl: Mutex::new(None),
        }
    }

    /// Record the tap thread's run loop.
    fn set_rl(&self, rl: CFRunLoop) {
        *self.rl.lock() = Some(rl);
    }

    /// Stop the recorded run loop, if any.
    pub(crate) fn stop(&self) {
        if let Some(rl) = self.rl.lock().take() {
            rl.stop();
        }
    }
}

/// Install the tap on the current thread and run its CFRunLoop until
/// [`SysControl::stop`]. Readiness, or the startup error, is reported on `ready`.
pub(crate) fn run_event_loop(
    ctx: CallbackCtx,
    ready: Sender<Result<()>>,
    ctrl: Arc<SysControl>,
) -> Result<()> {
    // Shared with the callback so it can re-enable a tap the OS disabled.
    let tap_port_ptr: Arc<AtomicPtr<c_void>> = Arc::new(AtomicPtr::new(ptr::null_mut()));

    debug!("creating event tap");
    let tap_port_cb = tap_port_ptr.clone();
    let tap = match cge::CGEventTap::new(
        cge::CGEventTapLocation::HID,
        cge::CGEventTapPlacement::HeadInsertEventTap,
        cge::CGEventTapOptions::Default,
        vec![cge::CGEventType::KeyDown, cge::CGEventType::KeyUp],
        move |_proxy, etype, event| match etype {
            cge::CGEventType::KeyDown | cge::CGEventType::KeyUp => {
                let keycode = event.get_integer_value_field(FIELD_KEYBOARD_EVENT_KEYCODE) as u16;
                let Some(key) = Key::from_scancode(keycode) else {
                    return CallbackResult::Keep;
                };
                let flags = event.get_flags().bits();
                let mods = modifiers_from_cg_flags(flags);
                let kind = if matches!(etype, cge::CGEventType::KeyDown) {
                    EventKind::KeyDown
                } else {
                    EventKind::KeyUp
                };
                let repeat = kind == EventKind::KeyDown
                    && event.get_integer_value_field(FIELD_KEYBOARD_EVENT_AUTOREPEAT) != 0;
                trace!(scancode = keycode, flags, ?key, ?mods, ?kind, repeat, "tap event");

                let (emit, intercept) = ctx.inner.lock().handle(key, &mods, kind, repeat);
                if let Some(ev) = emit
                    && ctx.tx.send(ev).is_err()
                {
                    trace!("hotkey receiver dropped");
                }
                if intercept {
                    CallbackResult::Drop
                } else {
                    CallbackResult::Keep
                }
            }
            cge::CGEventType::TapDisabledByTimeout | cge::CGEventType::TapDisabledByUserInput => {
                let p = tap_port_cb.load(Ordering::SeqCst) as CFMachPortRef;
                if !p.is_null() {
                    warn!("event tap disabled by OS, re-enabling");
                    // SAFETY: p is the tap's own mach port, kept alive by `tap`
                    // for as long as the run loop dispatches to this callback.
                    unsafe { CGEventTapEnable(p, true) };
                }
                CallbackResult::Keep
            }
            _ => CallbackResult::Keep,
        },
    ) {
        Ok(t) => t,
        Err(_) => {
            warn!("event tap creation failed");
            let _ = ready.send(Err(Error::EventTapStart));
            return Err(Error::EventTapStart);
        }
    };

    tap_port_ptr.store(
        tap.mach_port().as_concrete_TypeRef() as *mut c_void,
        Ordering::SeqCst,
    );

    let source = match tap.mach_port().create_runloop_source(0) {
        Ok(s) => s,
        Err(_) => {
            warn!("run loop source creation failed");
            let _ = ready.send(Err(Error::EventTapStart));
            return Err(Error::EventTapStart);
        }
    };

    let rl = CFRunLoop::get_current();
    ctrl.set_rl(rl.clone());
    // SAFETY: reading an immutable CoreFoundation constant.
    let mode = unsafe { kCFRunLoopCommonModes };
    rl.add_source(&source, mode);
    tap.enable();

    let _ = ready.send(Ok(()));
    debug!("event tap running");
    CFRunLoop::run_current();
    debug!("event tap exited");
    Ok(())
}
