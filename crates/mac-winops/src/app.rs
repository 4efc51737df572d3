//! Frontmost application lookups through NSWorkspace.

use objc2_app_kit::{NSRunningApplication, NSWorkspace};

/// PID of the frontmost application, if any.
pub(crate) fn frontmost_pid() -> Option<i32> {
    let ws = NSWorkspace::sharedWorkspace();
    ws.frontmostApplication().map(|app| app.processIdentifier())
}

/// Bundle identifier of the running application with `pid`.
pub(crate) fn bundle_id(pid: i32) -> Option<String> {
    // SAFETY: read-only lookup by pid.
    let app = unsafe { NSRunningApplication::runningApplicationWithProcessIdentifier(pid) }?;
    app.bundleIdentifier().map(|s| s.to_string())
}
