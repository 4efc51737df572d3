//! Simple permission checks for presize.
//!
//! Placement needs Accessibility (to read and write window frames) and hotkey
//! capture needs Input Monitoring (to run a keyboard event tap). This crate
//! only reports status; prompting and guiding the user to System Settings is
//! left to the host.
//!
//! All calls are fast and side-effect free. On platforms other than macOS
//! every permission reports as missing.
#![warn(missing_docs)]

#[cfg(target_os = "macos")]
#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn CGPreflightListenEventAccess() -> bool;
}

/// Check if the process is trusted for Accessibility.
#[cfg(target_os = "macos")]
pub fn accessibility_ok() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Check if the process is trusted for Accessibility.
#[cfg(not(target_os = "macos"))]
pub fn accessibility_ok() -> bool {
    false
}

/// Check if the application has the "Input Monitoring" permission.
///
/// Returns `true` when the process is allowed to listen for keyboard events
/// (CGEvent tap), and `false` otherwise.
#[cfg(target_os = "macos")]
pub fn input_monitoring_ok() -> bool {
    unsafe { CGPreflightListenEventAccess() }
}

/// Check if the application has the "Input Monitoring" permission.
#[cfg(not(target_os = "macos"))]
pub fn input_monitoring_ok() -> bool {
    false
}

/// Current permission status for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionsStatus {
    /// Accessibility (AX) permission; `true` if granted.
    pub accessibility_ok: bool,
    /// Input Monitoring permission; `true` if granted.
    pub input_ok: bool,
}

impl PermissionsStatus {
    /// Names of the permissions that are not granted, in System Settings order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !self.accessibility_ok {
            out.push("Accessibility");
        }
        if !self.input_ok {
            out.push("Input Monitoring");
        }
        out
    }

    /// True if everything presize needs is granted.
    pub fn all_granted(&self) -> bool {
        self.accessibility_ok && self.input_ok
    }
}

/// Query both Accessibility and Input Monitoring permissions.
pub fn check_permissions() -> PermissionsStatus {
    PermissionsStatus {
        accessibility_ok: accessibility_ok(),
        input_ok: input_monitoring_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_denied_permissions() {
        let st = PermissionsStatus {
            accessibility_ok: false,
            input_ok: true,
        };
        assert_eq!(st.missing(), vec!["Accessibility"]);
        assert!(!st.all_granted());

        let st = PermissionsStatus {
            accessibility_ok: true,
            input_ok: true,
        };
        assert!(st.missing().is_empty());
        assert!(st.all_granted());
    }
}
