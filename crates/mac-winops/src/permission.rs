use presize_engine::Permission;

/// Accessibility permission, as reported by `AXIsProcessTrusted`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AxPermission;

impl Permission for AxPermission {
    fn has_permission(&self) -> bool {
        permissions::accessibility_ok()
    }
}
