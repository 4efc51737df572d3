//! Accessibility (AX) FFI and element helpers.

use std::{cell::RefCell, collections::HashMap, ffi::c_void, ptr, thread_local};

use core_foundation::{
    array::{CFArray, CFArrayGetCount, CFArrayGetValueAtIndex},
    base::{CFRelease, CFTypeRef, TCFType},
    string::{CFString, CFStringRef},
};
use objc2_foundation::{NSPoint, NSSize};
use tracing::debug;

use crate::error::{Error, Result};

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXUIElementCreateApplication(pid: i32) -> *mut c_void;
    fn AXUIElementCopyAttributeValue(
        element: *mut c_void,
        attr: CFStringRef,
        value: *mut CFTypeRef,
    ) -> i32;
    fn AXUIElementSetAttributeValue(element: *mut c_void, attr: CFStringRef, value: CFTypeRef)
    -> i32;

    // AXValue helpers for CGPoint/CGSize
    fn AXValueCreate(theType: i32, valuePtr: *const c_void) -> CFTypeRef;
    fn AXValueGetValue(theValue: CFTypeRef, theType: i32, valuePtr: *mut c_void) -> bool;
}

#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    fn CFBooleanGetValue(b: CFTypeRef) -> bool;
    fn CFRetain(cf: CFTypeRef) -> CFTypeRef;
}

// AXValue type constants (per Apple docs)
const K_AX_VALUE_CGPOINT_TYPE: i32 = 1;
const K_AX_VALUE_CGSIZE_TYPE: i32 = 2;

thread_local! {
    static ATTR_STRINGS: RefCell<HashMap<&'static str, CFString>> = RefCell::new(HashMap::new());
}

/// A stable CFStringRef for an attribute name, cached per thread.
///
/// Static strings are not toll-free bridged here; CoreFoundation may treat the
/// input as an NSString and trip pointer authentication on recent macOS.
fn cfstr(name: &'static str) -> CFStringRef {
    ATTR_STRINGS.with(|cell| {
        let mut m = cell.borrow_mut();
        let s = m.entry(name).or_insert_with(|| CFString::new(name));
        s.as_concrete_TypeRef()
    })
}

/// Owned, retained AXUIElement. Released on drop.
#[derive(Debug)]
pub struct AxElem(*mut c_void);

impl AxElem {
    /// Take ownership of a +1 reference (a `Create`/`Copy` result).
    fn from_create(ptr: *mut c_void) -> Option<Self> {
        if ptr.is_null() { None } else { Some(Self(ptr)) }
    }

    /// Retain a borrowed reference, e.g. an element inside a CFArray.
    fn retain_from_borrowed(ptr: *mut c_void) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        // SAFETY: ptr is a live CF object borrowed from its container.
        unsafe { CFRetain(ptr as CFTypeRef) };
        Some(Self(ptr))
    }

    /// The application element for `pid`.
    pub(crate) fn application(pid: i32) -> Result<Self> {
        // SAFETY: plain constructor; returns NULL on failure.
        Self::from_create(unsafe { AXUIElementCreateApplication(pid) }).ok_or(Error::AppElement)
    }

    fn as_ptr(&self) -> *mut c_void {
        self.0
    }

    /// Copy an attribute value. `Ok(None)` when the attribute exists but is empty.
    fn copy_attr(&self, attr: &'static str) -> Result<Option<CFTypeRef>> {
        let mut v: CFTypeRef = ptr::null_mut();
        // SAFETY: element is retained by self; v is an out-pointer.
        let err = unsafe { AXUIElementCopyAttributeValue(self.as_ptr(), cfstr(attr), &mut v) };
        Error::check(err)?;
        Ok((!v.is_null()).then_some(v))
    }

    /// Read a boolean attribute.
    pub(crate) fn bool_attr(&self, attr: &'static str) -> Result<Option<bool>> {
        let Some(v) = self.copy_attr(attr)? else {
            return Ok(None);
        };
        // SAFETY: v is a +1 CFBoolean from copy_attr; released right after.
        let b = unsafe { CFBooleanGetValue(v) };
        unsafe { CFRelease(v) };
        Ok(Some(b))
    }

    /// Read a string attribute.
    pub(crate) fn string_attr(&self, attr: &'static str) -> Option<String> {
        let v = self.copy_attr(attr).ok()??;
        // SAFETY: v is a +1 CFString; the wrapper takes ownership.
        let s = unsafe { CFString::wrap_under_create_rule(v as CFStringRef) };
        Some(s.to_string())
    }

    /// Read an AXValue attribute holding a `T` of AXValue type `kind`.
    fn value_attr<T>(&self, attr: &'static str, kind: i32, mut out: T) -> Result<T> {
        let v = self.copy_attr(attr)?.ok_or(Error::Unsupported)?;
        // SAFETY: out is a repr(C) CGPoint/CGSize matching `kind`; v is +1.
        let ok = unsafe { AXValueGetValue(v, kind, (&raw mut out).cast()) };
        unsafe { CFRelease(v) };
        if ok { Ok(out) } else { Err(Error::Unsupported) }
    }

    /// Write an AXValue attribute from a `T` of AXValue type `kind`.
    fn set_value_attr<T>(&self, attr: &'static str, kind: i32, value: &T) -> Result<()> {
        // SAFETY: value is a repr(C) CGPoint/CGSize matching `kind`.
        let v = unsafe { AXValueCreate(kind, (value as *const T).cast()) };
        if v.is_null() {
            return Err(Error::Unsupported);
        }
        // SAFETY: element retained by self; v released after the call.
        let err = unsafe { AXUIElementSetAttributeValue(self.as_ptr(), cfstr(attr), v) };
        unsafe { CFRelease(v) };
        Error::check(err)
    }

    /// `AXPosition` (top-left, AX space).
    pub(crate) fn position(&self) -> Result<NSPoint> {
        self.value_attr("AXPosition", K_AX_VALUE_CGPOINT_TYPE, NSPoint::new(0.0, 0.0))
    }

    /// `AXSize`.
    pub(crate) fn size(&self) -> Result<NSSize> {
        self.value_attr("AXSize", K_AX_VALUE_CGSIZE_TYPE, NSSize::new(0.0, 0.0))
    }

    /// Set `AXPosition`.
    pub(crate) fn set_position(&self, p: NSPoint) -> Result<()> {
        self.set_value_attr("AXPosition", K_AX_VALUE_CGPOINT_TYPE, &p)
    }

    /// Set `AXSize`.
    pub(crate) fn set_size(&self, s: NSSize) -> Result<()> {
        self.set_value_attr("AXSize", K_AX_VALUE_CGSIZE_TYPE, &s)
    }

    /// Elements of the `AXWindows` attribute, retained.
    fn windows(&self) -> Result<Vec<Self>> {
        let Some(v) = self.copy_attr("AXWindows")? else {
            return Ok(Vec::new());
        };
        // SAFETY: AXWindows is a +1 CFArray of AXUIElements.
        let arr = unsafe { CFArray::<*const c_void>::wrap_under_create_rule(v as _) };
        let n = unsafe { CFArrayGetCount(arr.as_concrete_TypeRef()) };
        Ok((0..n)
            .filter_map(|i| {
                // SAFETY: i is in bounds; the element is borrowed from arr.
                let w = unsafe { CFArrayGetValueAtIndex(arr.as_concrete_TypeRef(), i) };
                Self::retain_from_borrowed(w as *mut c_void)
            })
            .collect())
    }
}

impl Drop for AxElem {
    fn drop(&mut self) {
        // SAFETY: self holds exactly one retain.
        unsafe { CFRelease(self.0 as CFTypeRef) };
    }
}

/// The focused window of `pid`.
///
/// Scans `AXWindows` for `AXFocused`, then `AXMain`, then the first element
/// whose role is `AXWindow`. Querying `AXFocusedWindow` on the application
/// element crashes some processes on macOS 15.5, so it is avoided.
pub(crate) fn focused_window_for_pid(pid: i32) -> Result<AxElem> {
    let app = AxElem::application(pid)?;
    let windows = app.windows()?;
    for attr in ["AXFocused", "AXMain"] {
        if let Some(i) = windows
            .iter()
            .position(|w| matches!(w.bool_attr(attr), Ok(Some(true))))
        {
            debug!(pid, via = attr, "focused window");
            return windows.into_iter().nth(i).ok_or(Error::NoWindow);
        }
    }
    let first = windows
        .into_iter()
        .find(|w| w.string_attr("AXRole").as_deref() == Some("AXWindow"));
    if first.is_some() {
        debug!(pid, via = "AXRole", "focused window");
    }
    first.ok_or(Error::NoWindow)
}
