//! Errors from Accessibility and AppKit calls.

use std::result::Result as StdResult;

use thiserror::Error;

/// `kAXErrorFailure`: generic failure.
pub const AX_ERROR_FAILURE: i32 = -25200;
/// `kAXErrorInvalidUIElement`: the window closed or the reference is stale.
pub const AX_ERROR_INVALID_UI_ELEMENT: i32 = -25202;
/// `kAXErrorAttributeUnsupported`.
pub const AX_ERROR_ATTRIBUTE_UNSUPPORTED: i32 = -25205;
/// `kAXErrorAPIDisabled`: Accessibility permission is missing.
pub const AX_ERROR_API_DISABLED: i32 = -25211;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur during window operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An AX call returned a non-zero status.
    #[error("AX error {0}")]
    AxCode(i32),
    /// The window element went away.
    #[error("window is gone")]
    WindowGone,
    /// The attribute exists but does not hold the expected value type.
    #[error("attribute unsupported")]
    Unsupported,
    /// The application element could not be created.
    #[error("failed to create AX application element")]
    AppElement,
    /// The application has no usable window.
    #[error("no focused window")]
    NoWindow,
}

impl Error {
    /// Map an AX status to `Ok` or the matching error.
    pub fn check(code: i32) -> Result<()> {
        match code {
            0 => Ok(()),
            AX_ERROR_INVALID_UI_ELEMENT => Err(Self::WindowGone),
            c => Err(Self::AxCode(c)),
        }
    }

    /// The AX status code this error stands for.
    pub fn ax_code(self) -> i32 {
        match self {
            Self::AxCode(c) => c,
            Self::WindowGone => AX_ERROR_INVALID_UI_ELEMENT,
            Self::Unsupported => AX_ERROR_ATTRIBUTE_UNSUPPORTED,
            Self::AppElement | Self::NoWindow => AX_ERROR_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_both_ways() {
        assert_eq!(Error::check(0), Ok(()));
        assert_eq!(Error::check(AX_ERROR_INVALID_UI_ELEMENT), Err(Error::WindowGone));
        assert_eq!(Error::check(AX_ERROR_API_DISABLED), Err(Error::AxCode(-25211)));
        for code in [AX_ERROR_FAILURE, AX_ERROR_INVALID_UI_ELEMENT, -25204] {
            let err = Error::check(code).expect_err("non-zero");
            assert_eq!(err.ax_code(), code);
        }
        assert_eq!(Error::Unsupported.ax_code(), AX_ERROR_ATTRIBUTE_UNSUPPORTED);
        assert_eq!(Error::NoWindow.ax_code(), AX_ERROR_FAILURE);
    }
}
