use crate::EventKind;

/// What the tap does with one keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Deliver an [`crate::Event`] to the client.
    pub emit: bool,
    /// Swallow the event so the foreground app never sees it.
    pub intercept: bool,
}

impl Decision {
    /// Let the event through untouched.
    pub const PASS: Self = Self {
        emit: false,
        intercept: false,
    };
}

/// Classify how the tap should handle a given event.
///
/// - If not matched, nothing is emitted or intercepted.
/// - A matched KeyDown is emitted and intercepted, OS auto-repeat included, so
///   holding a chord keeps firing.
/// - A matched KeyUp is intercepted but not emitted.
pub fn classify(matched: Option<u32>, kind: EventKind) -> Decision {
    if matched.is_none() {
        return Decision::PASS;
    }
    match kind {
        EventKind::KeyDown => Decision {
            emit: true,
            intercept: true,
        },
        EventKind::KeyUp => Decision {
            emit: false,
            intercept: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: Option<u32> = Some(1);

    #[test]
    fn non_match_passes_both_ways() {
        assert_eq!(classify(None, EventKind::KeyDown), Decision::PASS);
        assert_eq!(classify(None, EventKind::KeyUp), Decision::PASS);
    }

    #[test]
    fn match_press_is_emitted_and_intercepted() {
        let d = classify(M, EventKind::KeyDown);
        assert!(d.emit);
        assert!(d.intercept);
    }

    #[test]
    fn match_keyup_is_swallowed_silently() {
        let d = classify(M, EventKind::KeyUp);
        assert!(!d.emit);
        assert!(d.intercept);
    }
}
