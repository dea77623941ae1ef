//! Flow results and the per-action in-flight flag

use std::sync::atomic::{AtomicBool, Ordering};

/// How a user action ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Rejected because the same action is still outstanding
    Busy,
    /// Rejected before any network call; carries the alert shown
    Invalid(String),
    /// Navigated to the location
    Redirected(String),
    /// Terminal failure; carries the alert shown
    Failed(String),
}

impl FlowOutcome {
    pub fn is_redirect(&self) -> bool {
        matches!(self, FlowOutcome::Redirected(_))
    }
}

/// At most one outstanding run of an action
#[derive(Debug, Default)]
pub(crate) struct InFlight(AtomicBool);

impl InFlight {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim the flag; `None` while another run holds it
    pub(crate) fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.0))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the in-flight flag on drop, including when the future is cancelled
pub(crate) struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_rejected_until_release() {
        let flag = InFlight::new();

        let guard = flag.try_acquire();
        assert!(guard.is_some());
        assert!(flag.is_active());
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert!(!flag.is_active());
        assert!(flag.try_acquire().is_some());
    }
}
