//! Single-slot busy flag with a guard that releases on drop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "an operation is in flight" flag
#[derive(Clone, Debug, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Claim the flag. `None` if something already holds it.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(Arc::clone(&self.0)))
    }
}

/// Held for the lifetime of one operation; dropping it clears the flag,
/// including when the holder unwinds.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
