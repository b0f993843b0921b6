use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation handle for a running calculation.
///
/// The refinement loop checks the token between iterations, so a cancelled
/// run returns its current (consistent) state with `converged = false`
/// instead of running until the iteration cap. Clones share the same flag,
/// which makes it cheap to hand one copy to the calculation and keep another
/// on the controlling thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next iteration boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
