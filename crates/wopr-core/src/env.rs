//! Environment abstraction for deterministic testing.
//!
//! Decouples rendering from the wall clock. Production sleeps on tokio's
//! timer; simulations either skip the pauses or run them on virtual time.

use std::{future::Future, time::Duration};

/// Abstract environment providing the pauses between animated characters.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Sleeps for the specified duration.
    ///
    /// Implementations may return immediately; the renderer makes no
    /// assumption about elapsed time.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}
