//! Simulated environment.
//!
//! Counts every pause the renderer asks for. By default the pauses return
//! immediately; [`SimEnv::virtual_time`] sleeps on tokio's clock instead,
//! which turmoil and paused tokio runtimes advance without waiting.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use wopr_core::Environment;

/// Environment for tests. Clones share their counters.
#[derive(Debug, Clone, Default)]
pub struct SimEnv {
    pauses: Arc<AtomicU64>,
    paused_nanos: Arc<AtomicU64>,
    sleeps: bool,
}

impl SimEnv {
    /// Record pauses and return immediately.
    pub fn instant() -> Self {
        Self::default()
    }

    /// Record pauses and sleep on tokio's (virtual) clock.
    pub fn virtual_time() -> Self {
        Self { sleeps: true, ..Self::default() }
    }

    /// Number of pauses requested so far.
    pub fn pauses(&self) -> u64 {
        self.pauses.load(Ordering::SeqCst)
    }

    /// Sum of all requested pauses.
    pub fn total_paused(&self) -> Duration {
        Duration::from_nanos(self.paused_nanos.load(Ordering::SeqCst))
    }
}

impl Environment for SimEnv {
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        self.pauses.fetch_add(1, Ordering::SeqCst);
        self.paused_nanos.fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);

        let sleeps = self.sleeps;
        async move {
            if sleeps {
                tokio::time::sleep(duration).await;
            }
        }
    }
}
