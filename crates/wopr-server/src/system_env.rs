//! Production Environment implementation using the tokio timer.
//!
//! `SystemEnv` pauses for real wall-clock time between animated characters.
//! Sessions on the multi-threaded runtime sleep independently; one slow
//! typist never delays another connection.

use std::time::Duration;

use wopr_core::Environment;

/// Production environment backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[allow(clippy::disallowed_methods)]
    async fn system_env_sleep_waits() {
        let env = SystemEnv::new();

        let start = std::time::Instant::now();
        env.sleep(Duration::from_millis(50)).await;

        assert!(start.elapsed() >= Duration::from_millis(50), "Sleep should wait at least 50ms");
    }

    #[tokio::test(start_paused = true)]
    async fn system_env_sleep_follows_tokio_clock() {
        let env = SystemEnv::new();

        let start = tokio::time::Instant::now();
        env.sleep(Duration::from_secs(30)).await;

        assert_eq!(start.elapsed(), Duration::from_secs(30));
    }
}
