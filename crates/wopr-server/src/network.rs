//! Network transport.
//!
//! One per accepted socket. Writes go straight to the socket half owned by
//! the session; screen state goes to the shared [`SessionRegistry`]. Input
//! arrives through the connection read loop, never through `read_line`.

use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use wopr_core::{Screen, SessionError, SessionRegistry, SessionState, Transport, TransportId, ansi};

/// Upper bound on one socket write. A stalled client loses output instead of
/// stalling its session forever.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport over the write half of a client socket.
pub struct NetworkTransport<W> {
    id: TransportId,
    writer: Option<W>,
    registry: SessionRegistry,
    send_timeout: Duration,
}

impl<W: AsyncWrite + Unpin + Send> NetworkTransport<W> {
    /// Wrap `writer`. The caller registers `id` before the first
    /// `set_screen`.
    pub fn new(id: TransportId, writer: W, registry: SessionRegistry) -> Self {
        Self { id, writer: Some(writer), registry, send_timeout: SEND_TIMEOUT }
    }

    /// Override the per-write timeout.
    #[must_use]
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }
}

impl<W: AsyncWrite + Unpin + Send> Transport for NetworkTransport<W> {
    fn id(&self) -> TransportId {
        self.id
    }

    async fn send(&mut self, text: &str) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        match tokio::time::timeout(self.send_timeout, writer.write_all(text.as_bytes())).await {
            Ok(Ok(())) => {},
            Ok(Err(e)) => {
                tracing::debug!(transport = %self.id, error = %e, "write failed");
            },
            Err(_) => {
                tracing::debug!(transport = %self.id, "write timed out");
            },
        }
    }

    async fn disconnect(&mut self) {
        if self.writer.is_none() {
            return;
        }

        self.send(ansi::RESET).await;
        self.registry.remove(self.id).await;

        let Some(mut writer) = self.writer.take() else {
            return;
        };
        if let Err(e) = writer.shutdown().await {
            tracing::debug!(transport = %self.id, error = %e, "shutdown failed");
        }

        tracing::info!(transport = %self.id, "client disconnected");
    }

    fn supports_synchronous_input(&self) -> bool {
        false
    }

    async fn set_screen(&mut self, screen: Screen) -> Result<(), SessionError> {
        if self.writer.is_none() {
            return Ok(());
        }

        self.registry.update(self.id, SessionState::at(screen)).await?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.writer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;
    use wopr_core::RegistryError;

    use super::*;

    fn id(raw: u64) -> TransportId {
        TransportId::new(raw)
    }

    #[tokio::test]
    async fn send_writes_bytes_unchanged() {
        let (client, mut server) = tokio::io::duplex(64);
        let mut transport = NetworkTransport::new(id(1), client, SessionRegistry::new());

        transport.send("LOGON: ").await;
        transport.send("\x1b[2J").await;

        let mut buf = [0u8; 11];
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"LOGON: \x1b[2J");
    }

    #[tokio::test]
    async fn set_screen_updates_registry() {
        let registry = SessionRegistry::new();
        registry.register(id(3)).await.unwrap();
        let (client, _server) = tokio::io::duplex(64);
        let mut transport = NetworkTransport::new(id(3), client, registry.clone());

        transport.set_screen(Screen::Greeting).await.unwrap();

        assert_eq!(registry.get(id(3)).await.unwrap(), SessionState::at(Screen::Greeting));
    }

    #[tokio::test]
    async fn set_screen_unregistered_is_an_error() {
        let (client, _server) = tokio::io::duplex(64);
        let mut transport = NetworkTransport::new(id(9), client, SessionRegistry::new());

        let err = transport.set_screen(Screen::Games).await.unwrap_err();
        assert!(matches!(err, SessionError::Registry(RegistryError::NotRegistered(_))));
    }

    #[tokio::test]
    async fn disconnect_resets_color_and_releases_entry() {
        let registry = SessionRegistry::new();
        registry.register(id(4)).await.unwrap();
        let (client, mut server) = tokio::io::duplex(64);
        let mut transport = NetworkTransport::new(id(4), client, registry.clone());

        transport.disconnect().await;

        assert!(!transport.is_open());
        assert!(!registry.contains(id(4)).await);

        let mut received = Vec::new();
        server.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, ansi::RESET.as_bytes());
    }

    #[tokio::test]
    async fn closed_transport_ignores_everything() {
        let registry = SessionRegistry::new();
        registry.register(id(5)).await.unwrap();
        let (client, mut server) = tokio::io::duplex(64);
        let mut transport = NetworkTransport::new(id(5), client, registry.clone());

        transport.disconnect().await;
        transport.disconnect().await;
        transport.send("ignored").await;
        transport.set_screen(Screen::GlobalWar).await.unwrap();

        assert!(registry.is_empty().await);
        let mut received = Vec::new();
        server.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, ansi::RESET.as_bytes());
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_client_times_out() {
        let (client, _server) = tokio::io::duplex(4);
        let mut transport = NetworkTransport::new(id(6), client, SessionRegistry::new())
            .with_send_timeout(Duration::from_millis(100));

        transport.send("far more than four bytes").await;

        assert!(transport.is_open());
    }
}
