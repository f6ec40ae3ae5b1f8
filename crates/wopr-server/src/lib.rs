//! WOPR server runtime.
//!
//! Production glue around [`wopr_core`]: tokio sockets, the local terminal,
//! and the wall clock. The core decides what every session says; this crate
//! decides where it goes.
//!
//! # Components
//!
//! - [`Server`]: accept loop, one task per connection
//! - [`serve_connection`]: drives one socket through a session
//! - [`NetworkTransport`]: socket write half plus the shared registry
//! - [`ConsoleTransport`] / [`run_console`]: stdin/stdout mode
//! - [`SystemEnv`]: real pauses via the tokio timer
//! - [`ServerConfig`]: bind host, `WOPR_PORT`, animation timings

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod acceptor;
mod config;
mod connection;
mod console;
mod error;
mod network;
mod system_env;

use std::{future::Future, net::SocketAddr, pin::pin};

pub use acceptor::Acceptor;
pub use config::{DEFAULT_PORT, PORT_ENV, ServerConfig, parse_port};
pub use connection::{TELNET_IAC, serve_connection};
pub use console::{ConsoleTransport, run_console};
pub use error::{ConfigError, ServerError};
pub use network::NetworkTransport;
pub use system_env::SystemEnv;
use tokio::net::TcpListener;
use wopr_core::{Environment, RenderConfig, SessionRegistry, TransportId};

/// Network-mode server.
///
/// Owns the listening socket and the registry shared by every session it
/// spawns. Connections never wait on each other: each one runs in its own
/// task from accept to disconnect.
pub struct Server<A, E> {
    acceptor: A,
    registry: SessionRegistry,
    env: E,
    render: RenderConfig,
    next_id: u64,
}

impl Server<TcpListener, SystemEnv> {
    /// Bind a TCP listener per `config`.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let addr = config.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

        tracing::info!(%addr, "listener bound");

        Ok(Self::new(listener, SystemEnv::new(), config.render))
    }
}

impl<A: Acceptor, E: Environment> Server<A, E> {
    /// Create a server over an already bound acceptor.
    pub fn new(acceptor: A, env: E, render: RenderConfig) -> Self {
        // Identity 0 belongs to the console.
        Self { acceptor, registry: SessionRegistry::new(), env, render, next_id: 1 }
    }

    /// Registry shared by all sessions of this server.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.acceptor.local_addr()?)
    }

    /// Accept connections forever.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(std::future::pending()).await
    }

    /// Accept connections until `shutdown` completes.
    ///
    /// Sessions already running keep their tasks; only accepting stops.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        tracing::info!(addr = %self.local_addr()?, "server accepting connections");

        let mut shutdown = pin!(shutdown);
        loop {
            let accepted = tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown requested, no longer accepting");
                    break;
                },
                accepted = self.acceptor.accept() => accepted,
            };

            match accepted {
                Ok((stream, peer)) => self.spawn_session(stream, peer),
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                },
            }
        }

        Ok(())
    }

    fn spawn_session(&mut self, stream: A::Stream, peer: SocketAddr) {
        let id = TransportId::new(self.next_id);
        self.next_id += 1;

        tracing::info!(transport = %id, %peer, "client connected");

        let registry = self.registry.clone();
        let env = self.env.clone();
        let render = self.render;

        tokio::spawn(async move {
            if let Err(e) = serve_connection(stream, id, &registry, env, render).await {
                if e.is_invariant_violation() {
                    tracing::error!(transport = %id, error = %e, "session failed");
                } else {
                    tracing::warn!(transport = %id, error = %e, "session ended with error");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_to_taken_port_fails() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let config = ServerConfig { bind_host: "127.0.0.1".to_string(), port, ..Default::default() };

        let err = Server::bind(&config).await.err().unwrap();

        let expected = format!("127.0.0.1:{port}");
        assert!(matches!(&err, ServerError::Bind { addr, .. } if *addr == expected), "{err}");
    }

    #[tokio::test]
    async fn bind_reports_local_address() {
        let config =
            ServerConfig { bind_host: "127.0.0.1".to_string(), port: 0, ..Default::default() };

        let server = Server::bind(&config).await.unwrap();

        assert!(server.local_addr().unwrap().ip().is_loopback());
        assert!(server.registry().is_empty().await);
    }
}
