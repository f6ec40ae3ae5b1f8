//! Listening socket abstraction.
//!
//! [`crate::Server`] only needs "give me the next connected stream". Tokio's
//! listener provides it in production; the simulation harness provides it
//! over turmoil's simulated network.

use std::{future::Future, io, net::SocketAddr};

use tokio::io::{AsyncRead, AsyncWrite};

/// Source of accepted byte streams.
pub trait Acceptor: Send + 'static {
    /// Connected byte stream, one per client.
    type Stream: AsyncRead + AsyncWrite + Send + 'static;

    /// Wait for the next client.
    fn accept(&mut self) -> impl Future<Output = io::Result<(Self::Stream, SocketAddr)>> + Send;

    /// Address the acceptor is bound to.
    fn local_addr(&self) -> io::Result<SocketAddr>;
}

impl Acceptor for tokio::net::TcpListener {
    type Stream = tokio::net::TcpStream;

    async fn accept(&mut self) -> io::Result<(Self::Stream, SocketAddr)> {
        tokio::net::TcpListener::accept(self).await
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        tokio::net::TcpListener::local_addr(self)
    }
}
