//! Turmoil listener for running the real server inside a simulation.

use std::{io, net::SocketAddr};

use wopr_server::Acceptor;

/// Listener on turmoil's simulated network.
pub struct SimListener(turmoil::net::TcpListener);

impl SimListener {
    /// Bind on the current simulated host.
    pub async fn bind(addr: &str) -> io::Result<Self> {
        Ok(Self(turmoil::net::TcpListener::bind(addr).await?))
    }
}

impl Acceptor for SimListener {
    type Stream = turmoil::net::TcpStream;

    async fn accept(&mut self) -> io::Result<(Self::Stream, SocketAddr)> {
        self.0.accept().await
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.0.local_addr()
    }
}
