//! Per-connection driver.
//!
//! Each accepted socket runs [`serve_connection`] in its own task: register,
//! greet, then one [`Session::handle_input`] per read until the client
//! leaves or is rejected. Whatever happens, the registry entry is gone when
//! the task ends.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use wopr_core::{
    Environment, Flow, RenderConfig, Session, SessionRegistry, Transport, TransportId,
};

use crate::{NetworkTransport, ServerError};

/// Telnet "interpret as command" byte. Reads starting with it are option
/// negotiation, not user input.
pub const TELNET_IAC: u8 = 255;

const READ_BUFFER_SIZE: usize = 4096;

/// Run one client connection to completion.
///
/// Registers `id`, drives the session over `stream`, and removes `id` from
/// the registry on every exit path.
pub async fn serve_connection<S, E>(
    stream: S,
    id: TransportId,
    registry: &SessionRegistry,
    env: E,
    config: RenderConfig,
) -> Result<(), ServerError>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
    E: Environment,
{
    registry.register(id).await?;

    let (reader, writer) = tokio::io::split(stream);
    let transport = NetworkTransport::new(id, writer, registry.clone());
    let mut session = Session::new(transport, env, config);

    let result = drive(&mut session, reader, registry).await;

    if session.transport().is_open() {
        session.transport_mut().disconnect().await;
    }
    registry.remove(id).await;

    result
}

async fn drive<R, T, E>(
    session: &mut Session<T, E>,
    mut reader: R,
    registry: &SessionRegistry,
) -> Result<(), ServerError>
where
    R: AsyncRead + Unpin,
    T: Transport,
    E: Environment,
{
    let id = session.transport().id();
    session.start().await?;

    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    while session.transport().is_open() {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!(transport = %id, "client closed connection");
                break;
            },
            Ok(n) => n,
            Err(e) => {
                tracing::debug!(transport = %id, error = %e, "read failed");
                break;
            },
        };

        let bytes = &buf[..n];
        if bytes.first() == Some(&TELNET_IAC) {
            tracing::trace!(transport = %id, len = n, "ignoring telnet negotiation");
            continue;
        }

        let raw = String::from_utf8_lossy(bytes);
        let screen = registry.get(id).await?.screen;

        if session.handle_input(screen, &raw).await? == Flow::Closed {
            break;
        }
    }

    Ok(())
}
