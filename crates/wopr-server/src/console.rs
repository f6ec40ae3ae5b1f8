//! Local console mode.
//!
//! The operator's terminal is a single transport: output to stdout, lines
//! from stdin. There is no registry entry and nothing to disconnect; a
//! rejected logon simply starts over.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use wopr_core::{
    Environment, RenderConfig, Screen, Session, SessionError, Transport, TransportId,
};

use crate::ServerError;

/// Transport over a local terminal.
pub struct ConsoleTransport<W = Stdout, R = Stdin> {
    writer: W,
    reader: BufReader<R>,
}

impl ConsoleTransport {
    /// Console over the process's stdout and stdin.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdout(), tokio::io::stdin())
    }
}

impl<W, R> ConsoleTransport<W, R>
where
    W: AsyncWrite + Unpin + Send,
    R: AsyncRead + Unpin + Send,
{
    /// Console over arbitrary streams.
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader: BufReader::new(reader) }
    }
}

impl<W, R> Transport for ConsoleTransport<W, R>
where
    W: AsyncWrite + Unpin + Send,
    R: AsyncRead + Unpin + Send,
{
    fn id(&self) -> TransportId {
        TransportId::CONSOLE
    }

    async fn send(&mut self, text: &str) {
        let written = async {
            self.writer.write_all(text.as_bytes()).await?;
            self.writer.flush().await
        };
        if let Err(e) = written.await {
            tracing::debug!(error = %e, "console write failed");
        }
    }

    async fn disconnect(&mut self) {}

    fn supports_synchronous_input(&self) -> bool {
        true
    }

    async fn set_screen(&mut self, _screen: Screen) -> Result<(), SessionError> {
        Ok(())
    }

    fn is_open(&self) -> bool {
        true
    }

    /// Bytes that are not UTF-8 are replaced, never rejected: a stray
    /// keystroke is unrecognized input, not a fatal error.
    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }

        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

/// Run the conversation on the local terminal until stdin closes.
///
/// The identification sweep spans the terminal's width when it can be
/// queried, `render.terminal_width` otherwise.
pub async fn run_console<E: Environment>(
    env: E,
    render: RenderConfig,
) -> Result<Screen, ServerError> {
    let terminal_width = crossterm::terminal::size()
        .map_or(render.terminal_width, |(cols, _)| usize::from(cols));
    let config = RenderConfig { terminal_width, ..render };

    let mut session = Session::new(ConsoleTransport::stdio(), env, config);
    Ok(session.run_synchronous().await?)
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;
    use crate::SystemEnv;

    #[tokio::test]
    async fn reads_lines_without_terminators() {
        let (writer, _unused) = tokio::io::duplex(64);
        let input: &[u8] = b"joshua\r\nhelp games\n";
        let mut console = ConsoleTransport::new(writer, input);

        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("joshua"));
        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("help games"));
        assert_eq!(console.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced() {
        let (writer, _unused) = tokio::io::duplex(64);
        let input: &[u8] = b"caf\xe9\r\njoshua";
        let mut console = ConsoleTransport::new(writer, input);

        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("caf\u{fffd}"));
        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("joshua"));
        assert_eq!(console.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_utf8_is_rejected_then_logon_continues() {
        let input: &[u8] = b"caf\xe9\njoshua\n";
        let console = ConsoleTransport::new(tokio::io::sink(), input);
        let mut session = Session::new(console, SystemEnv::new(), RenderConfig::instant());

        assert_eq!(session.run_synchronous().await.unwrap(), Screen::Greeting);
    }

    #[tokio::test]
    async fn send_flushes_each_write() {
        let (writer, mut output) = tokio::io::duplex(64);
        let mut console = ConsoleTransport::new(writer, tokio::io::empty());

        console.send("GREETINGS").await;

        let mut buf = [0u8; 9];
        output.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"GREETINGS");
    }

    #[tokio::test]
    async fn disconnect_keeps_console_open() {
        let (writer, _unused) = tokio::io::duplex(64);
        let mut console = ConsoleTransport::new(writer, tokio::io::empty());

        console.disconnect().await;

        assert!(console.is_open());
        assert!(console.supports_synchronous_input());
        assert_eq!(console.id(), TransportId::CONSOLE);
    }
}
