//! Minimal line-oriented client for driving a server in tests.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Client that reads until expected text appears and sends CRLF lines,
/// the way a telnet client in line mode does.
pub struct TelnetClient<S> {
    stream: S,
    received: Vec<u8>,
    consumed: usize,
}

impl<S: AsyncRead + AsyncWrite + Unpin> TelnetClient<S> {
    /// Wrap a connected stream.
    pub fn new(stream: S) -> Self {
        Self { stream, received: Vec::new(), consumed: 0 }
    }

    /// Read until `needle` has arrived and return everything up to and
    /// including it that was not returned before.
    pub async fn expect(&mut self, needle: &str) -> io::Result<String> {
        let pattern = needle.as_bytes();
        if pattern.is_empty() {
            return Ok(String::new());
        }

        loop {
            let pending = &self.received[self.consumed..];
            if let Some(pos) = pending.windows(pattern.len()).position(|w| w == pattern) {
                let end = self.consumed + pos + pattern.len();
                let chunk = String::from_utf8_lossy(&self.received[self.consumed..end]).into_owned();
                self.consumed = end;
                return Ok(chunk);
            }

            let mut buf = [0u8; 1024];
            let n = self.stream.read(&mut buf).await?;
            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("connection closed before {needle:?} arrived"),
                ));
            }
            self.received.extend_from_slice(&buf[..n]);
        }
    }

    /// Send `line` followed by CRLF.
    pub async fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.send_raw(format!("{line}\r\n").as_bytes()).await
    }

    /// Send bytes unchanged.
    pub async fn send_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes).await?;
        self.stream.flush().await
    }

    /// Read until the server closes and return everything not returned
    /// before.
    pub async fn read_to_close(&mut self) -> io::Result<String> {
        self.stream.read_to_end(&mut self.received).await?;
        let rest = String::from_utf8_lossy(&self.received[self.consumed..]).into_owned();
        self.consumed = self.received.len();
        Ok(rest)
    }
}
