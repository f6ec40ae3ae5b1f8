//! Recording transport.
//!
//! Behaves like the console or like a network transport, but keeps every
//! write in order so tests can assert on exactly what a party would see.

use std::collections::VecDeque;

use wopr_core::{
    Screen, SessionError, SessionRegistry, SessionState, Transport, TransportId, ansi,
};

/// Transport that records instead of writing.
#[derive(Debug)]
pub struct CaptureTransport {
    id: TransportId,
    writes: Vec<String>,
    screens: Vec<Screen>,
    input: VecDeque<String>,
    registry: Option<SessionRegistry>,
    open: bool,
    disconnects: usize,
}

impl CaptureTransport {
    /// Console-like capture: synchronous input from `lines`, disconnect is a
    /// no-op.
    pub fn console<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: TransportId::CONSOLE,
            writes: Vec::new(),
            screens: Vec::new(),
            input: lines.into_iter().map(Into::into).collect(),
            registry: None,
            open: true,
            disconnects: 0,
        }
    }

    /// Network-like capture: screen state goes to `registry`, disconnect
    /// closes the transport and removes the entry.
    pub fn network(id: TransportId, registry: SessionRegistry) -> Self {
        Self {
            id,
            writes: Vec::new(),
            screens: Vec::new(),
            input: VecDeque::new(),
            registry: Some(registry),
            open: true,
            disconnects: 0,
        }
    }

    /// Every write, in order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// All writes concatenated.
    pub fn output(&self) -> String {
        self.writes.concat()
    }

    /// Printable writes concatenated: control sequences and sweep frames
    /// are left out.
    pub fn text(&self) -> String {
        self.writes.iter().filter(|w| !w.starts_with(['\x1b', '\r'])).map(String::as_str).collect()
    }

    /// Number of standalone `"\n"` writes.
    pub fn newline_writes(&self) -> usize {
        self.writes.iter().filter(|w| w.as_str() == "\n").count()
    }

    /// Screens persisted through `set_screen`, in order.
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Number of `disconnect` calls.
    pub fn disconnects(&self) -> usize {
        self.disconnects
    }

    /// Forget everything written so far.
    pub fn clear(&mut self) {
        self.writes.clear();
        self.screens.clear();
    }
}

impl Transport for CaptureTransport {
    fn id(&self) -> TransportId {
        self.id
    }

    async fn send(&mut self, text: &str) {
        if self.open {
            self.writes.push(text.to_string());
        }
    }

    async fn disconnect(&mut self) {
        self.disconnects += 1;

        let Some(registry) = self.registry.as_ref() else {
            return;
        };
        if !self.open {
            return;
        }

        self.writes.push(ansi::RESET.to_string());
        registry.remove(self.id).await;
        self.open = false;
    }

    fn supports_synchronous_input(&self) -> bool {
        self.registry.is_none()
    }

    async fn set_screen(&mut self, screen: Screen) -> Result<(), SessionError> {
        if !self.open {
            return Ok(());
        }

        if let Some(registry) = &self.registry {
            registry.update(self.id, SessionState::at(screen)).await?;
        }
        self.screens.push(screen);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        if self.registry.is_some() {
            return Ok(None);
        }
        Ok(self.input.pop_front())
    }
}
