//! Transport abstraction.
//!
//! A transport is "how to talk" to one party: send text, hang up, and
//! optionally read a line synchronously. "Where we are" in the script lives
//! elsewhere ([`crate::SessionRegistry`] for network sessions); the
//! transport only forwards [`Transport::set_screen`] to it.
//!
//! # Implementations
//!
//! - **Console**: stdout/stdin, synchronous line input, disconnect is a no-op
//! - **Network**: one per accepted socket, input arrives as read events
//! - **Capture**: records every write for tests

use std::{fmt, future::Future, io};

use crate::{Screen, SessionError};

/// Opaque identity of one live transport.
///
/// Unique per live connection; assigned by whoever accepts the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransportId(u64);

impl TransportId {
    /// Identity reserved for the local console.
    pub const CONSOLE: Self = Self(0);

    /// Wrap a raw identity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identity value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Uniform capability set over one connected party.
///
/// # Invariants
///
/// - `send` never fails and never blocks indefinitely. Failed or partial
///   writes are logged and dropped.
/// - After `disconnect`, `is_open` is `false` and further `send` and
///   `set_screen` calls are no-ops.
/// - A transport that does not support synchronous input never returns a
///   line from `read_line`.
pub trait Transport: Send {
    /// Identity of this transport.
    fn id(&self) -> TransportId;

    /// Write `text` to the party.
    fn send(&mut self, text: &str) -> impl Future<Output = ()> + Send;

    /// Put the transport into its terminal state.
    ///
    /// Releases any registry entry and closes the underlying channel.
    /// Transports with nothing to close treat this as a no-op and stay open.
    fn disconnect(&mut self) -> impl Future<Output = ()> + Send;

    /// Whether the session may block on [`Transport::read_line`].
    fn supports_synchronous_input(&self) -> bool;

    /// Persist the current screen wherever this transport's session state
    /// lives.
    fn set_screen(&mut self, screen: Screen)
    -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Whether the transport is still usable.
    fn is_open(&self) -> bool;

    /// Block until the party enters a line.
    ///
    /// `Ok(None)` means end of input. Transports without synchronous input
    /// always return `Ok(None)`.
    fn read_line(&mut self) -> impl Future<Output = io::Result<Option<String>>> + Send {
        async { Ok(None) }
    }
}
