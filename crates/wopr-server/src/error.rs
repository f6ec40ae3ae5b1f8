//! Server error types.

use std::io;

use thiserror::Error;
use wopr_core::{RegistryError, SessionError};

/// Invalid startup configuration.
///
/// Fatal: the process must not accept connections with a configuration it
/// could not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `WOPR_PORT` is not a TCP port number.
    #[error("invalid WOPR_PORT value '{value}': {reason}")]
    InvalidPort {
        /// Raw environment value.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Errors that can occur in the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error. Fix configuration and restart.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The listener could not be bound. Fatal at startup.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying socket error.
        source: io::Error,
    },

    /// Transport I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A session ended with an error.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Registry lifecycle violated. Indicates a bug, not a client problem.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl ServerError {
    /// Whether this error is a registry invariant violation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Registry(_) | Self::Session(SessionError::Registry(_)))
    }
}
