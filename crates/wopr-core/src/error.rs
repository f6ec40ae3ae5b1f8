//! Session engine error types.

use thiserror::Error;

use crate::TransportId;

/// Registry invariant violations.
///
/// Every live network transport has exactly one entry. Seeing one of these
/// means a caller broke that lifecycle; they are defects, not user-facing
/// conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Lookup or update of a transport that was never registered, or was
    /// already removed.
    #[error("transport {0} is not registered")]
    NotRegistered(TransportId),

    /// A transport identity was registered twice.
    #[error("transport {0} is already registered")]
    AlreadyRegistered(TransportId),
}

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Session state could not be persisted.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Reading the next line of input failed.
    #[error("input error: {0}")]
    Input(#[from] std::io::Error),
}
