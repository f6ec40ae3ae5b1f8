//! Session registry for network connections.
//!
//! Maps each live network transport to its [`SessionState`]. The registry is
//! the only place screen and authentication state is held for network
//! sessions; transports forward to it and never embed it.
//!
//! [`SessionTable`] is the plain map. [`SessionRegistry`] is the shared,
//! cloneable handle that serializes every operation behind one lock, so no
//! read observes a partially written state and no two updates interleave.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{RegistryError, Screen, TransportId};

/// Where one session is in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionState {
    /// Whether the shared token has been accepted.
    pub authenticated: bool,
    /// Current screen.
    pub screen: Screen,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh, unauthenticated state at logon.
    pub fn new() -> Self {
        Self { authenticated: false, screen: Screen::Logon }
    }

    /// State of a session that has just entered `screen`.
    ///
    /// Screens past logon can only be reached with the shared token, so
    /// authentication follows the screen.
    pub fn at(screen: Screen) -> Self {
        Self { authenticated: screen.requires_authentication(), screen }
    }
}

/// Map from transport identity to session state.
///
/// Entries are never shared across transports: every operation addresses
/// exactly one identity.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: HashMap<TransportId, SessionState>,
}

impl SessionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a transport with the default state.
    pub fn register(&mut self, id: TransportId) -> Result<SessionState, RegistryError> {
        if self.sessions.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }

        let state = SessionState::new();
        self.sessions.insert(id, state);
        Ok(state)
    }

    /// Current state of a registered transport.
    pub fn get(&self, id: TransportId) -> Result<SessionState, RegistryError> {
        self.sessions.get(&id).copied().ok_or(RegistryError::NotRegistered(id))
    }

    /// Replace the state of a registered transport.
    pub fn update(&mut self, id: TransportId, state: SessionState) -> Result<(), RegistryError> {
        let slot = self.sessions.get_mut(&id).ok_or(RegistryError::NotRegistered(id))?;
        *slot = state;
        Ok(())
    }

    /// Drop a transport's entry. `None` if it was not registered.
    pub fn remove(&mut self, id: TransportId) -> Option<SessionState> {
        self.sessions.remove(&id)
    }

    /// Check if a transport is registered.
    pub fn contains(&self, id: TransportId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Number of registered transports.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no transport is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Shared, synchronized handle to a [`SessionTable`].
///
/// Clones share the same table. Every method takes the lock for exactly one
/// table operation, so callers never hold it across an await of their own.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    table: Arc<Mutex<SessionTable>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a transport with the default state (unauthenticated, logon).
    pub async fn register(&self, id: TransportId) -> Result<SessionState, RegistryError> {
        self.table.lock().await.register(id)
    }

    /// Current state of a registered transport.
    pub async fn get(&self, id: TransportId) -> Result<SessionState, RegistryError> {
        self.table.lock().await.get(id)
    }

    /// Replace the state of a registered transport.
    pub async fn update(&self, id: TransportId, state: SessionState) -> Result<(), RegistryError> {
        self.table.lock().await.update(id, state)
    }

    /// Drop a transport's entry. Removing twice is harmless.
    pub async fn remove(&self, id: TransportId) -> Option<SessionState> {
        let removed = self.table.lock().await.remove(id);
        if removed.is_some() {
            tracing::debug!(transport = %id, "session removed from registry");
        }
        removed
    }

    /// Check if a transport is registered.
    pub async fn contains(&self, id: TransportId) -> bool {
        self.table.lock().await.contains(id)
    }

    /// Number of live network sessions.
    pub async fn len(&self) -> usize {
        self.table.lock().await.len()
    }

    /// Whether no network session is live.
    pub async fn is_empty(&self) -> bool {
        self.table.lock().await.is_empty()
    }
}
