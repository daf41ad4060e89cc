//! Session / cancellation registry.
//!
//! Maps an external session id to the cancellation token of the run it
//! started. One registry is constructed per process and shared via `Arc`
//! between whoever starts runs and whoever stops them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::instrument;

/// Cooperative cancellation flag.
///
/// Cloning shares the flag. Signalling is lock-free and idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Whether both tokens share the same flag.
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Table of active sessions.
///
/// The internal lock is held only while the table is read or written;
/// tokens themselves are observed and signalled without it.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, CancelToken>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fresh token for `session_id`.
    ///
    /// A previous run registered under the same id is signalled and
    /// replaced. The returned guard releases the entry when dropped.
    pub fn start(self: &Arc<Self>, session_id: &str) -> SessionGuard {
        let token = CancelToken::new();
        let previous = self.lock().insert(session_id.to_owned(), token.clone());
        if let Some(previous) = previous {
            tracing::warn!(session_id, "Replacing active session");
            previous.cancel();
        }
        SessionGuard {
            registry: Arc::clone(self),
            session_id: session_id.to_owned(),
            token,
        }
    }

    /// Signals and removes the token for `session_id`.
    ///
    /// Returns `false` if no such session is active, which is not an error:
    /// the run may already have finished.
    #[instrument(skip(self))]
    pub fn stop(&self, session_id: &str) -> bool {
        match self.lock().remove(session_id) {
            Some(token) => {
                token.cancel();
                tracing::info!("Session stop requested");
                true
            }
            None => {
                tracing::debug!("Stop requested for unknown session");
                false
            }
        }
    }

    /// Whether a run is registered under `session_id`.
    pub fn is_active(&self, session_id: &str) -> bool {
        self.lock().contains_key(session_id)
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes the entry only if it still holds `token`.
    fn release(&self, session_id: &str, token: &CancelToken) -> bool {
        let mut sessions = self.lock();
        match sessions.get(session_id) {
            Some(current) if current.same_as(token) => {
                sessions.remove(session_id);
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CancelToken>> {
        // The table stays consistent even if a holder panicked.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ownership of one registry entry.
///
/// Dropping the guard removes the entry unless a stop request or a newer
/// run under the same id already did, so the entry is released exactly once.
#[derive(Debug)]
pub struct SessionGuard {
    registry: Arc<SessionRegistry>,
    session_id: String,
    token: CancelToken,
}

impl SessionGuard {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.registry.release(&self.session_id, &self.token) {
            tracing::debug!(session_id = %self.session_id, "Session released");
        }
    }
}
