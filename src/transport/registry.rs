use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use super::session::SessionMessage;

/// Open SSE sessions, keyed by session id.
///
/// Each entry is the sending half of the session's inbound queue. Removing
/// an entry drops the last long-lived sender, which ends the session loop.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<Uuid, mpsc::Sender<SessionMessage>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: Uuid, inbound: mpsc::Sender<SessionMessage>) {
        self.lock().insert(id, inbound);
    }

    /// Sender for an open session, if any.
    pub fn get(&self, id: &Uuid) -> Option<mpsc::Sender<SessionMessage>> {
        self.lock().get(id).cloned()
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register `id` and return a guard that unregisters it when dropped.
    pub fn register(&self, id: Uuid, inbound: mpsc::Sender<SessionMessage>) -> SessionGuard {
        self.insert(id, inbound);
        SessionGuard {
            registry: self.clone(),
            id,
        }
    }

    // The map is never left half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, mpsc::Sender<SessionMessage>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps a session registered for as long as its event stream is alive.
#[derive(Debug)]
pub struct SessionGuard {
    registry: SessionRegistry,
    id: Uuid,
}

impl SessionGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.registry.remove(&self.id) {
            info!(session_id = %self.id.simple(), "SSE session closed");
        }
    }
}
