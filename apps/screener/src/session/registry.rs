use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::session::machine::Session;

pub type SessionId = Uuid;

/// Shared handle to one session. Each session has its own lock.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Live sessions keyed by id. Sessions never share state; the map lock is only held
/// long enough to insert, look up or remove a handle.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh session at the greeting stage.
    pub async fn open(&self) -> SessionId {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new(id)));
        self.sessions.write().await.insert(id, handle);
        debug!("Opened session {id}");
        id
    }

    pub async fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drops a finished or abandoned session. Returns whether it was present.
    pub async fn close(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            debug!("Closed session {id}");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::models::IntakeForm;
    use crate::session::stage::Stage;

    #[tokio::test]
    async fn test_open_get_close() {
        let registry = SessionRegistry::new();
        let id = registry.open().await;

        assert_eq!(registry.len().await, 1);
        let handle = registry.get(id).await.unwrap();
        assert_eq!(handle.lock().await.id(), id);

        assert!(registry.close(id).await);
        assert!(!registry.close(id).await);
        assert!(registry.get(id).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = SessionRegistry::new();
        let a = registry.open().await;
        let b = registry.open().await;
        let handle_a = registry.get(a).await.unwrap();
        assert_ne!(a, b);

        {
            let mut session = handle_a.lock().await;
            session.greet().unwrap();
            assert!(session.submit_form(&IntakeForm::default()).is_err());
        }

        let handle_b = registry.get(b).await.unwrap();
        assert_eq!(handle_a.lock().await.stage(), Stage::Form);
        assert_eq!(handle_b.lock().await.stage(), Stage::Greeting);
    }

    #[tokio::test]
    async fn test_holding_one_session_does_not_block_another() {
        let registry = SessionRegistry::new();
        let a = registry.open().await;
        let b = registry.open().await;
        let handle_a = registry.get(a).await.unwrap();

        let _guard_a = handle_a.lock().await;
        let handle_b = registry.get(b).await.unwrap();
        assert!(handle_b.try_lock().is_ok());
    }
}
