//! Process-local conversation sessions
//!
//! Sessions are created lazily on first reference, destroyed on explicit
//! deletion or process exit, and hold a mutable JSON state blob that the
//! context builder and the agent executor read and write.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// A single conversation session
#[derive(Debug, Clone)]
pub struct Session {
    /// Caller-supplied session identifier
    pub session_id: String,
    /// Mutable key-value state for this conversation
    pub state: Map<String, Value>,
    /// When this session was first referenced
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            state: Map::new(),
            created_at: Utc::now(),
        }
    }
}

/// Registry of active sessions, keyed by session id.
///
/// Process-wide, in-memory state with no expiry policy and no persistence
/// across restarts. Owned by the service instance and injected into request
/// handlers rather than referenced as a global.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<RwLock<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an existing session or create it on first reference
    pub async fn get_or_create(&self, session_id: &str) -> Arc<RwLock<Session>> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                info!("Created new session: {}", session_id);
                Arc::new(RwLock::new(Session::new(session_id)))
            })
            .clone()
    }

    /// Get a session without creating it
    pub async fn get(&self, session_id: &str) -> Option<Arc<RwLock<Session>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Delete a session, reporting whether it existed
    pub async fn remove(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(session_id).is_some();
        if removed {
            debug!("Deleted session: {}", session_id);
        }
        removed
    }

    /// Ids of all active sessions
    pub async fn session_ids(&self) -> Vec<String> {
        let sessions = self.sessions.read().await;
        sessions.keys().cloned().collect()
    }

    /// Number of active sessions
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_reuses_sessions() {
        let registry = SessionRegistry::new();

        let first = registry.get_or_create("s1").await;
        first.write().await.state.insert(
            "marker".to_string(),
            serde_json::Value::String("kept".to_string()),
        );

        let second = registry.get_or_create("s1").await;
        assert_eq!(
            second.read().await.state.get("marker"),
            Some(&serde_json::Value::String("kept".to_string()))
        );
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let registry = SessionRegistry::new();
        registry.get_or_create("s1").await;

        assert!(registry.remove("s1").await);
        assert!(!registry.remove("s1").await);
        assert!(registry.get("s1").await.is_none());
        assert!(registry.is_empty().await);
    }
}
