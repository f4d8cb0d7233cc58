// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tokio::{sync::RwLock, task::JoinHandle};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: Instant,
}

/// A history entry in the shape the model expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub messages: Vec<Message>,
    pub last_active: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), messages: Vec::new(), last_active: Instant::now() }
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_active) > ttl
    }
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
    max_history: usize,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .field("max_history", &self.max_history)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration, max_history: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_history,
        }
    }

    // Create a fresh session and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), Session::new(id.clone()));
        id
    }

    // Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard.entry(id.to_string()).or_insert_with(|| Session::new(id));
        id.to_string()
    }

    /// Append a message, dropping the oldest ones beyond `max_history`.
    /// An idle session is reset first. Returns the history length afterwards.
    pub async fn append_message(&self, session_id: &str, role: MessageRole, content: impl Into<String>) -> usize {
        let mut guard = self.inner.write().await;
        let entry = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id));
        if entry.is_expired(Instant::now(), self.ttl) {
            *entry = Session::new(session_id);
        }
        entry.messages.push(Message {
            role,
            content: content.into(),
            timestamp: Instant::now(),
        });
        if entry.messages.len() > self.max_history {
            let excess = entry.messages.len() - self.max_history;
            entry.messages.drain(..excess);
        }
        entry.last_active = Instant::now();
        entry.messages.len()
    }

    /// History formatted for the model. A session idle past its ttl starts
    /// over with an empty history.
    pub async fn get_context(&self, session_id: &str) -> Vec<ContextMessage> {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let entry = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id));
        if entry.is_expired(now, self.ttl) {
            tracing::debug!(session_id, "context expired, starting over");
            *entry = Session::new(session_id);
        }
        entry
            .messages
            .iter()
            .map(|m| ContextMessage { role: m.role, content: m.content.clone() })
            .collect()
    }

    /// Get a copy of the session history
    pub async fn get_history(&self, session_id: &str) -> Option<Vec<Message>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.messages.clone())
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| !s.is_expired(now, self.ttl));
        before - guard.len()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Run `purge_expired` every `interval` until the task is aborted.
    pub fn spawn_cleaner(&self, interval: Duration) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = manager.purge_expired().await;
                if removed > 0 {
                    tracing::info!(removed, "purged expired sessions");
                }
            }
        })
    }
}
