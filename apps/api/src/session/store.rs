use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::session::quiz_session::QuizSession;

pub const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Default)]
struct Sessions {
    by_id: HashMap<Uuid, Arc<QuizSession>>,
    /// Insertion order, oldest first.
    order: VecDeque<Uuid>,
}

/// In-memory registry of live sessions, cloned into `AppState`.
/// Holds at most `capacity` sessions; a full store drops its oldest one.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<Sessions>>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Sessions::default())),
            capacity: capacity.max(1),
        }
    }

    pub async fn insert(&self, session: QuizSession) -> Arc<QuizSession> {
        let session = Arc::new(session);
        let mut sessions = self.sessions.write().await;

        while sessions.by_id.len() >= self.capacity {
            let Some(oldest) = sessions.order.pop_front() else {
                break;
            };
            if sessions.by_id.remove(&oldest).is_some() {
                info!("Session store full, evicted session {oldest}");
            }
        }

        sessions.order.push_back(session.id());
        sessions.by_id.insert(session.id(), Arc::clone(&session));
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<QuizSession>> {
        self.sessions.read().await.by_id.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.by_id.remove(&id).is_some();
        if removed {
            sessions.order.retain(|&s| s != id);
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.by_id.len()
    }
}
