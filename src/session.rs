use crate::state::SessionState;
use log::info;
use std::collections::HashMap;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session";

struct Entry {
    state: SessionState,
    expires_at: SystemTime,
}

/// Isolated per-user session states, keyed by a random id.
///
/// A session expires after `ttl` without access. Expired sessions are dropped
/// on the next access to the store.
pub struct SessionStore {
    sessions: HashMap<String, Entry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        SessionStore {
            sessions: HashMap::new(),
            ttl,
        }
    }

    /// Look up the session `id`, or start a new one from `init` when the id is
    /// absent, unknown or expired. Returns the id to hand back to the client.
    pub fn resolve(
        &mut self,
        id: Option<&str>,
        init: impl FnOnce() -> SessionState,
    ) -> (String, &mut SessionState) {
        self.purge_expired();

        let id = match id {
            Some(id) if self.sessions.contains_key(id) => id.to_string(),
            _ => {
                let id = Uuid::new_v4().to_string();
                info!("starting session {}", id);
                id
            }
        };

        let expires_at = SystemTime::now() + self.ttl;
        let entry = self.sessions.entry(id.clone()).or_insert_with(|| Entry {
            state: init(),
            expires_at,
        });
        entry.expires_at = expires_at;

        (id, &mut entry.state)
    }

    /// The live session `id`, if any. Does not extend its expiry.
    pub fn get(&self, id: &str) -> Option<&SessionState> {
        self.sessions
            .get(id)
            .filter(|entry| entry.expires_at > SystemTime::now())
            .map(|entry| &entry.state)
    }

    /// Drop expired sessions and return how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = SystemTime::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| entry.expires_at > now);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Page;

    #[test]
    fn known_id_returns_same_state() {
        let mut store = SessionStore::new(Duration::from_secs(60));
        let (id, state) = store.resolve(None, SessionState::default);
        state.page = Page::Search;

        let (again, state) = store.resolve(Some(&id), || panic!("must not re-init"));
        assert_eq!(again, id);
        assert_eq!(state.page, Page::Search);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_sees_only_live_sessions() {
        let mut store = SessionStore::new(Duration::from_secs(60));
        let (id, state) = store.resolve(None, SessionState::default);
        state.page = Page::Statistics;
        assert_eq!(store.get(&id).map(|s| s.page), Some(Page::Statistics));
        assert!(store.get("forged").is_none());

        let mut expired = SessionStore::new(Duration::ZERO);
        let (id, _) = expired.resolve(None, SessionState::default);
        assert!(expired.get(&id).is_none());
    }

    #[test]
    fn unknown_id_starts_fresh_session() {
        let mut store = SessionStore::new(Duration::from_secs(60));
        let (id, _) = store.resolve(Some("forged"), SessionState::default);
        assert_ne!(id, "forged");
    }

    #[test]
    fn sessions_are_isolated() {
        let mut store = SessionStore::new(Duration::from_secs(60));
        let (first, state) = store.resolve(None, SessionState::default);
        state.page = Page::Add;
        let (second, state) = store.resolve(None, SessionState::default);
        assert_ne!(first, second);
        assert_eq!(state.page, Page::Welcome);
    }

    #[test]
    fn expired_sessions_are_purged() {
        let mut store = SessionStore::new(Duration::ZERO);
        let (id, _) = store.resolve(None, SessionState::default);
        assert_eq!(store.purge_expired(), 1);
        let (fresh, _) = store.resolve(Some(&id), SessionState::default);
        assert_ne!(fresh, id);
    }
}
