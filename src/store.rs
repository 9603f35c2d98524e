use crate::models::{PromptOutcome, Session};
use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use uuid::Uuid;
use chrono::Utc;

/// Per-session single-slot result holder. Each session owns exactly one
/// outcome slot; `set_result` replaces it whole, last write wins.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            request_count: 0,
            in_flight: false,
            outcome: None,
        };
        self.inner.write().insert(session.id, session.clone());
        session
    }

    pub fn get(&self, id: Uuid) -> Option<Session> {
        self.inner.read().get(&id).cloned()
    }

    /// Marks the session busy and bumps its submission counter. Returns
    /// `Some(false)` when a request is already outstanding, `None` for an
    /// unknown session.
    pub fn begin_request(&self, id: Uuid) -> Option<bool> {
        let mut guard = self.inner.write();
        let session = guard.get_mut(&id)?;
        if session.in_flight {
            return Some(false);
        }
        session.in_flight = true;
        session.request_count += 1;
        Some(true)
    }

    /// Unconditionally replaces the slot and releases the in-flight mark.
    pub fn set_result(&self, id: Uuid, outcome: PromptOutcome) {
        if let Some(session) = self.inner.write().get_mut(&id) {
            session.outcome = Some(outcome);
            session.in_flight = false;
        }
    }

    /// Resets the slot to empty. No network interaction, input state is the
    /// page's concern.
    pub fn clear(&self, id: Uuid) -> bool {
        match self.inner.write().get_mut(&id) {
            Some(session) => {
                session.outcome = None;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EnhancedPrompt;
    use pretty_assertions::assert_eq;

    fn outcome(final_prompt: &str) -> PromptOutcome {
        PromptOutcome::Enhanced(EnhancedPrompt {
            final_prompt: final_prompt.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_session_starts_empty() {
        let store = SessionStore::new();
        let session = store.create();

        assert_eq!(session.request_count, 0);
        assert!(!session.in_flight);
        assert_eq!(store.get(session.id).unwrap().outcome, None);
    }

    #[test]
    fn test_set_get_clear_round_trip() {
        let store = SessionStore::new();
        let id = store.create().id;

        store.set_result(id, outcome("A cowboy."));
        assert_eq!(store.get(id).unwrap().outcome, Some(outcome("A cowboy.")));

        assert!(store.clear(id));
        assert_eq!(store.get(id).unwrap().outcome, None);
    }

    #[test]
    fn test_set_result_replaces_never_merges() {
        let store = SessionStore::new();
        let id = store.create().id;

        store.set_result(id, outcome("first"));
        store.set_result(id, PromptOutcome::failed("second"));

        assert_eq!(
            store.get(id).unwrap().outcome,
            Some(PromptOutcome::failed("second"))
        );
    }

    #[test]
    fn test_begin_request_refuses_second_in_flight_submission() {
        let store = SessionStore::new();
        let id = store.create().id;

        assert_eq!(store.begin_request(id), Some(true));
        assert_eq!(store.begin_request(id), Some(false));

        // The refused trigger must not count as a submission.
        assert_eq!(store.get(id).unwrap().request_count, 1);

        store.set_result(id, outcome("done"));
        assert_eq!(store.begin_request(id), Some(true));
        assert_eq!(store.get(id).unwrap().request_count, 2);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();

        assert_eq!(store.begin_request(id), None);
        assert!(!store.clear(id));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let a = store.create().id;
        let b = store.create().id;

        store.set_result(a, outcome("for a"));

        assert_eq!(store.get(a).unwrap().outcome, Some(outcome("for a")));
        assert_eq!(store.get(b).unwrap().outcome, None);
    }
}
