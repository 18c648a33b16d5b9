// src/store/sessions.rs

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::models::user::User;

/// A logged-in identity, held outside the user directory.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: User,
    pub started_at: DateTime<Utc>,
}

/// Live sessions by opaque session id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, Session>,
}

impl SessionStore {
    pub fn open(&mut self, identity: User) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            Session {
                identity,
                started_at: Utc::now(),
            },
        );
        id
    }

    pub fn current(&self, id: Uuid) -> Option<&Session> {
        self.sessions.get(&id)
    }

    /// Ends the session; returns whether it existed.
    pub fn close(&mut self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Drops sessions started more than `ttl` before `now` and returns their ids.
    pub fn purge_expired(&mut self, now: DateTime<Utc>, ttl: TimeDelta) -> Vec<Uuid> {
        let expired: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|(_, s)| s.started_at.checked_add_signed(ttl).is_some_and(|end| end <= now))
            .map(|(id, _)| *id)
            .collect();
        for id in &expired {
            self.sessions.remove(id);
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
