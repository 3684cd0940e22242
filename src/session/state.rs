//! Session State Management
//!
//! This module holds every live session in memory. Sessions are created on
//! request and dropped when ended, when left idle past the configured
//! timeout, or when the process exits; nothing is persisted.

use super::{context::Session, helpers::format_item_summary};
use crate::error::{OfferError, OfferResult};
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing the live sessions
#[derive(Default)]
pub struct AppState {
    /// In-memory storage for sessions, keyed by session id.
    /// DashMap allows concurrent access without external Mutexes.
    pub sessions: DashMap<String, Session>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new empty session and returns its id
    pub fn create_session(&self, session_id: String) -> String {
        self.sessions
            .insert(session_id.clone(), Session::new(session_id.clone()));
        tracing::info!(session = %session_id, live = self.sessions.len(), "Session started");
        session_id
    }

    /// Drops a session; returns `false` if it did not exist
    pub fn end_session(&self, session_id: &str) -> bool {
        match self.sessions.remove(session_id) {
            Some((_, session)) => {
                tracing::info!(
                    session = %session_id,
                    age_secs = session.age(Utc::now()).num_seconds(),
                    offer = %format_item_summary(session.cart().items()),
                    "Session ended"
                );
                true
            }
            None => false,
        }
    }

    /// Runs `f` against a session for reading.
    ///
    /// Reads count as activity, so the entry lock is taken exclusively to
    /// refresh the idle clock.
    pub fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&Session) -> OfferResult<T>,
    ) -> OfferResult<T> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| OfferError::session_not_found(session_id))?;
        session.touch(Utc::now());
        f(&*session)
    }

    /// Runs `f` against a session under its exclusive entry lock.
    ///
    /// Every mutation made by `f` becomes visible to other readers at once,
    /// when the lock is released.
    pub fn with_session_mut<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut Session) -> OfferResult<T>,
    ) -> OfferResult<T> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| OfferError::session_not_found(session_id))?;
        session.touch(Utc::now());
        f(&mut *session)
    }

    /// Drops sessions idle for longer than `max_idle` at `now`; returns how many
    pub fn purge_idle(&self, max_idle: TimeDelta, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|id, session| {
            let keep = session.idle_for(now) <= max_idle;
            if !keep {
                tracing::info!(session = %id, age_secs = session.age(now).num_seconds(), "Session expired");
            }
            keep
        });
        before.saturating_sub(self.sessions.len())
    }
}
