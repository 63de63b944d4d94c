//! Session Management
//!
//! Owns one `SessionState` per user session. Each state sits behind its own
//! mutex so turns of one session run strictly one at a time while different
//! sessions proceed independently.

use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use ovacare_agent::SessionState;
use ovacare_config::SessionConfig;

use crate::ServerError;

static SESSION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("session id pattern is valid"));

/// Client-supplied session ids must be short and URL-safe
pub fn is_valid_session_id(id: &str) -> bool {
    SESSION_ID.is_match(id)
}

/// A user session
pub struct Session {
    /// Session ID
    pub id: String,
    /// Questionnaire state
    state: Mutex<SessionState>,
    /// Last activity
    last_activity: RwLock<Instant>,
    /// Is active
    active: RwLock<bool>,
}

impl Session {
    /// Create a new session
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Mutex::new(SessionState::new()),
            last_activity: RwLock::new(Instant::now()),
            active: RwLock::new(true),
        }
    }

    /// Run `f` with exclusive access to the session state
    pub fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.lock();
        f(&mut state)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    /// Update last activity time
    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    /// Check if session is expired
    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.read().elapsed() > timeout
    }

    /// Close session
    pub fn close(&self) {
        *self.active.write() = false;
    }

    /// Check if session is active
    pub fn is_active(&self) -> bool {
        *self.active.read()
    }
}

/// Session manager
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    max_sessions: usize,
    session_timeout: Duration,
    cleanup_interval: Duration,
}

impl SessionManager {
    /// Create a new session manager with default timeouts
    pub fn new(max_sessions: usize) -> Self {
        Self::with_config(
            max_sessions,
            Duration::from_secs(1800),
            Duration::from_secs(60),
        )
    }

    /// Create a new session manager with custom timeout and cleanup interval
    pub fn with_config(
        max_sessions: usize,
        session_timeout: Duration,
        cleanup_interval: Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            session_timeout,
            cleanup_interval,
        }
    }

    pub fn from_settings(config: &SessionConfig) -> Self {
        Self::with_config(
            config.max_sessions,
            Duration::from_secs(config.timeout_seconds),
            Duration::from_secs(config.cleanup_interval_seconds),
        )
    }

    /// Start a background task that periodically removes expired sessions
    ///
    /// Send `true` on the returned channel to stop it.
    pub fn start_cleanup_task(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = manager.cleanup_interval;

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        let removed = manager.cleanup_expired();
                        if removed > 0 {
                            tracing::info!(
                                removed,
                                remaining = manager.count(),
                                "Session cleanup"
                            );
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            tracing::info!("Session cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    /// Create a new session with a generated id
    pub fn create(&self) -> Result<Arc<Session>, ServerError> {
        let id = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write();
        self.insert_locked(&mut sessions, id)
    }

    /// Get a session, creating it on first interaction
    ///
    /// Returns the session and whether it was created by this call.
    pub fn get_or_create(&self, id: &str) -> Result<(Arc<Session>, bool), ServerError> {
        if let Some(session) = self.get(id) {
            return Ok((session, false));
        }

        let mut sessions = self.sessions.write();
        // Another request may have created it between the read and the write lock
        if let Some(session) = sessions.get(id) {
            return Ok((session.clone(), false));
        }
        let session = self.insert_locked(&mut sessions, id.to_string())?;
        Ok((session, true))
    }

    fn insert_locked(
        &self,
        sessions: &mut HashMap<String, Arc<Session>>,
        id: String,
    ) -> Result<Arc<Session>, ServerError> {
        if sessions.len() >= self.max_sessions {
            self.cleanup_expired_internal(sessions);

            if sessions.len() >= self.max_sessions {
                tracing::warn!(max_sessions = self.max_sessions, "Session capacity reached");
                return Err(ServerError::CapacityExceeded);
            }
        }

        let session = Arc::new(Session::new(id.clone()));
        sessions.insert(id.clone(), session.clone());
        tracing::info!(session_id = %id, "Created session");

        Ok(session)
    }

    /// Get a session by ID
    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(id).cloned()
    }

    /// Remove a session; returns whether it existed
    pub fn remove(&self, id: &str) -> bool {
        match self.sessions.write().remove(id) {
            Some(session) => {
                session.close();
                tracing::info!(session_id = %id, "Removed session");
                true
            }
            None => false,
        }
    }

    /// Get session count
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Remove expired sessions; returns how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write();
        self.cleanup_expired_internal(&mut sessions)
    }

    fn cleanup_expired_internal(&self, sessions: &mut HashMap<String, Arc<Session>>) -> usize {
        let timeout = self.session_timeout;
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, s)| s.is_expired(timeout))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            if let Some(session) = sessions.remove(id) {
                session.close();
                tracing::info!(session_id = %id, "Expired session");
            }
        }
        expired.len()
    }

    /// List all session IDs
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }
}
