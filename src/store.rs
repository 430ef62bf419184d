// src/store.rs
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{Settings, DEFAULT_DATE_FORMAT};
use crate::error::{VotingError, VotingResult};
use crate::models::{NewSession, Session, SessionId, VoteOption};
use crate::poll::{self, SessionResults};

/// Noon UTC on March 15, 2024, the creation time of the sample session.
const SAMPLE_CREATED_TS: i64 = 1_710_504_000;
/// Fixed display date of the sample session, independent of time zone and format.
pub const SAMPLE_CREATED_AT: &str = "March 15, 2024";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    SessionCreated { session_id: SessionId },
    VoteCast { session_id: SessionId, option_id: u32 },
    ResultsRevealed { session_id: SessionId },
}

type Subscriber = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

#[derive(Debug, Default)]
struct State {
    /// Most recent first.
    sessions: Vec<Session>,
    voted: HashSet<SessionId>,
}

impl State {
    fn find(&self, session_id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id == *session_id)
    }

    fn find_mut(&mut self, session_id: &SessionId) -> Option<&mut Session> {
        self.sessions
            .iter_mut()
            .find(|session| session.id == *session_id)
    }
}

/// In-memory voting state shared by every screen of the app.
///
/// Cloning a `VotingStore` hands out another handle onto the same sessions and
/// participation record. All mutations take a single write lock, so vote
/// counters and reveal flags stay monotonic even if handles cross threads.
#[derive(Clone)]
pub struct VotingStore {
    state: Arc<RwLock<State>>,
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    date_format: Arc<str>,
}

impl Default for VotingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VotingStore {
    pub fn new() -> Self {
        Self::with_date_format(DEFAULT_DATE_FORMAT)
    }

    pub fn with_date_format(date_format: &str) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            date_format: Arc::from(date_format),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let store = Self::with_date_format(&settings.date_format);
        if settings.seed_sample {
            store.seed_sample_session();
        }
        store
    }

    /// A store holding the "Best Programming Language" sample session.
    pub fn with_sample_session() -> Self {
        let store = Self::new();
        store.seed_sample_session();
        store
    }

    fn seed_sample_session(&self) {
        let created_ts = DateTime::from_timestamp(SAMPLE_CREATED_TS, 0).unwrap_or_default();
        let mut session = self.build_session(
            "Best Programming Language".to_string(),
            vec!["Python".into(), "JavaScript".into(), "Java".into()],
            true,
            created_ts,
        );
        session.created_at = SAMPLE_CREATED_AT.to_string();
        debug!(session_id = %session.id, "seeded sample session");
        self.write().sessions.push(session);
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn format_date(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&Local).format(&self.date_format).to_string()
    }

    fn build_session(
        &self,
        title: String,
        labels: Vec<String>,
        show_results: bool,
        created_ts: DateTime<Utc>,
    ) -> Session {
        let options = labels
            .into_iter()
            .zip(1u32..)
            .map(|(text, id)| VoteOption { id, text, votes: 0 })
            .collect();

        Session {
            id: SessionId::new(),
            title,
            created_at: self.format_date(created_ts),
            created_ts,
            options,
            show_results,
            results_revealed: false,
        }
    }

    /// Validates the request and places the new session first in the listing.
    pub fn create_session(&self, request: NewSession) -> VotingResult<Session> {
        let (title, labels) = request.validate().inspect_err(|err| {
            warn!(error = %err, "rejected session");
        })?;
        let created_ts = request.created_at.unwrap_or_else(Utc::now);
        let session = self.build_session(title, labels, request.show_results, created_ts);

        self.write().sessions.insert(0, session.clone());
        info!(
            session_id = %session.id,
            title = %session.title,
            options = session.options.len(),
            "session created"
        );

        self.notify(StoreEvent::SessionCreated {
            session_id: session.id,
        });
        Ok(session)
    }

    /// Records one vote for `option_id` and marks the viewer as participating.
    ///
    /// A rejected vote leaves both the counters and the participation record
    /// untouched.
    pub fn cast_vote(&self, session_id: &SessionId, option_id: u32) -> VotingResult<Session> {
        let snapshot = {
            let mut guard = self.write();
            let state = &mut *guard;

            if state.voted.contains(session_id) {
                warn!(session_id = %session_id, "duplicate vote rejected");
                return Err(VotingError::AlreadyVoted(*session_id));
            }

            let session = state
                .find_mut(session_id)
                .ok_or(VotingError::SessionNotFound(*session_id))?;
            let option = session
                .options
                .iter_mut()
                .find(|option| option.id == option_id)
                .ok_or(VotingError::OptionNotFound {
                    session_id: *session_id,
                    option_id,
                })?;
            option.votes = option.votes.saturating_add(1);
            let snapshot = session.clone();

            state.voted.insert(*session_id);
            snapshot
        };

        info!(session_id = %session_id, option_id, "vote recorded");
        self.notify(StoreEvent::VoteCast {
            session_id: *session_id,
            option_id,
        });
        Ok(snapshot)
    }

    pub fn has_voted(&self, session_id: &SessionId) -> bool {
        self.read().voted.contains(session_id)
    }

    pub fn get_session(&self, session_id: &SessionId) -> Option<Session> {
        self.read().find(session_id).cloned()
    }

    /// All sessions, most recently created first.
    pub fn sessions(&self) -> Vec<Session> {
        self.read().sessions.clone()
    }

    pub fn len(&self) -> usize {
        self.read().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().sessions.is_empty()
    }

    /// Irreversibly reveals the results of a session. Repeated calls are no-ops.
    pub fn reveal_results(&self, session_id: &SessionId) -> VotingResult<()> {
        let changed = {
            let mut state = self.write();
            let session = state
                .find_mut(session_id)
                .ok_or(VotingError::SessionNotFound(*session_id))?;
            let changed = !session.results_revealed;
            session.results_revealed = true;
            changed
        };

        if changed {
            info!(session_id = %session_id, "results revealed");
            self.notify(StoreEvent::ResultsRevealed {
                session_id: *session_id,
            });
        }
        Ok(())
    }

    pub fn is_result_revealed(&self, session_id: &SessionId) -> bool {
        self.read()
            .find(session_id)
            .map(|session| session.results_revealed)
            .unwrap_or(false)
    }

    /// Tallied results, available only after `reveal_results`.
    pub fn results(&self, session_id: &SessionId) -> VotingResult<SessionResults> {
        let state = self.read();
        let session = state
            .find(session_id)
            .ok_or(VotingError::SessionNotFound(*session_id))?;
        if !session.results_revealed {
            return Err(VotingError::ResultsHidden(*session_id));
        }
        Ok(poll::tally(session))
    }

    /// Registers a callback run after every successful mutation.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(callback));
    }

    fn notify(&self, event: StoreEvent) {
        // Snapshot so callbacks may use the store, including `subscribe`.
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for subscriber in &subscribers {
            subscriber(&event);
        }
    }
}
