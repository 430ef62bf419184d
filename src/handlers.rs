// src/handlers.rs
use serde_json::{json, Value};

use crate::error::VotingError;
use crate::models::{NewSession, SessionId};
use crate::routes::{Command, HELP};
use crate::store::VotingStore;

fn error_body(err: &VotingError) -> Value {
    json!({ "error": err.to_string(), "code": err.code() })
}

/// Session listing with per-session tallies, as the created-votes screen shows it.
pub fn list_sessions(store: &VotingStore) -> Value {
    let sessions: Vec<Value> = store
        .sessions()
        .iter()
        .map(|session| {
            json!({
                "id": session.id,
                "title": session.title,
                "created_at": session.created_at,
                "options": session.options.len(),
                "total_votes": session.total_votes(),
                "results_revealed": session.results_revealed,
                "has_voted": store.has_voted(&session.id),
            })
        })
        .collect();
    json!({ "sessions": sessions })
}

pub fn show_session(store: &VotingStore, session_id: &SessionId) -> Value {
    match store.get_session(session_id) {
        Some(session) => json!({
            "session": session,
            "has_voted": store.has_voted(session_id),
        }),
        None => error_body(&VotingError::SessionNotFound(*session_id)),
    }
}

pub fn create_session(store: &VotingStore, title: String, options: Vec<String>) -> Value {
    match store.create_session(NewSession::new(title, options)) {
        Ok(session) => json!({ "status": "Voting session created successfully", "session": session }),
        Err(err) => error_body(&err),
    }
}

pub fn vote(store: &VotingStore, session_id: &SessionId, option_id: u32) -> Value {
    match store.cast_vote(session_id, option_id) {
        Ok(_) => json!({ "status": "Vote recorded", "session_id": session_id, "option_id": option_id }),
        Err(err) => error_body(&err),
    }
}

pub fn reveal(store: &VotingStore, session_id: &SessionId) -> Value {
    match store.reveal_results(session_id) {
        Ok(()) => json!({ "status": "Results revealed", "session_id": session_id }),
        Err(err) => error_body(&err),
    }
}

pub fn results(store: &VotingStore, session_id: &SessionId) -> Value {
    match store.results(session_id) {
        Ok(results) => json!({ "results": results }),
        Err(err) => error_body(&err),
    }
}

/// Runs a parsed command. `Quit` only acknowledges; ending the session is up to the caller.
pub fn dispatch(store: &VotingStore, command: Command) -> Value {
    match command {
        Command::List => list_sessions(store),
        Command::Show(session_id) => show_session(store, &session_id),
        Command::Create { title, options } => create_session(store, title, options),
        Command::Vote {
            session_id,
            option_id,
        } => vote(store, &session_id, option_id),
        Command::Voted(session_id) => json!({
            "session_id": session_id,
            "has_voted": store.has_voted(&session_id),
        }),
        Command::Reveal(session_id) => reveal(store, &session_id),
        Command::Results(session_id) => results(store, &session_id),
        Command::Help => json!({ "commands": HELP }),
        Command::Quit => json!({ "status": "bye" }),
    }
}
