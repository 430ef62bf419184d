// src/lib.rs
//! In-memory voting state: sessions, one vote per viewer per session, and
//! results that stay hidden until explicitly revealed.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod poll;
pub mod routes;
pub mod store;

pub use config::Settings;
pub use error::{VotingError, VotingResult};
pub use models::{NewSession, Session, SessionId, VoteOption};
pub use poll::{PollResult, SessionResults};
pub use store::{StoreEvent, VotingStore};
