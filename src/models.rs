// src/models.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{VotingError, VotingResult};

pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOption {
    pub id: u32,
    pub text: String,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    /// Long-form creation date, e.g. "March 15, 2024".
    pub created_at: String,
    pub created_ts: DateTime<Utc>,
    pub options: Vec<VoteOption>,
    pub show_results: bool,
    pub results_revealed: bool,
}

impl Session {
    pub fn option(&self, option_id: u32) -> Option<&VoteOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|option| option.votes).sum()
    }
}

/// Creation request for a session. Labels are raw user input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSession {
    pub title: String,
    pub options: Vec<String>,
    #[serde(default = "default_show_results")]
    pub show_results: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_show_results() -> bool {
    true
}

impl NewSession {
    pub fn new<T, I, S>(title: T, options: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            options: options.into_iter().map(Into::into).collect(),
            show_results: true,
            created_at: None,
        }
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Trims the title and labels, drops blank labels and checks the minimums.
    pub fn validate(&self) -> VotingResult<(String, Vec<String>)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(VotingError::EmptyTitle);
        }

        let options: Vec<String> = self
            .options
            .iter()
            .map(|label| label.trim())
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect();
        if options.len() < MIN_OPTIONS {
            return Err(VotingError::TooFewOptions(options.len()));
        }

        Ok((title.to_string(), options))
    }
}
