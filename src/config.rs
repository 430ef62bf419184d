// src/config.rs
use std::env;

use chrono::format::{Item, StrftimeItems};
use tracing::warn;

pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Seed the store with the sample "Best Programming Language" session.
    pub seed_sample: bool,
    /// chrono strftime pattern used for `Session::created_at`.
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_sample: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(raw) = lookup("VOTING_SEED_SAMPLE") {
            match parse_flag(&raw) {
                Some(flag) => settings.seed_sample = flag,
                None => warn!(value = %raw, "ignoring invalid VOTING_SEED_SAMPLE"),
            }
        }

        if let Some(raw) = lookup("VOTING_DATE_FORMAT") {
            if is_valid_date_format(&raw) {
                settings.date_format = raw;
            } else {
                warn!(value = %raw, "ignoring invalid VOTING_DATE_FORMAT");
            }
        }

        settings
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn is_valid_date_format(pattern: &str) -> bool {
    !pattern.trim().is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}
