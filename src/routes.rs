// src/routes.rs
use thiserror::Error;

use crate::models::SessionId;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Show(SessionId),
    Create { title: String, options: Vec<String> },
    Vote { session_id: SessionId, option_id: u32 },
    Voted(SessionId),
    Reveal(SessionId),
    Results(SessionId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid session id `{0}`")]
    BadSessionId(String),
    #[error("invalid option id `{0}`")]
    BadOptionId(String),
}

pub const HELP: &[&str] = &[
    "list",
    "show <session>",
    "create <title> | <option> | <option> [| <option> ...]",
    "vote <session> <option>",
    "voted <session>",
    "reveal <session>",
    "results <session>",
    "help",
    "quit",
];

fn session_arg(raw: Option<&str>, usage: &'static str) -> Result<SessionId, ParseError> {
    let raw = raw.ok_or(ParseError::Usage(usage))?;
    raw.parse()
        .map_err(|_| ParseError::BadSessionId(raw.to_string()))
}

/// Parses one shell line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "show" => Command::Show(session_arg(args.next(), HELP[1])?),
        "create" => {
            let mut parts = rest.split('|').map(str::trim);
            let title = parts.next().unwrap_or_default();
            if title.is_empty() {
                return Err(ParseError::Usage(HELP[2]));
            }
            Command::Create {
                title: title.to_string(),
                options: parts.map(str::to_string).collect(),
            }
        }
        "vote" => {
            let session_id = session_arg(args.next(), HELP[3])?;
            let raw = args.next().ok_or(ParseError::Usage(HELP[3]))?;
            let option_id = raw
                .parse()
                .map_err(|_| ParseError::BadOptionId(raw.to_string()))?;
            Command::Vote {
                session_id,
                option_id,
            }
        }
        "voted" => Command::Voted(session_arg(args.next(), HELP[4])?),
        "reveal" => Command::Reveal(session_arg(args.next(), HELP[5])?),
        "results" => Command::Results(session_arg(args.next(), HELP[6])?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
