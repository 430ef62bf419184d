// src/main.rs
use std::io::{self, BufRead, Write};

use dotenvy::dotenv;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use voting_store::routes::{self, Command};
use voting_store::{handlers, Settings, VotingStore};

fn main() -> io::Result<()> {
    dotenv().ok(); // Load environment variables from .env file

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voting_store=info")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = Settings::from_env();
    let store = VotingStore::from_settings(&settings);
    store.subscribe(|event| debug!(?event, "store changed"));
    info!(sessions = store.len(), "voting store ready, type `help` for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let response = match routes::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => handlers::dispatch(&store, command),
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        let rendered = serde_json::to_string_pretty(&response).map_err(io::Error::other)?;
        writeln!(stdout, "{rendered}")?;
        stdout.flush()?;
    }

    Ok(())
}
