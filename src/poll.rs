// src/poll.rs
use serde::Serialize;

use crate::models::{Session, SessionId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollResult {
    pub option_id: u32,
    pub text: String,
    pub votes: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResults {
    pub session_id: SessionId,
    pub title: String,
    pub total_votes: u64,
    pub options: Vec<PollResult>,
    pub winner: Option<PollResult>,
}

fn percentage(votes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    votes as f64 / total as f64 * 100.0
}

/// Tallies a session snapshot, most votes first. Ties go to the lowest option id,
/// so the winner is always the first entry.
pub fn tally(session: &Session) -> SessionResults {
    let total_votes = session.total_votes();
    let mut options: Vec<PollResult> = session
        .options
        .iter()
        .map(|option| PollResult {
            option_id: option.id,
            text: option.text.clone(),
            votes: option.votes,
            percentage: percentage(option.votes, total_votes),
        })
        .collect();
    options.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.option_id.cmp(&b.option_id)));

    let winner = if total_votes == 0 {
        None
    } else {
        options.first().cloned()
    };

    SessionResults {
        session_id: session.id,
        title: session.title.clone(),
        total_votes,
        options,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VoteOption;
    use chrono::Utc;

    fn session_with_votes(votes: &[u64]) -> Session {
        Session {
            id: SessionId::new(),
            title: "Languages".to_string(),
            created_at: "March 15, 2024".to_string(),
            created_ts: Utc::now(),
            options: votes
                .iter()
                .enumerate()
                .map(|(index, votes)| VoteOption {
                    id: index as u32 + 1,
                    text: format!("Option {}", index + 1),
                    votes: *votes,
                })
                .collect(),
            show_results: true,
            results_revealed: true,
        }
    }

    #[test]
    fn percentages_follow_vote_share() {
        let results = tally(&session_with_votes(&[45, 30, 15, 10]));
        assert_eq!(results.total_votes, 100);
        let shares: Vec<f64> = results.options.iter().map(|o| o.percentage).collect();
        assert_eq!(shares, vec![45.0, 30.0, 15.0, 10.0]);
        assert_eq!(results.winner.map(|w| w.option_id), Some(1));
    }

    #[test]
    fn empty_session_has_no_winner() {
        let results = tally(&session_with_votes(&[0, 0]));
        assert_eq!(results.total_votes, 0);
        assert!(results.options.iter().all(|o| o.percentage == 0.0));
        assert!(results.winner.is_none());
    }

    #[test]
    fn options_are_ranked_by_votes() {
        let results = tally(&session_with_votes(&[2, 7, 0, 7]));
        let order: Vec<u32> = results.options.iter().map(|o| o.option_id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
        assert_eq!(results.winner.as_ref(), results.options.first());
    }

    #[test]
    fn tie_goes_to_earliest_option() {
        let results = tally(&session_with_votes(&[1, 3, 3]));
        assert_eq!(results.winner.map(|w| w.option_id), Some(2));
    }
}
