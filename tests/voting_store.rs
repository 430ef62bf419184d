//! Store-level behaviour seen through the public API.

use std::sync::Arc;
use std::thread;

use voting_store::{NewSession, SessionId, VotingError, VotingStore};

fn pizza(store: &VotingStore) -> SessionId {
    store
        .create_session(NewSession::new(
            "Best Pizza Topping",
            ["Pepperoni", "Mushroom", "Pineapple"],
        ))
        .unwrap()
        .id
}

#[test]
fn new_session_has_sequential_zeroed_options() {
    let store = VotingStore::new();
    let id = pizza(&store);
    let session = store.get_session(&id).unwrap();

    assert_eq!(session.title, "Best Pizza Topping");
    let ids: Vec<u32> = session.options.iter().map(|o| o.id).collect();
    let votes: Vec<u64> = session.options.iter().map(|o| o.votes).collect();
    let labels: Vec<&str> = session.options.iter().map(|o| o.text.as_str()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(votes, vec![0, 0, 0]);
    assert_eq!(labels, vec!["Pepperoni", "Mushroom", "Pineapple"]);
    assert!(session.show_results);
    assert!(!store.is_result_revealed(&id));
    assert!(!store.has_voted(&id));
}

#[test]
fn vote_increments_only_the_chosen_option() {
    let store = VotingStore::new();
    let id = pizza(&store);

    let updated = store.cast_vote(&id, 2).unwrap();
    assert_eq!(updated.option(2).unwrap().votes, 1);

    let session = store.get_session(&id).unwrap();
    assert_eq!(session.option(1).unwrap().votes, 0);
    assert_eq!(session.option(2).unwrap().votes, 1);
    assert_eq!(session.option(3).unwrap().votes, 0);
    assert!(store.has_voted(&id));
}

#[test]
fn vote_on_unknown_session_changes_nothing() {
    let store = VotingStore::new();
    let id = pizza(&store);
    let before = store.sessions();

    let missing = SessionId::new();
    assert_eq!(
        store.cast_vote(&missing, 1),
        Err(VotingError::SessionNotFound(missing))
    );
    assert_eq!(store.sessions(), before);
    assert!(!store.has_voted(&missing));
    assert!(!store.has_voted(&id));
}

#[test]
fn reveal_is_idempotent_and_permanent() {
    let store = VotingStore::new();
    let id = pizza(&store);
    assert!(!store.is_result_revealed(&id));

    store.reveal_results(&id).unwrap();
    store.reveal_results(&id).unwrap();
    assert!(store.is_result_revealed(&id));

    store.cast_vote(&id, 1).unwrap();
    assert!(store.is_result_revealed(&id));
}

#[test]
fn reveal_and_query_unknown_session() {
    let store = VotingStore::new();
    let missing = SessionId::new();
    assert_eq!(
        store.reveal_results(&missing),
        Err(VotingError::SessionNotFound(missing))
    );
    assert!(!store.is_result_revealed(&missing));
    assert!(store.get_session(&missing).is_none());
}

#[test]
fn newest_session_is_listed_first() {
    let store = VotingStore::with_sample_session();
    let sample = store.sessions()[0].id;

    let first = store
        .create_session(NewSession::new("Pets", ["Cats", "Dogs"]))
        .unwrap()
        .id;
    let second = pizza(&store);

    let order: Vec<SessionId> = store.sessions().iter().map(|s| s.id).collect();
    assert_eq!(order, vec![second, first, sample]);
}

#[test]
fn invalid_requests_do_not_grow_the_listing() {
    let store = VotingStore::new();
    assert_eq!(
        store.create_session(NewSession::new("", ["a", "b"])),
        Err(VotingError::EmptyTitle)
    );
    assert_eq!(
        store.create_session(NewSession::new("Solo", ["only", "  "])),
        Err(VotingError::TooFewOptions(1))
    );
    assert!(store.is_empty());
}

#[test]
fn session_ids_are_unique() {
    let store = VotingStore::new();
    let a = pizza(&store);
    let b = pizza(&store);
    assert_ne!(a, b);
}

#[test]
fn concurrent_voters_cannot_double_count() {
    let store = VotingStore::new();
    let id = pizza(&store);
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.cast_vote(&id, 1).is_ok())
        })
        .collect();
    let accepted = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(store.get_session(&id).unwrap().total_votes(), 1);
}

#[test]
fn sample_session_keeps_its_fixed_date() {
    let store = VotingStore::with_sample_session();
    assert_eq!(store.sessions()[0].created_at, "March 15, 2024");
}
