//! Day transitions, guess lookups and retention through the session manager.

use std::sync::Arc;

use crate::common::{
    FlakyVectors, PoisonedDeleteStore, date, manager_with, pet_manager, pet_vocabulary,
};
use ssamantle::session::ScoreSource;
use ssamantle::{
    GuessOutcome, KeyPrefix, MemoryRankingStore, RankingConfig, RankingError, RankingStore,
    SessionError, SessionState, VectorQuery,
};

#[test]
fn test_end_to_end_pet_ranking() {
    let manager = pet_manager();
    let day = date(2025, 1, 15);

    let report = manager.advance_day(day, "cat", &pet_vocabulary()).unwrap();
    assert_eq!(report.entries, 2);

    let store = manager.store();
    let top = store.top_k(day, 10).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].word, "dog");
    assert!((top[0].score - 0.9939).abs() < 1e-3);
    assert_eq!(top[1].word, "car");
    assert!(top[1].score.abs() < 1e-6);

    assert_eq!(store.rank(day, "dog").unwrap(), Some(0));
    assert_eq!(store.rank(day, "cat").unwrap(), None);
    assert_eq!(store.answer(day).unwrap().as_deref(), Some("cat"));
    assert_eq!(manager.state(), SessionState::DayActive(day));
}

#[test]
fn test_include_answer_ranks_it_first() {
    let vectors: Arc<dyn VectorQuery> = Arc::new(FlakyVectors::new(&pet_vocabulary()));
    let manager = manager_with(
        Arc::new(MemoryRankingStore::new(KeyPrefix::default())),
        vectors,
        RankingConfig {
            top_k: None,
            include_answer: true,
        },
    );
    let day = date(2025, 1, 15);

    manager.advance_day(day, "cat", &pet_vocabulary()).unwrap();

    assert_eq!(manager.store().rank(day, "cat").unwrap(), Some(0));
    assert_eq!(manager.store().top_k(day, 10).unwrap().len(), 3);
}

#[test]
fn test_unknown_answer_changes_nothing() {
    let manager = pet_manager();
    let before = date(2025, 1, 14);
    let after = date(2025, 1, 15);
    manager.advance_day(before, "dog", &pet_vocabulary()).unwrap();
    let snapshot = manager.store().top_k(before, 10).unwrap();

    let err = manager
        .advance_day(after, "unicorn", &pet_vocabulary())
        .unwrap_err();

    assert_eq!(err.status_code(), "UNKNOWN_ANSWER_WORD");
    assert!(!err.is_retryable());
    assert_eq!(manager.active_date(), Some(before));
    assert_eq!(manager.store().active_date().unwrap(), Some(before));
    assert_eq!(manager.store().top_k(before, 10).unwrap(), snapshot);
    assert!(!manager.store().has_ranking(after).unwrap());
    assert_eq!(manager.store().answer(after).unwrap(), None);
}

#[test]
fn test_collaborator_failure_aborts_advance() {
    let vectors = Arc::new(FlakyVectors::new(&pet_vocabulary()));
    let manager = manager_with(
        Arc::new(MemoryRankingStore::new(KeyPrefix::default())),
        Arc::clone(&vectors) as Arc<dyn VectorQuery>,
        RankingConfig::default(),
    );
    let first = date(2025, 2, 1);
    manager.advance_day(first, "cat", &pet_vocabulary()).unwrap();

    vectors.set_failing(true);
    let err = manager
        .advance_day(date(2025, 2, 2), "dog", &pet_vocabulary())
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Ranking(RankingError::CollaboratorUnavailable { .. })
    ));
    assert!(err.is_retryable());
    assert_eq!(manager.active_date(), Some(first));
    assert_eq!(manager.store().stored_dates().unwrap(), vec![first]);
    assert!(!manager.health().vector_store_ready);

    vectors.set_failing(false);
    manager
        .advance_day(date(2025, 2, 2), "dog", &pet_vocabulary())
        .unwrap();
    assert_eq!(manager.active_date(), Some(date(2025, 2, 2)));
}

#[test]
fn test_guess_falls_back_outside_top_k() {
    let vectors: Arc<dyn VectorQuery> = Arc::new(FlakyVectors::new(&pet_vocabulary()));
    let manager = manager_with(
        Arc::new(MemoryRankingStore::new(KeyPrefix::default())),
        vectors,
        RankingConfig {
            top_k: Some(1),
            include_answer: false,
        },
    );
    manager
        .advance_day(date(2025, 1, 15), "cat", &pet_vocabulary())
        .unwrap();

    let dog = manager.guess("dog").unwrap();
    let dog = dog.result().unwrap();
    assert_eq!((dog.source, dog.rank), (ScoreSource::Cached, Some(0)));

    let car = manager.guess("car").unwrap();
    let car = car.result().unwrap();
    assert_eq!((car.source, car.rank), (ScoreSource::Computed, None));
    assert!(car.score.abs() < 1e-6);

    assert!(matches!(
        manager.guess("unicorn").unwrap(),
        GuessOutcome::UnknownWord { .. }
    ));
}

#[test]
fn test_retention_keeps_yesterday() {
    let manager = pet_manager();
    for day in 10..=13 {
        manager
            .advance_day(date(2025, 4, day), "cat", &pet_vocabulary())
            .unwrap();
    }

    assert_eq!(
        manager.store().stored_dates().unwrap(),
        vec![date(2025, 4, 12), date(2025, 4, 13)]
    );
}

#[test]
fn test_retention_failure_does_not_fail_advance() {
    let store = Arc::new(PoisonedDeleteStore {
        inner: MemoryRankingStore::new(KeyPrefix::default()),
        poisoned: date(2025, 4, 1),
    });
    let vectors: Arc<dyn VectorQuery> = Arc::new(FlakyVectors::new(&pet_vocabulary()));
    let manager = manager_with(store, vectors, RankingConfig::default());

    manager
        .advance_day(date(2025, 4, 1), "cat", &pet_vocabulary())
        .unwrap();
    manager
        .advance_day(date(2025, 4, 2), "cat", &pet_vocabulary())
        .unwrap();
    let report = manager
        .advance_day(date(2025, 4, 3), "dog", &pet_vocabulary())
        .unwrap();

    assert_eq!(manager.active_date(), Some(date(2025, 4, 3)));
    assert!(!report.retention.is_clean());
    assert_eq!(report.retention.failed[0].date, Some(date(2025, 4, 1)));
    assert!(manager.store().has_ranking(date(2025, 4, 1)).unwrap());
}

#[test]
fn test_retain_window_is_safe_to_repeat() {
    let manager = pet_manager();
    manager
        .advance_day(date(2025, 4, 20), "cat", &pet_vocabulary())
        .unwrap();

    let report = manager.retain_window(date(2025, 4, 25));
    assert_eq!(report.deleted_dates(), vec![date(2025, 4, 20)]);

    let again = manager.retain_window(date(2025, 4, 25));
    assert!(again.deleted.is_empty());
    assert!(again.is_clean());
}
