//! Observable contract of the daily ranking store.

use crate::common::{date, entries};
use ssamantle::{KeyPrefix, MemoryRankingStore, RankedEntry, RankingStore};

fn store() -> MemoryRankingStore {
    MemoryRankingStore::new(KeyPrefix::default())
}

fn sample() -> Vec<RankedEntry> {
    entries(&[
        ("tiger", 0.71),
        ("lion", 0.71),
        ("kitten", 0.93),
        ("dog", 0.64),
        ("car", 0.02),
        ("mouse", -0.15),
        ("zebra", 0.0),
    ])
}

fn expected_order() -> Vec<RankedEntry> {
    entries(&[
        ("kitten", 0.93),
        ("lion", 0.71),
        ("tiger", 0.71),
        ("dog", 0.64),
        ("car", 0.02),
        ("zebra", 0.0),
        ("mouse", -0.15),
    ])
}

#[test]
fn test_top_k_sorted_regardless_of_input_order() {
    let day = date(2025, 3, 1);
    let mut input = sample();

    // Rotations and a reversal cover several arrival orders.
    for rotation in 0..input.len() {
        input.rotate_left(1);
        let store = store();
        store.save_daily_topk(day, input.clone()).unwrap();
        assert_eq!(
            store.top_k(day, input.len()).unwrap(),
            expected_order(),
            "rotation {rotation}"
        );
    }

    input.reverse();
    let store = store();
    store.save_daily_topk(day, input).unwrap();
    assert_eq!(store.top_k(day, 7).unwrap(), expected_order());
}

#[test]
fn test_save_is_idempotent() {
    let day = date(2025, 3, 2);
    let store = store();

    store.save_daily_topk(day, sample()).unwrap();
    let first = store.top_k(day, 100).unwrap();
    store.save_daily_topk(day, sample()).unwrap();
    let second = store.top_k(day, 100).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.stored_dates().unwrap(), vec![day]);
}

#[test]
fn test_equal_scores_break_ties_by_word() {
    let day = date(2025, 3, 3);
    let store = store();

    store
        .save_daily_topk(day, entries(&[("banana", 0.5), ("apple", 0.5)]))
        .unwrap();

    assert_eq!(
        store.top_k(day, 2).unwrap(),
        entries(&[("apple", 0.5), ("banana", 0.5)])
    );
}

#[test]
fn test_rank_and_score_agree_with_top_k() {
    let day = date(2025, 3, 4);
    let store = store();
    store.save_daily_topk(day, sample()).unwrap();

    for entry in sample() {
        let rank = store.rank(day, &entry.word).unwrap().expect("stored word");
        let score = store.score(day, &entry.word).unwrap().expect("stored word");
        let top = store.top_k(day, rank + 1).unwrap();

        assert_eq!(top.len(), rank + 1);
        assert_eq!(top[rank], RankedEntry::new(entry.word.clone(), score));
        assert_eq!(score, entry.score);
    }
}

#[test]
fn test_k_larger_than_ranking_returns_everything() {
    let day = date(2025, 3, 5);
    let store = store();
    store.save_daily_topk(day, sample()).unwrap();

    assert_eq!(store.top_k(day, 10_000).unwrap().len(), 7);
    assert!(store.top_k(day, 0).unwrap().is_empty());
    assert!(store.top_k(date(2025, 3, 6), 10).unwrap().is_empty());
}

#[test]
fn test_not_found_is_distinct_from_zero() {
    let day = date(2025, 3, 7);
    let store = store();
    store.save_daily_topk(day, sample()).unwrap();

    assert_eq!(store.score(day, "nonexistent").unwrap(), None);
    assert_eq!(store.rank(day, "nonexistent").unwrap(), None);
    assert_eq!(store.score(day, "zebra").unwrap(), Some(0.0));
    assert_eq!(store.rank(day, "kitten").unwrap(), Some(0));
    assert_eq!(store.answer(day).unwrap(), None);
}

#[test]
fn test_delete_day_semantics() {
    let day = date(2025, 3, 8);
    let store = store();

    assert_eq!(store.delete_day(day).unwrap(), 0);

    store.set_answer(day, "kitten").unwrap();
    store.set_answer_description(day, Some("young cat")).unwrap();
    store.save_daily_topk(day, sample()).unwrap();
    store.set_active_date(day).unwrap();

    assert_eq!(store.delete_day(day).unwrap(), 3);
    assert_eq!(store.answer(day).unwrap(), None);
    assert_eq!(store.answer_description(day).unwrap(), None);
    assert!(store.top_k(day, 5).unwrap().is_empty());
    // The active date pointer is not a per-day key.
    assert_eq!(store.active_date().unwrap(), Some(day));
}

#[test]
fn test_nan_scores_are_rejected() {
    let day = date(2025, 3, 9);
    let store = store();

    let result = store.save_daily_topk(day, entries(&[("ok", 0.1), ("bad", f32::NAN)]));

    assert!(result.is_err());
    assert!(!store.has_ranking(day).unwrap());
}
