//! Readers never observe a partially replaced ranking.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::common::date;
use ssamantle::{DailyRanking, KeyPrefix, MemoryRankingStore, RankedEntry, RankingStore};

const WORDS: usize = 200;

/// A ranking where every score encodes the generation that wrote it.
fn generation(gen_id: u32) -> Vec<RankedEntry> {
    (0..WORDS)
        .map(|i| {
            let score = gen_id as f32 + (i as f32 / WORDS as f32) / 2.0;
            RankedEntry::new(format!("w{i:03}"), score)
        })
        .collect()
}

#[test]
fn test_readers_see_whole_generations_during_swaps() {
    let day = date(2025, 7, 1);
    let store = Arc::new(MemoryRankingStore::new(KeyPrefix::default()));
    store.save_daily_topk(day, generation(0)).unwrap();

    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) || reads == 0 {
                    let top = store.top_k(day, WORDS).unwrap();
                    assert_eq!(top.len(), WORDS);

                    let gen_id = top[0].score.floor();
                    assert!(
                        top.iter().all(|e| e.score.floor() == gen_id),
                        "mixed generations in one read"
                    );
                    assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    for gen_id in 1..=50 {
        store.save_daily_topk(day, generation(gen_id)).unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }

    let last = store.top_k(day, 1).unwrap();
    assert_eq!(last[0].score.floor(), 50.0);
}

#[test]
fn test_point_lookups_during_swaps_stay_consistent() {
    let day = date(2025, 7, 2);
    let store = Arc::new(MemoryRankingStore::new(KeyPrefix::default()));
    store.save_daily_topk(day, generation(0)).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for gen_id in 1..=30 {
                store.save_daily_topk(day, generation(gen_id)).unwrap();
            }
        })
    };

    // Ranks never change between generations; only scores do.
    for _ in 0..500 {
        assert_eq!(store.rank(day, "w199").unwrap(), Some(0));
        assert_eq!(store.rank(day, "w000").unwrap(), Some(WORDS - 1));
        assert!(store.score(day, "w100").unwrap().is_some());
    }

    writer.join().unwrap();
}

/// Two publications of one day that disagree on answer, ranks and scores.
fn ascending(day: ssamantle::GameDate) -> DailyRanking {
    DailyRanking {
        date: day,
        answer: "up".to_string(),
        entries: (0..WORDS)
            .map(|i| RankedEntry::new(format!("w{i:03}"), i as f32 / WORDS as f32))
            .collect(),
    }
}

fn descending(day: ssamantle::GameDate) -> DailyRanking {
    DailyRanking {
        date: day,
        answer: "down".to_string(),
        entries: (0..WORDS)
            .map(|i| RankedEntry::new(format!("w{i:03}"), (WORDS - i) as f32 / WORDS as f32))
            .collect(),
    }
}

#[test]
fn test_lookup_pairs_answer_rank_and_score_from_one_publication() {
    let day = date(2025, 7, 3);
    let store = Arc::new(MemoryRankingStore::new(KeyPrefix::default()));
    let up = ascending(day);
    let down = descending(day);
    store.publish_day(&up, None, true).unwrap();

    let expected_up = Some((WORDS - 1 - 50, 50.0 / WORDS as f32));
    let expected_down = Some((50, 150.0 / WORDS as f32));

    let done = Arc::new(AtomicBool::new(false));
    let writer = {
        let store = Arc::clone(&store);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for round in 0..60 {
                let next = if round % 2 == 0 { &down } else { &up };
                store.publish_day(next, None, true).unwrap();
            }
            done.store(true, Ordering::Release);
        })
    };

    let mut reads = 0usize;
    while !done.load(Ordering::Acquire) || reads == 0 {
        let lookup = store.lookup(day, "w050").unwrap();
        match lookup.answer.as_deref() {
            Some("up") => assert_eq!(lookup.ranked, expected_up),
            Some("down") => assert_eq!(lookup.ranked, expected_down),
            other => panic!("unexpected answer {other:?}"),
        }
        reads += 1;
    }

    writer.join().unwrap();
}
