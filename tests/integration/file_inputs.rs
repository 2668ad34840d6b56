//! Publishing from on-disk answers and vectors, and resuming from a snapshot.

use std::sync::Arc;

use crate::common::{TestFiles, date, manager_with, sample_data};
use ssamantle::vector::read_vec_file;
use ssamantle::{
    DaySessionManager, FileAnswerSource, HashAnswerPicker, KeyPrefix, MemoryRankingStore,
    MemoryVectorStore, RankingConfig, RankingStore, SessionState, Settings, VectorDimension,
    VectorQuery,
};

fn open(files: &TestFiles) -> (DaySessionManager, ssamantle::Vocabulary) {
    let dimension = VectorDimension::new(2).unwrap();
    let vectors = Arc::new(
        MemoryVectorStore::load_vec_file(&files.path("words.vec"), dimension).unwrap(),
    );
    let vocabulary = vectors.vocabulary().unwrap();
    let store =
        MemoryRankingStore::open(KeyPrefix::default(), files.path("rankings.json")).unwrap();

    let manager = manager_with(
        Arc::new(store),
        vectors as Arc<dyn VectorQuery>,
        RankingConfig::default(),
    );
    (manager, vocabulary)
}

#[test]
fn test_vec_file_roundtrip_into_vocabulary() {
    let files = TestFiles::new();
    let path = files.add_file("words.vec", sample_data::PET_VEC);

    let words = read_vec_file(&path, VectorDimension::new(2).unwrap()).unwrap();
    let texts: Vec<&str> = words.iter().map(|w| w.text()).collect();
    assert_eq!(texts, vec!["cat", "dog", "car"]);
}

#[test]
fn test_non_finite_vector_lines_do_not_block_advance() {
    let files = TestFiles::new();
    files.add_file("words.vec", "cat 1 0\ndog 0.9 0.1\nbad nan 0.5\nfar inf 0\n");
    let day = date(2025, 1, 15);

    let (manager, vocabulary) = open(&files);
    assert_eq!(vocabulary.len(), 2);
    assert!(!vocabulary.contains("bad"));

    let report = manager.advance_day(day, "cat", &vocabulary).unwrap();
    assert_eq!(report.entries, 1);
    assert_eq!(manager.active_date(), Some(day));
    assert_eq!(manager.store().rank(day, "dog").unwrap(), Some(0));
    assert_eq!(manager.store().score(day, "bad").unwrap(), None);
}

#[test]
fn test_refresh_from_files_and_resume_after_restart() {
    let files = TestFiles::new();
    files.add_file("words.vec", sample_data::PET_VEC);
    let answers = files.add_file("answers.txt", sample_data::ANSWERS);
    let day = date(2025, 1, 15);

    let published = {
        let (manager, vocabulary) = open(&files);
        manager
            .refresh(
                day,
                &FileAnswerSource::new(&answers),
                &HashAnswerPicker::new(),
                &vocabulary,
            )
            .unwrap()
    };
    assert!(["cat", "dog"].contains(&published.answer.as_str()));
    assert_eq!(published.entries, 2);

    // A fresh process starts with no active day until it restores.
    let (manager, _) = open(&files);
    assert_eq!(manager.state(), SessionState::NoActiveDay);
    assert_eq!(manager.restore().unwrap(), Some(day));

    let store = manager.store();
    assert_eq!(store.answer(day).unwrap(), Some(published.answer.clone()));
    assert_eq!(store.top_k(day, 10).unwrap().len(), 2);
    if published.answer == "cat" {
        assert_eq!(
            store.answer_description(day).unwrap().as_deref(),
            Some("a small feline")
        );
    } else {
        assert_eq!(store.answer_description(day).unwrap(), None);
    }
}

#[test]
fn test_settings_drive_store_and_ranking() {
    let files = TestFiles::new();
    let config = files.add_file(
        "settings.toml",
        r#"
vector_dimension = 2

[store]
key_prefix = "test"

[ranking]
top_k = 1
"#,
    );

    let settings = Settings::load_from(&config).unwrap();
    assert_eq!(settings.ranking_config().top_k, Some(1));

    let store = MemoryRankingStore::open(
        settings.store.key_prefix.clone(),
        files.path("snapshot.json"),
    )
    .unwrap();
    assert_eq!(store.prefix().as_str(), "test");
    assert!(store.stored_dates().unwrap().is_empty());
}
