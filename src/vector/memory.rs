use std::path::Path;

use dashmap::DashMap;

use super::{VectorDimension, VectorError, VectorQuery, read_vec_file};
use crate::types::{Vocabulary, Word};

/// In-process embedding table keyed by word.
#[derive(Debug)]
pub struct MemoryVectorStore {
    vectors: DashMap<String, Vec<f32>>,
    dimension: VectorDimension,
}

impl MemoryVectorStore {
    pub fn new(dimension: VectorDimension) -> Self {
        Self {
            vectors: DashMap::new(),
            dimension,
        }
    }

    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Result<Self, VectorError> {
        let dimension = vocabulary.dimension().ok_or(VectorError::InvalidDimension {
            dimension: 0,
            reason: "Cannot infer a dimension from an empty vocabulary",
        })?;
        let store = Self::new(dimension);
        for word in vocabulary.iter() {
            store.insert(word.text(), word.embedding().to_vec())?;
        }
        Ok(store)
    }

    /// Loads every word of a fastText `.vec` file.
    pub fn load_vec_file(path: &Path, dimension: VectorDimension) -> Result<Self, VectorError> {
        let store = Self::new(dimension);
        for word in read_vec_file(path, dimension)? {
            store.insert(word.text(), word.embedding().to_vec())?;
        }
        tracing::info!(
            "Loaded {} vectors ({}-dim) from {}",
            store.len(),
            dimension,
            path.display()
        );
        Ok(store)
    }

    /// Inserts or replaces a word's embedding.
    pub fn insert(&self, word: impl Into<String>, vector: Vec<f32>) -> Result<(), VectorError> {
        self.dimension.validate_vector(&vector)?;
        self.vectors.insert(word.into(), vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> VectorDimension {
        self.dimension
    }

    /// Snapshot of every stored word as a vocabulary, sorted by text.
    pub fn vocabulary(&self) -> Result<Vocabulary, VectorError> {
        let mut words: Vec<Word> = self
            .vectors
            .iter()
            .map(|entry| Word::new(entry.key().clone(), entry.value().clone()))
            .collect();
        words.sort_by(|a, b| a.text().cmp(b.text()));
        Vocabulary::new(words)
    }
}

impl VectorQuery for MemoryVectorStore {
    fn embed(&self, word: &str) -> Result<Option<Vec<f32>>, VectorError> {
        Ok(self.vectors.get(word).map(|entry| entry.value().clone()))
    }

    fn is_ready(&self) -> bool {
        !self.vectors.is_empty()
    }
}
