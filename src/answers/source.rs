use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{AnswerEntry, AnswerError, AnswerResult, AnswerSource};

/// Reads candidates from a UTF-8 text file.
///
/// Each line is `word [description...]`. Blank lines and lines starting
/// with `#` are skipped, and repeated words keep their first occurrence.
#[derive(Debug, Clone)]
pub struct FileAnswerSource {
    path: PathBuf,
}

impl FileAnswerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses file contents without touching the filesystem.
    pub fn parse(contents: &str) -> Vec<AnswerEntry> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (word, description) = match line.split_once(char::is_whitespace) {
                Some((word, rest)) => {
                    let rest = rest.trim();
                    (word, (!rest.is_empty()).then(|| rest.to_string()))
                }
                None => (line, None),
            };

            if seen.insert(word.to_string()) {
                entries.push(AnswerEntry::new(word, description));
            }
        }

        entries
    }
}

impl AnswerSource for FileAnswerSource {
    fn list_answers(&self) -> AnswerResult<Vec<AnswerEntry>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AnswerError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                AnswerError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let entries = Self::parse(&contents);
        if entries.is_empty() {
            return Err(AnswerError::NoCandidates {
                path: self.path.clone(),
            });
        }

        tracing::debug!(
            "Loaded {} answer candidate(s) from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }
}
