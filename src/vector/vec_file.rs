use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{VectorDimension, VectorError};
use crate::types::Word;

/// Reads a fastText `.vec` text file.
///
/// See [`parse_vec_reader`] for the accepted format.
pub fn read_vec_file(path: &Path, dimension: VectorDimension) -> Result<Vec<Word>, VectorError> {
    let file = File::open(path)?;
    parse_vec_reader(BufReader::new(file), dimension)
}

/// Parses `.vec` text: one `word v1 v2 ... vN` per line.
///
/// An optional `count dim` header is accepted on the first line and its
/// dimension must match. Lines with fewer than `dim` components, or with
/// components that are unparsable or not finite (`nan`, `inf`), are
/// skipped; extra trailing components are ignored.
pub fn parse_vec_reader<R: BufRead>(
    reader: R,
    dimension: VectorDimension,
) -> Result<Vec<Word>, VectorError> {
    let dim = dimension.get();
    let mut words = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        if line_no == 0 && parts.len() == 2 {
            if let (Ok(_count), Ok(header_dim)) =
                (parts[0].parse::<u64>(), parts[1].parse::<usize>())
            {
                if header_dim != dim {
                    return Err(VectorError::Parse {
                        line: 1,
                        reason: format!("header dimension {header_dim} != expected {dim}"),
                    });
                }
                continue;
            }
        }

        if parts.len() < dim + 1 {
            skipped += 1;
            continue;
        }

        let vector: Option<Vec<f32>> = parts[1..=dim]
            .iter()
            .map(|v| v.parse::<f32>().ok().filter(|x| x.is_finite()))
            .collect();
        match vector {
            Some(vector) => words.push(Word::new(parts[0], vector)),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {skipped} malformed vector lines");
    }

    Ok(words)
}
