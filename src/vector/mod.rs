//! Vector query collaborator.
//!
//! The ranking engine never trains embeddings or runs nearest-neighbour
//! search itself. It asks a [`VectorQuery`] implementation for a word's
//! embedding and for the similarity between two embeddings.
//!
//! [`MemoryVectorStore`] is the in-process implementation used by the CLI
//! and tests; it is fed from fastText `.vec` text files.

mod collaborator;
mod memory;
mod similarity;
mod types;
mod vec_file;

pub use collaborator::VectorQuery;
pub use memory::MemoryVectorStore;
pub use similarity::cosine_similarity;
pub use types::{VectorDimension, VectorError};
pub use vec_file::{parse_vec_reader, read_vec_file};
