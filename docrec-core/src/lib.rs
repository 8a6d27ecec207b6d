//! Document recommendation from word-embedding centroids.
//!
//! Each document is represented by the mean of the pretrained embeddings of
//! its content words. Documents are recommended by Euclidean distance between
//! these centroids.
//!
//! - [`EmbeddingTable`] — token → vector table read from a GloVe-style file
//! - [`tokenizer`] — normalization of raw text into lowercase content words
//! - [`DocumentVectorizer`] — centroid of a normalized text
//! - [`Corpus`] — documents with precomputed centroids, built from a directory
//! - [`Ranker`] — distance ranking and top-N recommendation
//!
//! # Example
//!
//! ```rust,ignore
//! let embeddings = docrec_core::load_embeddings("glove.6B.300d.txt")?;
//! let corpus = docrec_core::build_corpus("bbc", &embeddings)?;
//! let similar = docrec_core::recommend("sport/042.txt", &corpus, 5)?;
//! ```

pub mod config;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
pub mod ranker;
pub mod stopwords;
pub mod tokenizer;
pub mod vectorizer;

use std::path::Path;

pub use config::{RecommenderConfig, RecommenderConfigBuilder, TextEncoding};
pub use corpus::Corpus;
pub use document::{Document, NeighborResult};
pub use embedding::EmbeddingTable;
pub use error::{RecommendError, Result};
pub use ranker::{Ranker, distance};
pub use vectorizer::DocumentVectorizer;

/// Load an embedding table from a file.
///
/// # Errors
///
/// See [`EmbeddingTable::load_file`].
pub fn load_embeddings(path: impl AsRef<Path>) -> Result<EmbeddingTable> {
    EmbeddingTable::load_file(path)
}

/// Build a corpus from a directory with the default configuration.
///
/// # Errors
///
/// See [`Corpus::build_with_config`].
pub fn build_corpus(directory: impl AsRef<Path>, embeddings: &EmbeddingTable) -> Result<Corpus> {
    Corpus::build(directory, embeddings)
}

/// Recommend the `n` documents of `corpus` closest to the one identified by `id`.
///
/// # Errors
///
/// See [`Corpus::recommend`].
pub fn recommend<'a>(id: &str, corpus: &'a Corpus, n: usize) -> Result<Vec<NeighborResult<'a>>> {
    corpus.recommend(id, n)
}
