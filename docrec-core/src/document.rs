//! Data types for documents and ranking results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A corpus document with its precomputed centroid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Identifier of the form `topic/filename`, unique within a corpus.
    pub id: String,
    /// The first paragraph of the source file.
    pub title: String,
    /// Space-joined normalized tokens of the body.
    pub text: String,
    /// Mean embedding of the body, absent when no token had an embedding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid: Option<Vec<f64>>,
    /// The file this document was read from.
    pub source_path: PathBuf,
}

impl Document {
    /// Whether the document can take part in distance ranking.
    pub fn has_centroid(&self) -> bool {
        self.centroid.is_some()
    }
}

/// A ranked [`Document`] paired with its distance to the target.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct NeighborResult<'a> {
    /// Euclidean distance between centroids (lower is more similar).
    pub distance: f64,
    /// The ranked document.
    pub document: &'a Document,
}
