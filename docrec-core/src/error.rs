//! Error types for the `docrec-core` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading embeddings, building a corpus, or ranking.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// A malformed embedding row, or a vector whose length does not match the
    /// table's dimensionality.
    #[error("Format error{}: {message}", line_suffix(.line))]
    Format {
        /// 1-based line number in the embedding source, when known.
        line: Option<usize>,
        /// A description of the failure.
        message: String,
    },

    /// Two vectors of different (or zero) length were compared.
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// A ranking input was unusable (no centroid, no candidates).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Fewer neighbors are available than were requested.
    #[error("Insufficient candidates: requested {requested}, only {available} available")]
    InsufficientCandidates {
        /// Number of neighbors asked for.
        requested: usize,
        /// Number of neighbors that could be returned.
        available: usize,
    },

    /// No document with the given identifier exists in the corpus.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file-system operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The path being read or walked.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl RecommendError {
    pub(crate) fn format(line: Option<usize>, message: impl Into<String>) -> Self {
        Self::Format { line, message: message.into() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

/// A convenience result type for recommendation operations.
pub type Result<T> = std::result::Result<T, RecommendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_mentions_line_when_known() {
        let err = RecommendError::format(Some(3), "missing vector");
        assert_eq!(err.to_string(), "Format error (line 3): missing vector");

        let err = RecommendError::format(None, "length 2 != 3");
        assert_eq!(err.to_string(), "Format error: length 2 != 3");
    }
}
