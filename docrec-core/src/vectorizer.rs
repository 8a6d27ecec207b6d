//! Document centroids from word embeddings.

use tracing::debug;

use crate::embedding::EmbeddingTable;
use crate::error::{RecommendError, Result};

/// Turns normalized document text into the mean of its token embeddings.
///
/// # Example
///
/// ```rust
/// use docrec_core::{DocumentVectorizer, EmbeddingTable};
///
/// let table = EmbeddingTable::from_pairs([("dog", vec![1.0, 0.0]), ("cat", vec![0.0, 1.0])]);
/// let centroid = DocumentVectorizer::new(&table).vectorize("dog cat").unwrap();
/// assert_eq!(centroid, Some(vec![0.5, 0.5]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DocumentVectorizer<'a> {
    embeddings: &'a EmbeddingTable,
}

impl<'a> DocumentVectorizer<'a> {
    /// Create a vectorizer over the given table.
    pub fn new(embeddings: &'a EmbeddingTable) -> Self {
        Self { embeddings }
    }

    /// Compute the centroid of the embedded tokens in `normalized_text`.
    ///
    /// Tokens missing from the table are skipped. Returns `Ok(None)` when the
    /// table or the text is empty, or when no token has an embedding.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Format`] if a token's vector length differs
    /// from the table's dimensionality.
    pub fn vectorize(&self, normalized_text: &str) -> Result<Option<Vec<f64>>> {
        let Some(dimensions) = self.embeddings.dimensions() else {
            return Ok(None);
        };
        if normalized_text.is_empty() {
            return Ok(None);
        }

        let mut sum = vec![0.0_f64; dimensions];
        let mut count = 0_usize;
        for token in normalized_text.split_whitespace() {
            let Some(vector) = self.embeddings.lookup(token) else {
                continue;
            };
            if vector.len() != dimensions {
                return Err(RecommendError::format(
                    None,
                    format!(
                        "embedding for '{token}' has {} components, expected {dimensions}",
                        vector.len()
                    ),
                ));
            }
            for (acc, value) in sum.iter_mut().zip(vector) {
                *acc += value;
            }
            count += 1;
        }

        if count == 0 {
            debug!("no embeddable tokens; centroid is absent");
            return Ok(None);
        }

        #[allow(clippy::cast_precision_loss)]
        let count = count as f64;
        sum.iter_mut().for_each(|v| *v /= count);
        Ok(Some(sum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> EmbeddingTable {
        EmbeddingTable::from_pairs([("dog", vec![1.0, 0.0]), ("cat", vec![0.0, 1.0])])
    }

    #[test]
    fn centroid_is_mean_of_known_tokens() {
        let table = pets();
        let vectorizer = DocumentVectorizer::new(&table);
        assert_eq!(vectorizer.vectorize("dog cat").unwrap(), Some(vec![0.5, 0.5]));
        assert_eq!(vectorizer.vectorize("dog dog cat").unwrap(), Some(vec![2.0 / 3.0, 1.0 / 3.0]));
    }

    #[test]
    fn unknown_tokens_are_skipped_without_penalty() {
        let table = pets();
        let vectorizer = DocumentVectorizer::new(&table);
        assert_eq!(vectorizer.vectorize("zebra dog giraffe").unwrap(), Some(vec![1.0, 0.0]));
    }

    #[test]
    fn no_embeddable_tokens_is_absent_not_nan() {
        let table = pets();
        let vectorizer = DocumentVectorizer::new(&table);
        assert_eq!(vectorizer.vectorize("zebra giraffe").unwrap(), None);
        assert_eq!(vectorizer.vectorize("").unwrap(), None);
    }

    #[test]
    fn empty_table_is_absent() {
        let table = EmbeddingTable::new();
        assert_eq!(DocumentVectorizer::new(&table).vectorize("dog").unwrap(), None);
    }

    #[test]
    fn mismatched_row_length_is_a_format_error() {
        let table = EmbeddingTable::load("dog 1 0\ncat 0 1 0\n".as_bytes()).unwrap();
        let err = DocumentVectorizer::new(&table).vectorize("dog cat").unwrap_err();
        assert!(matches!(err, RecommendError::Format { line: None, .. }));
    }
}
