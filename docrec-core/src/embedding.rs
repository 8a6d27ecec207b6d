//! Pretrained word-embedding table.
//!
//! The table is read from a GloVe-style text source where every line holds a
//! token followed by its vector components:
//!
//! ```text
//! the 0.418 0.24968 -0.41242 0.1217
//! dog 0.11008 -0.38781 -0.57615 -0.27714
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::error::{RecommendError, Result};

/// A mapping from token to embedding vector.
///
/// Every row is expected to have the same length. This is a contract of the
/// source, not something [`load`](EmbeddingTable::load) verifies; consumers
/// that accumulate vectors (see [`DocumentVectorizer`](crate::DocumentVectorizer))
/// report a mismatch when they meet one.
///
/// # Example
///
/// ```rust
/// use docrec_core::EmbeddingTable;
///
/// let table = EmbeddingTable::from_pairs([("dog", vec![1.0, 0.0]), ("cat", vec![0.0, 1.0])]);
/// assert_eq!(table.lookup("dog"), Some(&[1.0, 0.0][..]));
/// assert_eq!(table.lookup("Dog"), None);
/// assert_eq!(table.dimensions(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingTable {
    vectors: HashMap<String, Vec<f64>>,
    dimensions: Option<usize>,
}

impl EmbeddingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from in-memory `(token, vector)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        pairs.into_iter().map(|(token, vector)| (token.into(), vector)).collect()
    }

    /// Read a table from a text source, one `token v1 v2 ... vD` row per line.
    ///
    /// The token is everything before the first space. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Format`] if a line has no space separator or a
    /// component does not parse as a number, and [`RecommendError::Io`] if the
    /// reader fails.
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| RecommendError::io("<embedding source>", e))?;
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }
            let (token, vector) = parse_row(&line, line_no)?;
            table.insert(token, vector);
        }
        info!(
            tokens = table.len(),
            dimensions = table.dimensions.unwrap_or_default(),
            "loaded embedding table"
        );
        Ok(table)
    }

    /// Open and read a table from a file.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Io`] if the file cannot be opened or read, or
    /// any error from [`load`](EmbeddingTable::load).
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RecommendError::io(path, e))?;
        Self::load(BufReader::new(file)).map_err(|e| match e {
            RecommendError::Io { source, .. } => RecommendError::io(path, source),
            other => other,
        })
    }

    /// Look up the vector for a token. Unknown tokens yield `None`.
    pub fn lookup(&self, token: &str) -> Option<&[f64]> {
        self.vectors.get(token).map(Vec::as_slice)
    }

    /// Whether the table holds a vector for `token`.
    pub fn contains(&self, token: &str) -> bool {
        self.vectors.contains_key(token)
    }

    /// Length of the first row inserted, or `None` for an empty table.
    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    /// Number of tokens in the table.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the table holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn insert(&mut self, token: String, vector: Vec<f64>) {
        if self.dimensions.is_none() {
            self.dimensions = Some(vector.len());
        }
        self.vectors.insert(token, vector);
    }
}

impl FromIterator<(String, Vec<f64>)> for EmbeddingTable {
    fn from_iter<T: IntoIterator<Item = (String, Vec<f64>)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (token, vector) in iter {
            table.insert(token, vector);
        }
        table
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<(String, Vec<f64>)> {
    let (token, rest) = line
        .split_once(' ')
        .ok_or_else(|| RecommendError::format(Some(line_no), "missing space after token"))?;

    let token = token.trim();
    if token.is_empty() {
        return Err(RecommendError::format(Some(line_no), "empty token"));
    }

    let vector = rest
        .split_ascii_whitespace()
        .map(|component| {
            component.parse::<f64>().map_err(|e| {
                RecommendError::format(
                    Some(line_no),
                    format!("invalid component '{component}' for token '{token}': {e}"),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if vector.is_empty() {
        return Err(RecommendError::format(
            Some(line_no),
            format!("token '{token}' has no vector components"),
        ));
    }

    Ok((token.to_string(), vector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_rows_of_any_dimensionality() {
        let source = "the 0.418 0.24968 -0.41242\ndog 1 0 0.5\n\ncat 0 1 -2.5e-1\n";
        let table = EmbeddingTable::load(source.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.dimensions(), Some(3));
        assert_eq!(table.lookup("the"), Some(&[0.418, 0.24968, -0.41242][..]));
        assert_eq!(table.lookup("cat"), Some(&[0.0, 1.0, -0.25][..]));
        assert!(table.lookup("bird").is_none());
    }

    #[test]
    fn tolerates_crlf_and_trailing_spaces() {
        let table = EmbeddingTable::load("dog 1.5 2 \r\n".as_bytes()).unwrap();
        assert_eq!(table.lookup("dog"), Some(&[1.5, 2.0][..]));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = EmbeddingTable::load("Paris 1 2\n".as_bytes()).unwrap();
        assert!(table.contains("Paris"));
        assert!(!table.contains("paris"));
    }

    #[test]
    fn rejects_line_without_separator() {
        let err = EmbeddingTable::load("dog 1 2\nlonely\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RecommendError::Format { line: Some(2), .. }));
    }

    #[test]
    fn rejects_non_numeric_component() {
        let err = EmbeddingTable::load("dog 1 two\n".as_bytes()).unwrap_err();
        match err {
            RecommendError::Format { line, message } => {
                assert_eq!(line, Some(1));
                assert!(message.contains("two"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_token_without_components() {
        let err = EmbeddingTable::load("dog \n".as_bytes()).unwrap_err();
        assert!(matches!(err, RecommendError::Format { .. }));
    }

    #[test]
    fn later_duplicate_replaces_earlier_row() {
        let table = EmbeddingTable::load("dog 1 1\ndog 2 2\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("dog"), Some(&[2.0, 2.0][..]));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EmbeddingTable::load_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, RecommendError::Io { .. }));
    }

    #[test]
    fn empty_table_has_no_dimensions() {
        let table = EmbeddingTable::new();
        assert!(table.is_empty());
        assert_eq!(table.dimensions(), None);
    }
}
