//! Configuration for corpus construction and recommendation.

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// How corpus files are decoded into text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value.
    #[default]
    Latin1,
    /// UTF-8, with invalid sequences replaced by U+FFFD.
    Utf8,
}

impl TextEncoding {
    /// Decode raw file bytes into a string.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Configuration parameters for building a corpus and answering recommendations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Number of recommendations returned when the caller does not ask for a count.
    pub top_n: usize,
    /// Files whose path (relative to the corpus root) contains this string are skipped.
    pub exclude_marker: String,
    /// Encoding used to decode corpus files.
    pub encoding: TextEncoding,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { top_n: 5, exclude_marker: "COPYRIGHT".to_string(), encoding: TextEncoding::Latin1 }
    }
}

impl RecommenderConfig {
    /// Create a new builder for constructing a [`RecommenderConfig`].
    pub fn builder() -> RecommenderConfigBuilder {
        RecommenderConfigBuilder::default()
    }

    /// Check that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Config`] if `top_n == 0` or `exclude_marker` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(RecommendError::Config("top_n must be greater than zero".to_string()));
        }
        // an empty marker is contained in every path and would exclude the whole corpus
        if self.exclude_marker.is_empty() {
            return Err(RecommendError::Config("exclude_marker must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`RecommenderConfig`].
#[derive(Debug, Clone, Default)]
pub struct RecommenderConfigBuilder {
    config: RecommenderConfig,
}

impl RecommenderConfigBuilder {
    /// Set the default number of recommendations.
    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    /// Set the path marker that excludes files from the corpus.
    pub fn exclude_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.exclude_marker = marker.into();
        self
    }

    /// Set the encoding used to decode corpus files.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Build the [`RecommenderConfig`], validating its parameters.
    ///
    /// # Errors
    ///
    /// See [`RecommenderConfig::validate`].
    pub fn build(self) -> Result<RecommenderConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
