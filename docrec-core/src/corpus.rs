//! Corpus construction from a directory of text files.
//!
//! Each file holds a title, a blank line, then the body. The body is
//! normalized by the [`tokenizer`](crate::tokenizer) and turned into a centroid
//! by the [`DocumentVectorizer`]; the result is one [`Document`] per file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{RecommenderConfig, TextEncoding};
use crate::document::{Document, NeighborResult};
use crate::embedding::EmbeddingTable;
use crate::error::{RecommendError, Result};
use crate::ranker::Ranker;
use crate::tokenizer;
use crate::vectorizer::DocumentVectorizer;

/// An ordered, read-only collection of [`Document`]s.
///
/// # Example
///
/// ```rust,ignore
/// use docrec_core::{Corpus, EmbeddingTable};
///
/// let embeddings = EmbeddingTable::load_file("glove.6B.300d.txt")?;
/// let corpus = Corpus::build("bbc", &embeddings)?;
/// for neighbor in corpus.recommend("business/001.txt", 5)? {
///     println!("{:.3} {}", neighbor.distance, neighbor.document.title);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    index: HashMap<String, usize>,
    encoding: TextEncoding,
}

impl Corpus {
    /// Build a corpus from `directory` with the default [`RecommenderConfig`].
    ///
    /// # Errors
    ///
    /// See [`build_with_config`](Corpus::build_with_config).
    pub fn build(directory: impl AsRef<Path>, embeddings: &EmbeddingTable) -> Result<Self> {
        Self::build_with_config(directory, embeddings, &RecommenderConfig::default())
    }

    /// Build a corpus from every file under `directory`.
    ///
    /// Files are visited in file-name order. A file is skipped when its path
    /// relative to `directory` contains `config.exclude_marker`, or when its
    /// identifier was already taken by an earlier file. An empty embedding
    /// table or a missing directory yields an empty corpus.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Io`] if the tree cannot be walked or a file
    /// cannot be read, and [`RecommendError::Format`] if an embedding row has
    /// the wrong length.
    pub fn build_with_config(
        directory: impl AsRef<Path>,
        embeddings: &EmbeddingTable,
        config: &RecommenderConfig,
    ) -> Result<Self> {
        let directory = directory.as_ref();
        let mut corpus = Self { encoding: config.encoding, ..Self::default() };

        if embeddings.is_empty() {
            warn!("embedding table is empty; corpus left empty");
            return Ok(corpus);
        }
        if !directory.is_dir() {
            warn!(directory = %directory.display(), "corpus directory does not exist");
            return Ok(corpus);
        }
        let root = fs::canonicalize(directory).map_err(|e| RecommendError::io(directory, e))?;

        let vectorizer = DocumentVectorizer::new(embeddings);
        let mut excluded = 0_usize;
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| root.clone(), Path::to_path_buf);
                RecommendError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&root).unwrap_or(path);
            if relative.to_string_lossy().contains(config.exclude_marker.as_str()) {
                debug!(path = %relative.display(), "excluded by marker");
                excluded += 1;
                continue;
            }

            let document = read_document(path, &vectorizer, config.encoding)?;
            if corpus.index.contains_key(&document.id) {
                warn!(id = %document.id, path = %path.display(), "duplicate document id; skipping");
                continue;
            }
            debug!(id = %document.id, embedded = document.has_centroid(), "loaded document");
            corpus.push(document);
        }

        info!(
            directory = %root.display(),
            documents = corpus.len(),
            excluded,
            "built corpus"
        );
        Ok(corpus)
    }

    /// Assemble a corpus from documents that were built elsewhere.
    ///
    /// Order is preserved; a document whose id repeats an earlier one is dropped.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut corpus = Self::default();
        for document in documents {
            if !corpus.index.contains_key(&document.id) {
                corpus.push(document);
            }
        }
        corpus
    }

    fn push(&mut self, document: Document) {
        self.index.insert(document.id.clone(), self.documents.len());
        self.documents.push(document);
    }

    /// Look up a document by identifier.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&i| &self.documents[i])
    }

    /// All documents in insertion order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Iterate over documents in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Recommend the `n` documents closest to the document with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::NotFound`] if `id` is not in the corpus, or
    /// any error from [`Ranker::recommend`].
    pub fn recommend(&self, id: &str, n: usize) -> Result<Vec<NeighborResult<'_>>> {
        let target = self.get(id).ok_or_else(|| RecommendError::NotFound(id.to_string()))?;
        Ranker.recommend(target, &self.documents, n)
    }

    /// Re-read a document's source file and return its body paragraphs.
    ///
    /// The title is removed and blank lines are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Io`] if the file can no longer be read.
    pub fn article_body(&self, document: &Document) -> Result<Vec<String>> {
        let content = read_text(&document.source_path, self.encoding)?;
        let body = content.strip_prefix(document.title.as_str()).unwrap_or(&content);
        Ok(body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn read_text(path: &Path, encoding: TextEncoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| RecommendError::io(path, e))?;
    Ok(encoding.decode(&bytes).replace("\r\n", "\n"))
}

/// Split file content into its title (first paragraph) and the remainder.
fn split_title(content: &str) -> (&str, &str) {
    content.split_once("\n\n").map_or((content, ""), |(title, _)| {
        (title, &content[title.len()..])
    })
}

/// `topic/filename` from the last two path segments.
fn document_id(path: &Path) -> String {
    let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    match path.parent().and_then(Path::file_name) {
        Some(topic) => format!("{}/{file_name}", topic.to_string_lossy()),
        None => file_name.into_owned(),
    }
}

fn read_document(
    path: &Path,
    vectorizer: &DocumentVectorizer<'_>,
    encoding: TextEncoding,
) -> Result<Document> {
    let content = read_text(path, encoding)?;
    let (title, body) = split_title(&content);
    let text = tokenizer::normalize(body);
    let centroid = vectorizer.vectorize(&text)?;
    Ok(Document {
        id: document_id(path),
        title: title.to_string(),
        text,
        centroid,
        source_path: PathBuf::from(path),
    })
}
