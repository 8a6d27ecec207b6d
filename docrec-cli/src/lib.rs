//! Command-line front end for `docrec-core`.
//!
//! Loads an embedding table and a corpus directory once, then answers one
//! command: list the corpus, show a document with its recommendations, or
//! print recommendations alone. Results go to stdout as text or JSON; logs go
//! to stderr.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docrec_core::{Corpus, EmbeddingTable, NeighborResult, RecommenderConfig};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Recommend similar documents by word-embedding centroid distance.
#[derive(Debug, Parser)]
#[command(name = "docrec", version, about)]
pub struct Cli {
    /// GloVe-style embedding file (`token v1 v2 ... vD` per line).
    #[arg(short, long, env = "DOCREC_EMBEDDINGS")]
    pub embeddings: PathBuf,

    /// Directory of articles, one `topic/filename` text file per document.
    #[arg(short, long, env = "DOCREC_CORPUS")]
    pub corpus: PathBuf,

    /// JSON file with recommender settings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List every document identifier and title.
    List,
    /// Show a document's text followed by its recommendations.
    Show {
        /// Document identifier, e.g. `business/001.txt`.
        id: String,
        /// Number of recommendations (defaults to the configured `top_n`).
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Print the documents most similar to one document.
    Recommend {
        /// Document identifier, e.g. `business/001.txt`.
        id: String,
        /// Number of recommendations (defaults to the configured `top_n`).
        #[arg(short, long)]
        n: Option<usize>,
    },
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    id: &'a str,
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct Recommendation<'a> {
    distance: f64,
    id: &'a str,
    title: &'a str,
}

impl<'a> From<&NeighborResult<'a>> for Recommendation<'a> {
    fn from(result: &NeighborResult<'a>) -> Self {
        Self { distance: result.distance, id: &result.document.id, title: &result.document.title }
    }
}

#[derive(Debug, Serialize)]
struct Article<'a> {
    id: &'a str,
    title: &'a str,
    paragraphs: Vec<String>,
    recommendations: Vec<Recommendation<'a>>,
}

/// Install the stderr log subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Read recommender settings from a JSON file, or use the defaults.
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid JSON, or holds invalid values.
pub fn load_config(path: Option<&Path>) -> Result<RecommenderConfig> {
    let Some(path) = path else {
        return Ok(RecommenderConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: RecommenderConfig = serde_json::from_str(&raw)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Load the embeddings and corpus named by `cli`, then run its command.
///
/// # Errors
///
/// Any load, ranking, or output failure, with context.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let embeddings = EmbeddingTable::load_file(&cli.embeddings)
        .with_context(|| format!("failed to load embeddings from {}", cli.embeddings.display()))?;
    let corpus = Corpus::build_with_config(&cli.corpus, &embeddings, &config)
        .with_context(|| format!("failed to build corpus from {}", cli.corpus.display()))?;
    info!(documents = corpus.len(), "ready");

    execute(&cli.command, &corpus, &config, cli.json, out)
}

/// Run one command against an already built corpus.
///
/// # Errors
///
/// Fails if the document is unknown, cannot be ranked, or output cannot be written.
pub fn execute(
    command: &Command,
    corpus: &Corpus,
    config: &RecommenderConfig,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List => {
            let listing: Vec<Listing<'_>> =
                corpus.iter().map(|d| Listing { id: &d.id, title: &d.title }).collect();
            if json {
                write_json(out, &listing)?;
            } else {
                for entry in &listing {
                    writeln!(out, "{}\t{}", entry.id, entry.title)?;
                }
            }
        }
        Command::Recommend { id, n } => {
            let results = corpus
                .recommend(id, n.unwrap_or(config.top_n))
                .with_context(|| format!("cannot recommend documents for '{id}'"))?;
            let recommendations: Vec<Recommendation<'_>> = results.iter().map(Into::into).collect();
            if json {
                write_json(out, &recommendations)?;
            } else {
                write_recommendations(out, &recommendations)?;
            }
        }
        Command::Show { id, n } => {
            let document =
                corpus.get(id).with_context(|| format!("document '{id}' not found"))?;
            let paragraphs = corpus.article_body(document)?;
            let results = corpus
                .recommend(id, n.unwrap_or(config.top_n))
                .with_context(|| format!("cannot recommend documents for '{id}'"))?;
            let article = Article {
                id: &document.id,
                title: &document.title,
                paragraphs,
                recommendations: results.iter().map(Into::into).collect(),
            };
            if json {
                write_json(out, &article)?;
            } else {
                writeln!(out, "{}\n", article.title)?;
                for paragraph in &article.paragraphs {
                    writeln!(out, "{paragraph}\n")?;
                }
                writeln!(out, "Similar articles:")?;
                write_recommendations(out, &article.recommendations)?;
            }
        }
    }
    Ok(())
}

fn write_recommendations(out: &mut impl Write, recommendations: &[Recommendation<'_>]) -> Result<()> {
    for r in recommendations {
        writeln!(out, "{:.4}\t{}\t{}", r.distance, r.id, r.title)?;
    }
    Ok(())
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_and_subcommands() {
        let cli = Cli::try_parse_from([
            "docrec",
            "--embeddings",
            "glove.txt",
            "-c",
            "bbc",
            "--json",
            "recommend",
            "sport/001.txt",
            "-n",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.embeddings, PathBuf::from("glove.txt"));
        assert_eq!(cli.corpus, PathBuf::from("bbc"));
        assert!(cli.json);
        assert_eq!(cli.command, Command::Recommend { id: "sport/001.txt".to_string(), n: Some(3) });
    }

    #[test]
    fn list_takes_no_arguments() {
        let cli = Cli::try_parse_from(["docrec", "-e", "g.txt", "-c", "bbc", "list"]).unwrap();
        assert_eq!(cli.command, Command::List);
        assert!(Cli::try_parse_from(["docrec", "-e", "g.txt", "-c", "bbc", "list", "x"]).is_err());
    }

    #[test]
    fn show_requires_an_id() {
        assert!(Cli::try_parse_from(["docrec", "-e", "g.txt", "-c", "bbc", "show"]).is_err());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), RecommenderConfig::default());
    }

    #[test]
    fn config_file_is_validated() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"top_n": 0}"#).unwrap();
        assert!(load_config(Some(&path)).is_err());

        fs::write(&path, r#"{"top_n": 2, "exclude_marker": "LICENSE"}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.top_n, 2);
        assert_eq!(config.exclude_marker, "LICENSE");
    }
}
