//! CLI support for jmesq
//!
//! Provides programmatic access to the CLI commands so other tools can
//! embed them.

mod docs;
mod search;

pub use docs::{DocTopic, get_doc_topic, get_docs_overview};
pub use search::{SearchOptions, SearchOutcome, execute_search};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Query failed to parse or evaluate
    #[error("{0}")]
    Search(#[from] crate::SearchError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    /// Unknown documentation topic
    #[error("Unknown topic: '{0}'\nRun 'jmesq docs' to see available topics.")]
    UnknownTopic(String),
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Search(e.into())
    }
}
