//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - One-shot analysis with a printed report
//! - `corpus` - Corpus validation and summary
//! - `prompts` - Prompt library management commands
//! - `provider` - Provider health check and round trip
//! - `serve` - Web server command

pub mod analyze;
pub mod corpus;
pub mod prompts;
pub mod provider;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use corpus::*;
pub use prompts::*;
pub use provider::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};
use insightflow_core::ReviewCorpus;

/// Load the review corpus from a file, or fall back to the embedded
/// demo corpus
pub fn load_corpus(path: Option<&Path>) -> Result<ReviewCorpus> {
    let corpus = match path {
        Some(path) => ReviewCorpus::from_path(path)
            .with_context(|| format!("Failed to load corpus from {}", path.display()))?,
        None => ReviewCorpus::embedded().context("Failed to parse embedded corpus")?,
    };
    tracing::debug!(count = corpus.len(), "Review corpus loaded");
    Ok(corpus)
}

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
