//! Corpus command implementation

use std::path::Path;

use anyhow::Result;

use super::{load_corpus, truncate};

/// Validate and summarize the review corpus
pub fn cmd_corpus(corpus_path: Option<&Path>) -> Result<()> {
    let corpus = load_corpus(corpus_path)?;

    let source = corpus_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(embedded demo corpus)".to_string());

    println!("📚 Corpus: {}", source);
    println!("   Reviews: {}", corpus.len());

    // Ratings histogram
    let mut counts = [0usize; 5];
    for review in corpus.reviews() {
        counts[(review.rating - 1) as usize] += 1;
    }
    println!();
    for rating in (1..=5).rev() {
        let count = counts[rating - 1];
        println!("   {}★ {:>3}  {}", rating, count, "▇".repeat(count));
    }

    println!();
    println!("   Sample:");
    for review in corpus.reviews().iter().take(3) {
        println!("   [{}] {}", review.rating, truncate(&review.comment, 60));
    }

    Ok(())
}
