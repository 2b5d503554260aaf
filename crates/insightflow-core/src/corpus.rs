//! Review corpus loading
//!
//! The demo corpus ships embedded in the binary and is parsed once at
//! startup; an external JSON file can replace it. Either way the corpus
//! is an immutable resource for the lifetime of the process, it is not
//! re-fetched per request.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::Review;

/// Embedded demo corpus (compiled into the binary)
const EMBEDDED_REVIEWS: &str = include_str!("../../../data/mock_reviews.json");

/// An immutable set of reviews for analysis
#[derive(Debug, Clone)]
pub struct ReviewCorpus {
    reviews: Vec<Review>,
}

impl ReviewCorpus {
    /// Parse the embedded demo corpus
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_REVIEWS)
    }

    /// Load a corpus from an external JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::InvalidData(format!("Failed to read corpus file: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parse a JSON array of reviews, validating each record
    pub fn from_json(json: &str) -> Result<Self> {
        let reviews: Vec<Review> = serde_json::from_str(json)?;
        if reviews.is_empty() {
            return Err(Error::InvalidData("Corpus contains no reviews".into()));
        }
        for (index, review) in reviews.iter().enumerate() {
            if !(1..=5).contains(&review.rating) {
                return Err(Error::InvalidData(format!(
                    "Review {} has rating {} outside 1..=5",
                    index, review.rating
                )));
            }
            if review.comment.trim().is_empty() {
                return Err(Error::InvalidData(format!(
                    "Review {} has an empty comment",
                    index
                )));
            }
        }
        Ok(Self { reviews })
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// All reviews formatted for prompt embedding, newline-joined
    pub fn prompt_block(&self) -> String {
        self.reviews
            .iter()
            .map(Review::prompt_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
