// ============================================================
// Layer 3 — Raw Review Record
// ============================================================
// One row of a review CSV exactly as it was read.
// The score is kept as the raw cell text: whether it gets parsed
// depends on the split mode (train parses it, test ignores it).

use serde::{Deserialize, Serialize};

/// A single row from a review file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReview {
    /// 1-based data row number (the header is not counted)
    pub row: usize,

    /// Free review text, possibly spanning several lines
    pub review: String,

    /// The `score` cell, untouched
    pub score: String,
}

impl RawReview {
    pub fn new(row: usize, review: impl Into<String>, score: impl Into<String>) -> Self {
        Self {
            row,
            review: review.into(),
            score:  score.into(),
        }
    }

    /// Review text with embedded newlines collapsed to single spaces
    pub fn flattened_text(&self) -> String {
        self.review.replace('\n', " ")
    }
}
