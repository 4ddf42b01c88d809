// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to review sources through this
// trait so a streaming or database-backed source can replace
// the CSV loader without touching the dataset builder.

use crate::domain::error::PrepError;
use crate::domain::review::RawReview;

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can produce raw review rows.
///
/// Implementations:
///   - CsvReviewLoader → reads a CSV file with `review`/`score` columns
pub trait ReviewSource {
    /// Load every row, in source order.
    fn load_all(&self) -> Result<Vec<RawReview>, PrepError>;

    /// Human-readable name of the source, used in log lines
    fn describe(&self) -> String;
}

/// In-memory rows are a source too, handy for tests and callers
/// that already hold the data.
impl ReviewSource for Vec<RawReview> {
    fn load_all(&self) -> Result<Vec<RawReview>, PrepError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory rows", self.len())
    }
}

// ─── WordVectors ──────────────────────────────────────────────────────────────
/// A pretrained embedding table keyed by exact token string.
///
/// Implementations:
///   - PretrainedVectors → GloVe-style text file, optionally cached
pub trait WordVectors {
    /// Number of floats per vector
    fn dim(&self) -> usize;

    /// The vector for `token`, if the table has one
    fn vector(&self, token: &str) -> Option<&[f32]>;
}
