// ============================================================
// Layer 3 — Examples and Split Modes
// ============================================================
// An Example is what a raw row becomes after the text field has
// tokenised it: a token sequence plus a label.
//
// Train rows carry a numeric score, test rows may have it withheld.
// Instead of threading a boolean through shared code, the choice
// is made once by a type parameter:
//
//   Train → LabeledExample   (label: f32)
//   Test  → UnlabeledExample (label: ())
//
// Code that is generic over SplitMode works for both, and code
// that must only ever see training data (the vocabulary builder)
// asks for Train explicitly.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::error::PrepError;
use crate::domain::review::RawReview;

/// One processed review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example<L> {
    /// Position in the dataset it was built into
    pub index:  usize,
    /// Lowercased, normalised tokens, at most `fixed_length` long
    pub tokens: Vec<String>,
    pub label:  L,
}

pub type LabeledExample   = Example<f32>;
pub type UnlabeledExample = Example<()>;

impl<L> Example<L> {
    pub fn new(tokens: Vec<String>, label: L) -> Self {
        Self { index: 0, tokens, label }
    }

    /// Tag the example with its dataset position.
    pub fn at(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

// ─── Label ────────────────────────────────────────────────────────────────────
/// A per-example label, as seen by the batcher.
pub trait Label: Debug + Clone + PartialEq + Send + Sync + 'static {
    /// The label as a float, or None when the split has no labels
    fn value(&self) -> Option<f32>;
}

impl Label for f32 {
    fn value(&self) -> Option<f32> {
        Some(*self)
    }
}

impl Label for () {
    fn value(&self) -> Option<f32> {
        None
    }
}

// ─── SplitMode ────────────────────────────────────────────────────────────────
/// Decides how a raw row is labelled.
pub trait SplitMode: Debug + Clone + Copy + Send + Sync + 'static {
    type Label: Label;

    /// Short name used in log lines ("train" / "test")
    const NAME: &'static str;

    /// Extract the label from a raw row
    fn label(record: &RawReview) -> Result<Self::Label, PrepError>;
}

/// Labeled split: `score` is parsed as a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Train;

/// Unlabeled split: `score` is never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Test;

impl SplitMode for Train {
    type Label = f32;
    const NAME: &'static str = "train";

    fn label(record: &RawReview) -> Result<f32, PrepError> {
        record
            .score
            .trim()
            .parse::<f32>()
            .map_err(|_| PrepError::InvalidLabel {
                row:   record.row,
                value: record.score.clone(),
            })
    }
}

impl SplitMode for Test {
    type Label = ();
    const NAME: &'static str = "test";

    fn label(_record: &RawReview) -> Result<(), PrepError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_parses_score() {
        let r = RawReview::new(1, "nice", " 4 ");
        assert_eq!(Train::label(&r).unwrap(), 4.0);
    }

    #[test]
    fn test_train_rejects_non_numeric_score() {
        let r   = RawReview::new(3, "nice", "great");
        let err = Train::label(&r).unwrap_err();
        assert!(matches!(err, PrepError::InvalidLabel { row: 3, .. }));
    }

    #[test]
    fn test_test_split_ignores_score() {
        // A withheld label is fine for the unlabeled split
        let r = RawReview::new(1, "nice", "");
        assert!(Test::label(&r).is_ok());
        assert_eq!(Test::label(&r).unwrap().value(), None);
    }
}
