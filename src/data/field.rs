// ============================================================
// Layer 4 — Text Field
// ============================================================
// Binds the tokenizer to the per-field rules applied to every
// review: lowercase, then cap the sequence at a fixed length.
//
// Truncation side:
//   Front → keep the LAST fixed_length tokens (the default; the
//           end of a review tends to hold the verdict)
//   Back  → keep the FIRST fixed_length tokens

use serde::{Deserialize, Serialize};

use crate::data::tokenizer::ReviewTokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Truncation {
    Front,
    Back,
}

pub struct TextField {
    tokenizer:    ReviewTokenizer,
    fixed_length: usize,
    truncation:   Truncation,
}

impl TextField {
    /// Create a field that lowercases and truncates to `fixed_length`.
    pub fn new(tokenizer: ReviewTokenizer, fixed_length: usize, truncation: Truncation) -> Self {
        Self { tokenizer, fixed_length, truncation }
    }

    /// Tokenise, lowercase and truncate one review.
    pub fn process(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .tokenizer
            .tokenize(text)
            .into_iter()
            .map(|t| t.to_lowercase())
            .collect();
        self.truncate(&mut tokens);
        tokens
    }

    fn truncate(&self, tokens: &mut Vec<String>) {
        if tokens.len() <= self.fixed_length {
            return;
        }
        match self.truncation {
            Truncation::Front => {
                let excess = tokens.len() - self.fixed_length;
                tokens.drain(..excess);
            }
            Truncation::Back => tokens.truncate(self.fixed_length),
        }
    }
}
