// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Maps tokens to integer indices and carries one dense vector
// per index.
//
// Layout:
//   index 0 → <unk>   (every out-of-vocabulary token)
//   index 1 → <pad>   (right padding up to fixed_length)
//   index 2.. → corpus tokens, most frequent first, ties broken
//               alphabetically, at most max_size of them
//
// The builder only accepts ReviewDataset<Train>, so the test
// split can never leak into the vocabulary.
//
// Vectors: each token is looked up in the pretrained table by
// exact string. Rows the table does not cover (the specials
// included) are filled with Xavier-uniform noise rather than
// zeros.

use burn::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::dataset::ReviewDataset;
use crate::domain::example::Train;
use crate::domain::traits::WordVectors;
use crate::ml::init::xavier_rows;

pub const UNK_TOKEN: &str = "<unk>";
pub const PAD_TOKEN: &str = "<pad>";

pub const UNK_INDEX: usize = 0;
pub const PAD_INDEX: usize = 1;

/// A row-major [rows, dim] table of floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingTable {
    pub dim:  usize,
    pub data: Vec<f32>,
}

impl EmbeddingTable {
    pub fn rows(&self) -> usize {
        if self.dim == 0 { 0 } else { self.data.len() / self.dim }
    }
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    itos:    Vec<String>,
    stoi:    HashMap<String, usize>,
    freqs:   HashMap<String, usize>,
    vectors: Option<EmbeddingTable>,
}

impl Vocabulary {
    /// Count tokens over the training split and keep the top `max_size`.
    pub fn build(dataset: &ReviewDataset<Train>, max_size: usize) -> Self {
        let mut freqs: HashMap<String, usize> = HashMap::new();
        for example in dataset.examples() {
            for token in &example.tokens {
                *freqs.entry(token.clone()).or_insert(0) += 1;
            }
        }

        let specials = [UNK_TOKEN, PAD_TOKEN];

        let mut ranked: Vec<(&String, usize)> = freqs
            .iter()
            .filter(|(t, _)| !specials.contains(&t.as_str()))
            .map(|(t, &n)| (t, n))
            .collect();
        // Frequency descending, then token ascending for a stable order
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_size);

        let mut itos: Vec<String> = specials.iter().map(|s| s.to_string()).collect();
        itos.extend(ranked.into_iter().map(|(t, _)| t.clone()));

        let stoi = itos
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        tracing::info!(
            "Vocabulary built: {} distinct train tokens, {} kept (max_size={})",
            freqs.len(),
            itos.len() - specials.len(),
            max_size,
        );

        Self { itos, stoi, freqs, vectors: None }
    }

    /// Attach one vector per index from `pretrained`.
    ///
    /// Misses are drawn on `device`. Returns how many tokens were
    /// found in the pretrained table.
    pub fn attach_vectors<B: Backend>(&mut self, pretrained: &impl WordVectors, device: &B::Device) -> usize {
        let dim      = pretrained.dim();
        let mut data = vec![0.0f32; self.itos.len() * dim];

        let mut misses = Vec::new();
        for (i, token) in self.itos.iter().enumerate() {
            match pretrained.vector(token) {
                Some(v) => data[i * dim..(i + 1) * dim].copy_from_slice(v),
                None    => misses.push(i),
            }
        }
        let hits = self.itos.len() - misses.len();

        let noise = xavier_rows::<B>(misses.len(), dim, device);
        for (&i, row) in misses.iter().zip(noise.chunks_exact(dim.max(1))) {
            data[i * dim..(i + 1) * dim].copy_from_slice(row);
        }

        tracing::info!(
            "Attached {}-d vectors: {} of {} tokens found in pretrained table",
            dim,
            hits,
            self.itos.len(),
        );

        self.vectors = Some(EmbeddingTable { dim, data });
        hits
    }

    /// Total entries, specials included
    pub fn len(&self) -> usize {
        self.itos.len()
    }

    /// Index of `token`, falling back to <unk>
    pub fn index_of(&self, token: &str) -> usize {
        self.stoi.get(token).copied().unwrap_or(UNK_INDEX)
    }

    pub fn itos(&self) -> &[String] {
        &self.itos
    }

    /// Train-split token counts
    pub fn freqs(&self) -> &HashMap<String, usize> {
        &self.freqs
    }

    pub fn vectors(&self) -> Option<&EmbeddingTable> {
        self.vectors.as_ref()
    }

    pub fn numericalize(&self, tokens: &[String]) -> Vec<usize> {
        tokens.iter().map(|t| self.index_of(t)).collect()
    }
}
