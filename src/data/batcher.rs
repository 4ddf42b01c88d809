// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements burn's Batcher trait to turn a Vec of Examples
// into tensors on the target device.
//
// How a batch is built:
//   1. numericalise each example through the shared vocabulary
//   2. right-pad with <pad> up to fixed_length
//   3. flatten and reshape to [batch_size, fixed_length]
//   4. stack labels into a [batch_size] float tensor, if the
//      split has labels
//
// Example with fixed_length = 5:
//   ["great", "pool"]        → [ 7, 12,  1,  1,  1]
//   ["noisy", "room", "zzz"] → [31,  9,  0,  1,  1]   (zzz → <unk>)
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};
use std::sync::Arc;

use crate::data::vocab::{Vocabulary, PAD_INDEX};
use crate::domain::example::{Example, Label};

// ─── ReviewBatch ──────────────────────────────────────────────────────────────
/// A batch of reviews ready for a model forward pass.
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// Token indices — shape: [batch_size, fixed_length]
    pub tokens: Tensor<B, 2, Int>,

    /// Unpadded length of each row
    pub lengths: Vec<usize>,

    /// Scores — shape: [batch_size]; None for unlabeled splits
    pub labels: Option<Tensor<B, 1>>,

    /// Dataset position of each row, so predictions can be traced
    /// back to the source file
    pub indices: Vec<usize>,
}

impl<B: Backend> ReviewBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.lengths.len()
    }
}

// ─── ReviewBatcher ────────────────────────────────────────────────────────────
/// Holds the device tag and the shared vocabulary.
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device:   B::Device,
    vocab:        Arc<Vocabulary>,
    fixed_length: usize,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device, vocab: Arc<Vocabulary>, fixed_length: usize) -> Self {
        Self { device, vocab, fixed_length }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// Plugs into burn's DataLoaderBuilder. Each item carries its own
// dataset position, so the batch stays traceable after a shuffle.
impl<B: Backend, L: Label> Batcher<Example<L>, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, items: Vec<Example<L>>) -> ReviewBatch<B> {
        let batch_size = items.len();
        let seq_len    = self.fixed_length;

        let mut flat    = Vec::with_capacity(batch_size * seq_len);
        let mut lengths = Vec::with_capacity(batch_size);
        let mut indices = Vec::with_capacity(batch_size);

        for item in &items {
            let ids = self.vocab.numericalize(&item.tokens);
            // Examples are already capped, this guards hand-built ones
            let used = ids.len().min(seq_len);
            flat.extend(ids[..used].iter().map(|&i| i as i32));
            flat.extend(std::iter::repeat(PAD_INDEX as i32).take(seq_len - used));
            lengths.push(used);
            indices.push(item.index);
        }

        let tokens = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        // Either every item has a label or none do
        let labels: Option<Vec<f32>> = items.iter().map(|e| e.label.value()).collect();
        let labels = labels
            .filter(|l| !l.is_empty())
            .map(|l| Tensor::<B, 1>::from_floats(l.as_slice(), &self.device));

        ReviewBatch { tokens, lengths, labels, indices }
    }
}
