// ============================================================
// Layer 5 — Embedding Weights
// ============================================================
// Converts the vocabulary's vector table into a [vocab, dim]
// float tensor so a model can copy it into its embedding layer.

use burn::prelude::*;

use crate::data::vocab::{EmbeddingTable, Vocabulary};

/// The table as a [rows, dim] tensor on `device`.
pub fn table_tensor<B: Backend>(table: &EmbeddingTable, device: &B::Device) -> Tensor<B, 2> {
    Tensor::<B, 1>::from_floats(table.data.as_slice(), device)
        .reshape([table.rows(), table.dim])
}

/// The vocabulary's vectors, or None if none were attached.
pub fn embedding_weights<B: Backend>(vocab: &Vocabulary, device: &B::Device) -> Option<Tensor<B, 2>> {
    vocab.vectors().map(|t| table_tensor::<B>(t, device))
}
