// ============================================================
// Layer 4 — Batch Loaders
// ============================================================
// Wraps a ReviewDataset in burn's DataLoader.
//
// Each call to loader.iter() is ONE finite pass:
//   - Shuffled   → burn draws a fresh permutation per pass from
//                  the seeded RNG (training order)
//   - Sequential → the dataset's original order, never sorted
//                  by length (evaluation order)
// A pass ends when every example has been yielded exactly once;
// it never wraps around. The last batch may be short.
//
// No worker threads: batches are built on the calling thread.

use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::*,
};
use std::sync::Arc;

use crate::data::batcher::{ReviewBatch, ReviewBatcher};
use crate::data::dataset::ReviewDataset;
use crate::domain::example::SplitMode;

/// A reusable loader; every .iter() is a new pass.
pub type ReviewLoader<B> = Arc<dyn DataLoader<ReviewBatch<B>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOrder {
    /// Reshuffled every pass; the seed fixes the sequence of permutations
    Shuffled { seed: u64 },
    Sequential,
}

/// Build a loader over `dataset`. `batch_size` must be at least 1;
/// PrepareConfig::validate checks this before any loader is built.
pub fn review_loader<B: Backend, M: SplitMode>(
    dataset:    ReviewDataset<M>,
    batcher:    ReviewBatcher<B>,
    batch_size: usize,
    order:      BatchOrder,
) -> ReviewLoader<B> {
    tracing::debug!(
        "{} loader: {} examples, {} batches per pass, {:?}",
        M::NAME,
        dataset.example_count(),
        dataset.example_count().div_ceil(batch_size.max(1)),
        order,
    );

    let builder = DataLoaderBuilder::new(batcher).batch_size(batch_size);
    let builder = match order {
        BatchOrder::Shuffled { seed } => builder.shuffle(seed),
        BatchOrder::Sequential        => builder,
    };
    builder.build(dataset)
}
