// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a review CSV to device-tagged tensor batches.
//
//   review CSV
//       │
//       ▼
//   CsvReviewLoader   → reads rows, checks the review/score header
//       │
//       ▼
//   ReviewTokenizer   → punctuation filter, clitic split, rewrites
//       │
//       ▼
//   TextField         → lowercase + fixed-length truncation
//       │
//       ▼
//   ReviewDataset     → Examples in row order (burn Dataset)
//       │
//       ├──▶ Vocabulary (train split only, + pretrained vectors)
//       ▼
//   ReviewBatcher     → pads and stacks into tensors (burn Batcher)
//       │
//       ▼
//   review_loader     → burn DataLoader, shuffled / sequential passes
//
// Each module does one step and is tested on its own.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads review rows from CSV files
pub mod loader;

/// Splits and normalises review text
pub mod tokenizer;

/// Tokenizer + lowercase + truncation rules for the review column
pub mod field;

/// Implements burn's Dataset trait for processed reviews
pub mod dataset;

/// Token ↔ index mapping with attached word vectors
pub mod vocab;

/// Implements burn's Batcher trait to create tensor batches
pub mod batcher;

/// burn DataLoaders in training or evaluation order
pub mod iterator;
