// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing the review-preparation problem:
//
//   review.rs  — one raw CSV row before any processing
//   example.rs — a processed (tokens, label) pair and the two
//                split modes (Train = labeled, Test = unlabeled)
//   traits.rs  — the seams other layers implement
//   error.rs   — the typed error every lower layer returns
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only structs, enums and traits

/// A raw review row read from a tabular source
pub mod review;

/// Processed examples and the split modes that label them
pub mod example;

/// Core abstractions (traits) that other layers implement
pub mod traits;

/// Error taxonomy shared by the data and infra layers
pub mod error;
