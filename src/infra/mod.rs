// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting file handling that no single pipeline step owns:
//
//   vector_store.rs   — Pretrained word vectors
//                       Parses GloVe-style text files and
//                       memoises the parsed table in a cache
//                       directory so later runs skip parsing.
//
//   artifact_store.rs — Run outputs
//                       Saves the run config as JSON and the
//                       vocabulary as a HuggingFace tokenizer.json
//                       so the training driver indexes tokens
//                       exactly as the batches do.
//
// Reference: Rust Book §9 (Error Handling)
//            tokenizers crate documentation

/// Pretrained vector loading and caching
pub mod vector_store;

/// Config and vocabulary persistence
pub mod artifact_store;
