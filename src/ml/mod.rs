// ============================================================
// Layer 5 — ML Glue
// ============================================================
// The small amount of model-facing code this tool needs.
// Model architecture and the training loop live in the
// downstream driver; this layer only hands it what it needs
// to initialise an embedding layer.
//
//   init.rs      — Xavier/Glorot uniform initialisation
//   embedding.rs — vocabulary vectors as a burn tensor
//
// Reference: Glorot & Bengio (2010)
//            Burn Book §3 (Building Blocks)

/// Weight initialisers
pub mod init;

/// Embedding weight tensors built from the vocabulary
pub mod embedding;
