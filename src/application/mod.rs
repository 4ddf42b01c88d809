// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data and infra layers into one workflow.
//
// Rules for this layer:
//   - No tokenising or tensor code here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination and error context
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The end-to-end preparation workflow
pub mod prepare_use_case;
