// Retrieval-augmented generation
//
// Components:
// - Augmenter: one search per query, top-3 hits, title/content projection
// - Context: rendering hits and wrapping them into the hidden instruction

pub mod augmenter;
pub mod context;

// Re-export key types
pub use augmenter::{RetrievalAugmenter, SELECT_FIELDS, TOP_K};
pub use context::{build_instruction, format_hits};
