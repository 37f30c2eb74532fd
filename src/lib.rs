//! ragchat - Retrieval-Augmented Chat
//!
//! A console chat assistant that grounds each reply on the top hits from a
//! managed search index.
//!
//! # Architecture
//!
//! - **search / completion**: capability traits and their Azure HTTP clients
//! - **rag**: one search per query, hits rendered into a context block
//! - **chat**: conversation history and the retrieve-augment-complete step
//! - **cli / repl**: configuration, arguments, and console front ends

pub mod errors;
pub mod types;
pub mod http;

// Re-export commonly used types
pub use errors::{RagError, Result};

pub mod search;
pub mod completion;
pub mod rag;
pub mod chat;

pub mod cli;
pub mod logging;
pub mod repl;

pub use chat::{ChatSession, Conversation};
pub use completion::CompletionCapability;
pub use rag::RetrievalAugmenter;
pub use search::{SearchCapability, SearchHit, SearchRequest};
