//! Chat orchestration
//!
//! Owns the conversation, runs retrieval before every completion, and keeps
//! the retrieved context out of the stored history.

pub mod conversation;
pub mod script;
pub mod session;

pub use conversation::Conversation;
pub use session::{ChatSession, Reply};
