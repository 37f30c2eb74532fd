//! Type definitions module
//!
//! Conversation turns exchanged with the completion service.

pub mod messages;

// Re-export commonly used types
pub use messages::{ChatTurn, Role};
