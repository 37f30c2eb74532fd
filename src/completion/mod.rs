//! Completion capability
//!
//! `CompletionCapability` submits an ordered list of turns and receives one
//! assistant turn; `client` implements it against Azure OpenAI.

pub mod client;

use async_trait::async_trait;

use crate::errors::Result;
use crate::types::ChatTurn;

// Re-export commonly used types
pub use client::{AzureChatClient, DEFAULT_COMPLETION_API_VERSION};

/// External chat-completion service
#[async_trait]
pub trait CompletionCapability: Send + Sync {
    /// Complete the conversation with one assistant-authored turn
    async fn complete(&self, turns: &[ChatTurn]) -> Result<ChatTurn>;
}
