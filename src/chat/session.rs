//! Chat session: retrieve, augment, complete
//!
//! Each reply runs one search and one completion, in that order. The hidden
//! instruction exists only in the request built for that completion.

use std::sync::Arc;

use crate::chat::conversation::Conversation;
use crate::cli::config::Config;
use crate::completion::{AzureChatClient, CompletionCapability};
use crate::errors::Result;
use crate::rag::{build_instruction, RetrievalAugmenter};
use crate::types::ChatTurn;

/// Outcome of one reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// History extended with the user turn and the assistant reply
    pub conversation: Conversation,
    pub turn: ChatTurn,
}

pub struct ChatSession {
    augmenter: RetrievalAugmenter,
    completion: Arc<dyn CompletionCapability>,
}

impl ChatSession {
    pub fn new(augmenter: RetrievalAugmenter, completion: Arc<dyn CompletionCapability>) -> Self {
        Self {
            augmenter,
            completion,
        }
    }

    /// Build both Azure clients from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let augmenter = RetrievalAugmenter::from_config(&config.search, &config.http)?;
        let completion = AzureChatClient::from_config(&config.completion, &config.http)?;
        Ok(Self::new(augmenter, Arc::new(completion)))
    }

    pub fn augmenter(&self) -> &RetrievalAugmenter {
        &self.augmenter
    }

    /// Answer `user_text` given `history`.
    ///
    /// On success the returned conversation is `history + [user, assistant]`.
    /// On failure `history` is untouched and the error is returned as-is.
    pub async fn reply(&self, history: &Conversation, user_text: &str) -> Result<Reply> {
        let context = self.augmenter.retrieve(user_text).await?;
        let with_user = history.clone().with_turn(ChatTurn::user(user_text));

        let request = with_user.augmented(&build_instruction(&context));
        tracing::debug!(turns = request.len(), "requesting completion");

        let turn = self.completion.complete(&request).await.map_err(|e| {
            tracing::warn!(error = %e, "completion failed");
            e
        })?;
        tracing::info!(chars = turn.content.len(), "received reply");

        Ok(Reply {
            conversation: with_user.with_turn(turn.clone()),
            turn,
        })
    }
}
