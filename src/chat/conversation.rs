//! Conversation history
//!
//! An ordered, append-only turn sequence. Augmentation never mutates it: the
//! hidden instruction goes into a temporary copy built for one completion call.

use serde::{Deserialize, Serialize};

use crate::types::{ChatTurn, Role};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a conversation seeded with system prompts
    pub fn with_system_prompts<I, S>(prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            turns: prompts.into_iter().map(ChatTurn::system).collect(),
        }
    }

    /// Append a turn, returning the extended conversation
    pub fn with_turn(mut self, turn: ChatTurn) -> Self {
        self.turns.push(turn);
        self
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent user turn
    pub fn last_user(&self) -> Option<&ChatTurn> {
        self.turns.iter().rev().find(|t| t.role == Role::User)
    }

    /// Copy of the turns with a system instruction placed immediately before
    /// the most recent user turn, or at the end if there is none
    pub fn augmented(&self, instruction: &str) -> Vec<ChatTurn> {
        let position = self
            .turns
            .iter()
            .rposition(|t| t.role == Role::User)
            .unwrap_or(self.turns.len());

        let mut turns = Vec::with_capacity(self.turns.len() + 1);
        turns.extend_from_slice(&self.turns[..position]);
        turns.push(ChatTurn::system(instruction));
        turns.extend_from_slice(&self.turns[position..]);
        turns
    }

    /// One `role: content` line per turn
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}\n", t))
            .collect()
    }
}
