//! REPL (Read-Eval-Print Loop) module for free-form chat
//!
//! Same retrieval-augmented reply path as the scripted chat, driven by
//! rustyline input until `/exit`, Ctrl-C or EOF.

pub mod commands;
pub mod display;
pub mod input;

use anyhow::Result;
use std::path::PathBuf;

use crate::chat::{script, ChatSession, Conversation};
use crate::repl::commands::{is_command, Command};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::InputHandler;
use crate::types::ChatTurn;

/// REPL session coordinator
pub struct ReplSession {
    input_handler: InputHandler,
    display_manager: DisplayManager,
    conversation: Conversation,
}

impl ReplSession {
    /// Create new REPL session
    pub fn new(display_manager: DisplayManager) -> Result<Self> {
        Ok(ReplSession {
            input_handler: InputHandler::new()?,
            display_manager,
            conversation: script::opening(),
        })
    }

    /// Create REPL session with persistent history
    pub fn with_history(display_manager: DisplayManager, history_path: PathBuf) -> Result<Self> {
        Ok(ReplSession {
            input_handler: InputHandler::with_history(history_path)?,
            display_manager,
            conversation: script::opening(),
        })
    }

    pub fn display(&self) -> &DisplayManager {
        &self.display_manager
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Handle a slash command; returns false when the session should end
    pub fn handle_command(&mut self, input: &str) -> bool {
        match commands::parse(input) {
            Command::Help => commands::show_help(),
            Command::History => self.display_manager.show_history(&self.conversation),
            Command::Reset => {
                self.conversation = script::opening();
                self.display_manager.show_info("Conversation reset");
            }
            Command::Exit => return false,
            Command::Unknown { input } => {
                self.display_manager
                    .show_warning(&format!("Unknown command: {} (try /help)", input.trim()));
            }
        }
        true
    }

    /// Send one message; on failure the conversation is left unchanged
    pub async fn send(&mut self, chat: &ChatSession, message: &str) {
        let pb = self.display_manager.start_waiting("Thinking...");
        let result = chat.reply(&self.conversation, message).await;
        pb.finish_and_clear();

        match result {
            Ok(reply) => {
                self.display_manager.show_assistant(&reply.turn.content);
                self.conversation = reply.conversation;
            }
            Err(e) => self.display_manager.show_error(&e.to_string()),
        }
    }

    /// Run the loop, print the transcript, and return the final conversation
    pub async fn run(&mut self, chat: &ChatSession) -> Result<Conversation> {
        let greeting = script::SCRIPTED_PROMPTS[0];
        self.display_manager.show_assistant(greeting);
        self.conversation =
            std::mem::take(&mut self.conversation).with_turn(ChatTurn::assistant(greeting));

        while let Some(line) = self.input_handler.read_line()? {
            if line.is_empty() {
                continue;
            }
            if is_command(&line) {
                if !self.handle_command(&line) {
                    break;
                }
                continue;
            }
            self.send(chat, &line).await;
        }

        if let Err(e) = self.input_handler.save_history() {
            tracing::warn!(error = %e, "failed to save input history");
        }
        self.display_manager.show_transcript(&self.conversation);
        Ok(self.conversation.clone())
    }
}
