//! Display manager for terminal output
//!
//! Color-coded messages plus a spinner while a network call is outstanding.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::chat::Conversation;
use crate::types::Role;

pub struct DisplayManager {
    show_spinner: bool,
    tick_interval: Duration,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            show_spinner: true,
            tick_interval: Duration::from_millis(100),
        }
    }

    /// Disable the spinner (quiet mode, non-interactive output)
    pub fn without_spinner(mut self) -> Self {
        self.show_spinner = false;
        self
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, model: &str, index: &str) {
        let width = 64;
        let rule = "=".repeat(width);
        println!("\n{}", rule.cyan());
        println!("{}", format!("  ragchat {} - Retrieval-Augmented Chat", version).bold().cyan());
        println!("{}", format!("  Model: {} | Index: {}", model, index).dimmed());
        println!("{}\n", rule.cyan());
        println!("Type your message (or {} for commands, {} to quit)\n",
            "/help".green(), "/exit".green());
    }

    /// Start a spinner for an outstanding request; hidden when disabled
    pub fn start_waiting(&self, message: &str) -> ProgressBar {
        if !self.show_spinner {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.tick_interval);
        pb
    }

    /// Assistant-authored line
    pub fn show_assistant(&self, text: &str) {
        println!("{}", text);
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Print the closing banner and full transcript
    pub fn show_transcript(&self, conversation: &Conversation) {
        println!("Chat Ended.\n");
        println!("Chat History:");
        self.show_history(conversation);
    }

    /// Print every turn as `role: content`, role colored
    pub fn show_history(&self, conversation: &Conversation) {
        for turn in conversation.turns() {
            println!("{}: {}", role_label(turn.role), turn.content);
        }
    }
}

fn role_label(role: Role) -> ColoredString {
    match role {
        Role::System => role.as_str().dimmed(),
        Role::User => role.as_str().green(),
        Role::Assistant => role.as_str().cyan(),
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}
