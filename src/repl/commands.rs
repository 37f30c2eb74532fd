//! Command handler for REPL built-in commands

use colored::*;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    History,
    Reset,
    Exit,
    Unknown { input: String },
}

/// Check whether a line is a slash command rather than a chat message
pub fn is_command(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

/// Parse input string into a command
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Unknown { input: input.to_string() };
    };

    match rest.split_whitespace().next().map(str::to_lowercase).as_deref() {
        Some("help" | "h") => Command::Help,
        Some("history") => Command::History,
        Some("reset") => Command::Reset,
        Some("exit" | "quit" | "q") => Command::Exit,
        _ => Command::Unknown { input: input.to_string() },
    }
}

/// Print the command list
pub fn show_help() {
    println!("\n{}", "Commands".bold().cyan());
    println!("{}", "-".repeat(60).cyan());
    println!("  {}  Show this help", "/help".green());
    println!("  {}  Print the conversation so far", "/history".green());
    println!("  {}  Start over with only the system prompts", "/reset".green());
    println!("  {}  End the chat and print the transcript", "/exit".green());
    println!();
}
