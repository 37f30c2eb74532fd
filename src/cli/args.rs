//! Command-line argument parsing for ragchat
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ragchat - Retrieval-augmented chat over Azure AI Search and Azure OpenAI
#[derive(Parser, Debug)]
#[command(name = "ragchat")]
#[command(version)]
#[command(about = "Chat with a model grounded on your search index", long_about = None)]
pub struct Args {
    /// Configuration file path (.toml, or .json in appsettings layout)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (warnings), -v (info), -vv (debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand (scripted chat when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the scripted travel-assistant conversation
    Chat,

    /// Start free-form interactive chat
    Repl,

    /// Retrieve context for a query and print it
    Search {
        /// Query text
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Display resolved configuration with keys masked
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run, defaulting to the scripted chat
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log filter directive for this level
    pub fn log_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "ragchat=info,warn",
            Verbosity::VeryVerbose => "ragchat=debug,info",
        }
    }

    /// Check if should show spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
