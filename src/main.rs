//! ragchat - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use ragchat::{
    chat::{script, ChatSession},
    cli::{Args, Commands, Config},
    logging,
    rag::RetrievalAugmenter,
    repl::{DisplayManager, ReplSession},
};

/// Run the scripted travel conversation on stdin/stdout
async fn run_chat(config: &Config) -> Result<()> {
    let session = ChatSession::from_config(config)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    script::run(&session, &mut input, &mut output).await?;
    Ok(())
}

/// Run the free-form interactive chat
async fn run_repl(config: &Config, display: DisplayManager) -> Result<()> {
    let session = ChatSession::from_config(config)?;
    display.show_banner(
        env!("CARGO_PKG_VERSION"),
        &config.completion.model_id,
        session.augmenter().index_name(),
    );

    let mut repl = match dirs::home_dir() {
        Some(home) => ReplSession::with_history(display, home.join(".ragchat").join("history"))?,
        None => ReplSession::new(display)?,
    };
    repl.run(&session).await?;
    Ok(())
}

/// Retrieve and print the context block for one query
async fn run_search(config: &Config, query: &str, display: &DisplayManager) -> Result<()> {
    let augmenter = RetrievalAugmenter::from_config(&config.search, &config.http)?;

    let pb = display.start_waiting("Searching...");
    let result = augmenter.retrieve(query).await;
    pb.finish_and_clear();

    let context = result?;
    if context.is_empty() {
        display.show_info("No matching documents");
    } else {
        print!("{}", context);
    }
    Ok(())
}

/// Print the resolved configuration without validating it
fn show_config(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_default()?,
    };
    config.apply_env(|name| std::env::var(name).ok());

    println!("{}", "Configuration".bold().cyan());
    println!("{}", "-".repeat(60).cyan());
    print!("{}", toml::to_string_pretty(&config.redacted())?);

    let missing = config.missing_keys();
    if !missing.is_empty() {
        println!();
        for key in missing {
            println!("{} {}", "Missing:".yellow().bold(), key);
        }
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let verbosity = args.verbosity();
    let display = if verbosity.show_progress() {
        DisplayManager::new()
    } else {
        DisplayManager::new().without_spinner()
    };

    let command = args.command();
    if command == Commands::Config {
        return show_config(&args);
    }

    let config = Config::load(args.config.clone())?;
    tracing::info!(
        model = %config.completion.model_id,
        index = %config.search.index_name,
        "configuration loaded"
    );

    match command {
        Commands::Chat => run_chat(&config).await,
        Commands::Repl => run_repl(&config, display).await,
        Commands::Search { query } => run_search(&config, &query, &display).await,
        Commands::Config => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbosity());

    if let Err(e) = run(args).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
