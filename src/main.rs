//! Bot Commands - console front end
//!
//! Reads command lines from stdin as a single local user and prints the
//! replies, standing in for the chat transport.

use bot_commands::broadcast::BroadcastClient;
use bot_commands::command::{Dispatch, Dispatcher, Messenger, Registry};
use bot_commands::core::config::BotConfig;
use bot_commands::core::error::Result;
use bot_commands::core::types::{BroadcastCredentials, User};
use bot_commands::session::MemorySession;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Interactive command console
#[derive(Parser, Debug)]
#[command(name = "bot-commands")]
#[command(about = "Type bot commands and read the replies")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address of the local user
    #[arg(long, default_value = "me@localhost")]
    jid: String,

    /// Register the unwatch command regardless of the config file
    #[arg(long)]
    enable_unwatch: bool,
}

/// Prints replies instead of sending them over the wire
struct ConsoleMessenger;

impl Messenger for ConsoleMessenger {
    fn send_plain(&self, to: &str, text: &str) {
        println!("[to {}]\n{}\n", to, text);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    }
    .with_env_overrides();
    if args.enable_unwatch {
        config.commands.unwatch = true;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Bot commands starting...");

    // Broadcast calls run on this runtime while the loop keeps reading
    let rt = Runtime::new()?;

    let registry = Registry::builtin(&config.commands)?;
    let dispatcher = Dispatcher::new(
        registry,
        Arc::new(ConsoleMessenger),
        Arc::new(BroadcastClient::from_config(&config.broadcast)),
        rt.handle().clone(),
    );

    let mut user = User::new(args.jid.clone(), format!("{}/console", args.jid))
        .with_credentials(credentials_from_env());
    let mut session = MemorySession::new();

    println!("\n=== BOT COMMANDS ===");
    println!("{}", dispatcher.registry().help_listing());
    println!("quit\tExit.");
    println!();

    let stdin = io::stdin();
    let mut pending = Vec::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input == "quit" || input == "q" {
            break;
        }

        match dispatcher.dispatch(input, &mut user, &mut session) {
            Dispatch::UnknownCommand(name) => {
                println!("Unknown command {}. Try: help", name);
            }
            Dispatch::Deferred(handle) => pending.push(handle),
            Dispatch::Empty | Dispatch::Rejected(_) | Dispatch::Completed => {}
        }
        // The console is the transaction boundary for watch changes
        let removed = session.commit();
        if removed > 0 {
            tracing::debug!(removed, "Committed watch deletions");
        }
        pending.retain(|h| !h.is_finished());
    }

    // Let in-flight broadcasts report before exiting
    for handle in pending {
        if let Err(e) = rt.block_on(handle) {
            tracing::warn!(error = %e, "Broadcast task did not complete");
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

/// Optional: BROADCAST_UID, BROADCAST_KEY, BROADCAST_SECRET
fn credentials_from_env() -> BroadcastCredentials {
    let var = |name: &str| std::env::var(name).unwrap_or_default();
    BroadcastCredentials {
        uid: var("BROADCAST_UID"),
        key: var("BROADCAST_KEY"),
        secret: var("BROADCAST_SECRET"),
    }
}
