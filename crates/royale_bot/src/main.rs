//! Royale bot binary.
//!
//! Plays one game over stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! # Play with the built-in policy
//! cargo run -p royale_bot
//!
//! # Play with a custom policy, logging each decision
//! cargo run -p royale_bot -- --policy policies/archers.ron --verbose
//!
//! # Print the effective policy as RON
//! cargo run -p royale_bot -- policy
//! ```
//!
//! Logs go to stderr; stdout carries only orders.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use royale_bot::{BotRunner, ProtocolError};
use royale_core::policy::{Policy, PolicyError};

#[derive(Parser)]
#[command(name = "royale_bot")]
#[command(about = "Base-building contest bot speaking the line protocol on stdin/stdout")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Policy file (RON) to use instead of the built-in one
    #[arg(short, long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective policy as RON and exit
    Policy,
}

#[derive(Debug, Error)]
enum BotError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Failed to render policy: {0}")]
    Render(#[from] ron::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for protocol)
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let result = match cli.command {
        Some(Commands::Policy) => cmd_policy(cli.policy.as_deref()),
        None => cmd_run(cli.policy.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_policy(path: Option<&Path>) -> Result<Policy, BotError> {
    match path {
        Some(path) => {
            let policy = Policy::load(path)?;
            tracing::info!(path = %path.display(), name = %policy.name, "Loaded policy");
            Ok(policy)
        }
        None => Ok(Policy::default()),
    }
}

/// Play one game
fn cmd_run(path: Option<&Path>) -> Result<(), BotError> {
    let policy = load_policy(path)?;

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    BotRunner::new(stdin, stdout, policy).run()?;
    Ok(())
}

/// Print the policy in effect
fn cmd_policy(path: Option<&Path>) -> Result<(), BotError> {
    use std::io::Write;

    let policy = load_policy(path)?;
    let pretty = ron::ser::to_string_pretty(&policy, ron::ser::PrettyConfig::default())?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{pretty}")?;
    Ok(())
}
