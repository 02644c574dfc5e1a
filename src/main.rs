use anyhow::Result;
use clap::{Parser, Subcommand};
use jats::app::App;
use jats::commands::{self, AddOptions};
use jats::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Terminal client for the JATS task tracker.
#[derive(Parser)]
#[command(name = "jats", version, about)]
struct Cli {
    /// Path to the credential file (defaults to ~/.jats.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a task without entering the browser.
    Add {
        /// Task input: words, +tag/@tag tags, and -t/-p/-d/-c flags.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
        /// Resolve the task immediately after creation.
        #[arg(short, long)]
        complete: bool,
        /// Log this duration against the new task (30m, 1h, 2h30m, 1.5h).
        #[arg(short, long)]
        time: Option<String>,
        /// Priority: low, medium, or high.
        #[arg(short, long)]
        priority: Option<String>,
        /// Date for the task, passed to the server verbatim.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Authenticate and store the session token.
    Login {
        /// Username; prompted for when omitted.
        username: Option<String>,
    },
    /// Discard the stored session token.
    Logout,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    // The browser owns the terminal, so diagnostics go to a file.
    let _log_guard = init_logging();

    if let Err(error) = run(cli).await {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Some(Command::Add {
            words,
            complete,
            time,
            priority,
            date,
        }) => {
            commands::add(
                &config,
                &words,
                AddOptions {
                    complete,
                    time,
                    priority,
                    date,
                },
            )
            .await?
        }
        Some(Command::Login { username }) => {
            commands::login(config, cli.config.as_deref(), username, None).await?
        }
        Some(Command::Logout) => commands::logout(config, cli.config.as_deref()).await?,
        None => App::start(config).await?,
    }
    Ok(())
}

fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let directory = dirs::cache_dir()?.join("jats");
    let appender = tracing_appender::rolling::never(directory, "jats.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
