//! chatterbox CLI: chat with a simulated assistant

use chatterbox_engine::{ChatSession, Config, Message, Submission};
use chatterbox_tui::theme::ThemeName;
use chatterbox_tui::{run_tui, TuiOptions, UiConfig};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "CHATTERBOX_LOG";

/// Default log file name, placed in the temp directory.
const LOG_FILE_NAME: &str = "chatterbox.log";

/// Chat with a simulated AI assistant
#[derive(Parser, Debug)]
#[command(name = "chatterbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for deterministic reply delays and choices
    #[arg(long, global = true, value_name = "N")]
    seed: Option<u64>,

    /// Color theme (mocha, latte, high-contrast)
    #[arg(long, global = true, default_value = "mocha")]
    theme: ThemeName,

    /// Log file for the TUI (default: chatterbox.log in the temp directory)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Directory transcripts are exported into (default: current directory)
    #[arg(long, global = true, value_name = "PATH")]
    export_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Send messages without the TUI and print the conversation
    Say {
        /// Messages to send, in order
        #[arg(required = true)]
        messages: Vec<String>,

        /// Output one JSON message per line
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Write it to a file instead
        #[arg(long, value_name = "PATH")]
        write: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        None | Some(Commands::Tui) => {
            let log_file = cli
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME));
            init_file_logging(&log_file)?;

            let options = TuiOptions {
                config,
                ui: UiConfig::from_env().with_theme(cli.theme),
                export_dir: cli.export_dir.unwrap_or_else(default_export_dir),
            };
            runtime()?.block_on(run_tui(options))
        }
        Some(Commands::Say { messages, json }) => {
            init_stderr_logging();
            let mut stdout = io::stdout().lock();
            runtime()?.block_on(cmd_say(&config, &messages, json, &mut stdout))?;
            Ok(())
        }
        Some(Commands::Config { write }) => cmd_config(&config, write.as_deref()),
    }
}

/// Load the config file (if any) and apply command-line overrides.
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default(path)?;
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn default_export_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir())
}

fn runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to a file; the terminal belongs to the TUI.
fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Submit each message in turn, waiting for every reply.
async fn cmd_say<W: Write>(
    config: &Config,
    messages: &[String],
    json: bool,
    out: &mut W,
) -> io::Result<()> {
    let mut session = ChatSession::new(config);
    if let Some(greeting) = session.conversation().last() {
        write_message(out, greeting, json)?;
    }

    for text in messages {
        match session.submit(text) {
            Submission::Accepted(_) => {
                if let Some(sent) = session.conversation().last() {
                    write_message(out, sent, json)?;
                }
                if let Some(reply) = session.next_reply().await {
                    write_message(out, reply, json)?;
                }
            }
            Submission::Ignored(reason) => {
                warn!(?reason, "skipping message");
            }
        }
    }

    out.flush()
}

fn write_message<W: Write>(out: &mut W, message: &Message, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, message)?;
        writeln!(out)
    } else {
        writeln!(out, "{}: {}", message.sender.label(), message.content)
    }
}

fn cmd_config(config: &Config, write: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match write {
        Some(path) => {
            config.save(path)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}
