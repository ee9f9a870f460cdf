use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, MietteHandlerOpts, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

mod repl;

use repl::{ReplConfig, ReplSession};

#[derive(Parser)]
#[command(
    name = "bigcalc",
    version,
    about = "Arbitrary-precision integer calculator",
    long_about = "bigcalc evaluates integer expressions of any size with +, -, *, /, parentheses and variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Prompt shown before each line in interactive mode
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,

    /// File used to persist line history between sessions
    #[arg(long, value_name = "FILE", conflicts_with = "no_history")]
    history_file: Option<String>,

    /// Do not load or save line history
    #[arg(long)]
    no_history: bool,

    /// Print the full diagnostic for every error to stderr
    #[arg(short, long, global = true)]
    verbose_errors: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every line of the given files as if typed into the REPL
    Run {
        /// Input files (use '-' to read from stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

impl Cli {
    fn repl_config(&self) -> ReplConfig {
        let mut config = ReplConfig {
            verbose_errors: self.verbose_errors,
            ..ReplConfig::default()
        };

        if let Some(ref prompt) = self.prompt {
            config.prompt = prompt.clone();
        }
        if self.history_file.is_some() {
            config.history_file = self.history_file.clone();
        }
        if self.no_history {
            config.persist_history = false;
        }
        config
    }
}

fn main() {
    setup_miette_handler();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.repl_config();

    let outcome = match cli.command {
        Some(Commands::Run { files }) => handle_run_command(files, config),
        None => run_interactive(config),
    };

    if let Err(report) = outcome {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

/// Configure miette for error reports
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

/// Enable tracing output on stderr when `RUST_LOG` is set,
/// e.g. `RUST_LOG=bigcalc_interpreter=trace`.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run_interactive(config: ReplConfig) -> Result<()> {
    let mut session = ReplSession::with_config(config);
    session.run()?;
    Ok(())
}

fn handle_run_command(files: Vec<PathBuf>, config: ReplConfig) -> Result<()> {
    let mut session = ReplSession::with_config(ReplConfig {
        persist_history: false,
        ..config
    });
    let mut stdout = io::stdout();

    for file_path in files {
        let source = read_source(&file_path)?;
        tracing::debug!(file = %file_path.display(), "running script");

        if !session.run_script(&source, &mut stdout)? {
            break;
        }
    }

    session.print_goodbye(&mut stdout).into_diagnostic()?;
    Ok(())
}

fn read_source(file_path: &Path) -> Result<String> {
    if file_path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok(buffer);
    }

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    fs::read_to_string(file_path).into_diagnostic()
}
