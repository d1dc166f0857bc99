//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{self, GlobalArgs};
use authgate::output::OutputMode;

/// authgate - AI-derived authenticity verification for web content
#[derive(Parser, Debug)]
#[command(
    name = "authgate",
    version,
    about = "AI-derived authenticity verification for web content",
    long_about = "Score web pages for originality, plagiarism risk and AI generation.\n\n\
                  Each page is analyzed by a language model across several independent\n\
                  runs that must agree. Agreed results are kept in a local ledger."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use this ledger file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default .authgate.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Verify one URL and record the result
    Verify {
        /// Page to analyze
        url: String,
    },

    /// Verify up to ten URLs at once (all or nothing)
    Batch {
        /// Pages to analyze
        urls: Vec<String>,

        /// Read URLs from a file, one per line
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Show one verification
    Show {
        /// Verification ID
        id: u64,
    },

    /// List all verifications
    List,

    /// Print the number of verifications
    Count,

    /// Show configuration and ledger status
    Status,

    /// Run the JSON HTTP API
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let global = GlobalArgs {
        config: cli.config,
        ledger: cli.ledger,
    };

    match cli.command {
        Some(Command::Init { force }) => commands::init(force, output_mode),
        Some(Command::Verify { url }) => commands::verify(&global, &url, output_mode),
        Some(Command::Batch { urls, file }) => {
            commands::batch(&global, urls, file.as_deref(), output_mode)
        },
        Some(Command::Show { id }) => commands::show(&global, id, output_mode),
        Some(Command::List) => commands::list(&global, output_mode),
        Some(Command::Count) => commands::count(&global, output_mode),
        Some(Command::Status) => commands::status(&global, output_mode),
        Some(Command::Serve { port }) => commands::serve(&global, port),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": authgate::VERSION
                    })
                );
            } else {
                println!("authgate v{}", authgate::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": authgate::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("authgate v{}", authgate::VERSION);
                println!("\nRun 'authgate --help' for usage");
                println!("Run 'authgate verify <url>' to get started");
            }
            Ok(())
        },
    }
}
