//! CLI command definitions for the `iscoolgpt` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Study assistant that answers programming and cloud questions.
#[derive(Parser)]
#[command(name = "iscoolgpt", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the TOML settings file.
    #[arg(long, global = true, env = "ISCOOLGPT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(long, short, default_value = "8000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },

    /// Ask a single question and print the answer.
    Ask {
        /// The question to ask.
        question: String,

        /// Extra context for the answer.
        #[arg(long, short)]
        context: Option<String>,

        /// Maximum number of tokens in the answer.
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// Show the resolved settings (API keys redacted).
    Config,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
