//! Trace Graph Studio CLI
//!
//! Turns execution traces into node/edge graph documents.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_graph_studio::commands::{
    display_schema, display_version, execute_render, validate_args, validate_trace_file,
    RenderArgs,
};
use trace_graph_studio::utils::config::{DEFAULT_EXEC_URL, DEFAULT_LANGUAGE};

/// Trace Graph Studio - execution traces as graphs
#[derive(Parser, Debug)]
#[command(name = "trace-graph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build step graphs from a trace
    Render {
        /// Trace JSON file
        #[arg(short, long, conflicts_with = "code")]
        trace: Option<PathBuf>,

        /// Source file to execute remotely instead of reading a trace
        #[arg(short, long)]
        code: Option<PathBuf>,

        /// Language of the source file
        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        language: String,

        /// Session id for the execution service
        #[arg(long)]
        session: Option<String>,

        /// Execution service endpoint
        #[arg(long, env = "TRACE_GRAPH_EXEC_URL", default_value = DEFAULT_EXEC_URL)]
        exec_url: String,

        /// Output path for the graph document
        #[arg(short, long, default_value = "graph.json")]
        output: PathBuf,

        /// Render only this step (0-based)
        #[arg(short, long)]
        step: Option<usize>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a trace JSON file
    Validate {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            trace,
            code,
            language,
            session,
            exec_url,
            output,
            step,
            summary,
        } => {
            let args = RenderArgs {
                trace_file: trace,
                code_file: code,
                language,
                session_id: session,
                exec_url,
                output_json: output,
                step,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_render(args)?;
        }

        Commands::Validate { file } => {
            validate_trace_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
