//! Bramble CLI - Command-line interface for Bramble
//!
//! Loads an edge-list file and prints structural metrics about the graph.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "bramble")]
#[command(author = "Bramble Contributors")]
#[command(version)]
#[command(about = "Structural metrics for edge-list graphs", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    shape: GraphArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options describing how to build the graph.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// JSON config file with `directed`, `weighted`, and `initial_capacity`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Treat edges as directed
    #[arg(long, global = true)]
    directed: bool,

    /// Read the third column as an edge weight
    #[arg(long, global = true)]
    weighted: bool,

    /// Initial vertex capacity (the graph grows past it as needed)
    #[arg(long, global = true)]
    capacity: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a graph and print degree, path, and assortativity metrics
    Summary {
        /// Edge-list file
        file: PathBuf,

        /// Skip the all-pairs shortest path computation
        #[arg(long)]
        skip_paths: bool,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Print the degree of a vertex
    Degree {
        /// Edge-list file
        file: PathBuf,

        /// Vertex id as it appears in the file
        label: String,
    },

    /// Print a shortest path between two vertices
    Path {
        /// Edge-list file
        file: PathBuf,

        /// Start vertex id
        from: String,

        /// End vertex id
        to: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Summary {
            file,
            skip_paths,
            json,
        } => commands::summary(&cli.shape, &file, skip_paths, json),
        Commands::Degree { file, label } => commands::degree(&cli.shape, &file, &label),
        Commands::Path { file, from, to } => commands::path(&cli.shape, &file, &from, &to),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
