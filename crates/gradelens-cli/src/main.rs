//! gradelens CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "gradelens", version, about = "Grade analytics and early-warning engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one student's gradebook
    Analyze {
        /// Path to a gradebook .toml file
        #[arg(long)]
        gradebook: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write the JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compute class statistics over a directory of gradebooks
    Class {
        /// Directory containing gradebook .toml files
        #[arg(long)]
        dir: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate gradebook TOML files
    Validate {
        /// Path to gradebook file or directory
        #[arg(long)]
        gradebook: PathBuf,
    },

    /// Create starter config and sample gradebook
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gradelens=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            gradebook,
            config,
            format,
            output,
        } => commands::analyze::execute(gradebook, config, format, output),
        Commands::Class {
            dir,
            config,
            format,
        } => commands::class::execute(dir, config, format),
        Commands::Validate { gradebook } => commands::validate::execute(gradebook),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
