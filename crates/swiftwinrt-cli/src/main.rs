//! swiftwinrt command-line tool
//!
//! Generates Swift bindings from Windows Runtime metadata documents.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::generate::GenerateOptions;
use output::{resolve_color_choice, StyledOutput};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swiftwinrt")]
#[command(about = "Swift binding generator for Windows Runtime metadata", long_about = None)]
#[command(version)]
struct Cli {
    /// When to use colored output
    #[arg(long, global = true, value_parser = ["auto", "always", "never"])]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Swift sources
    Generate {
        /// Metadata documents to load
        #[arg(short, long = "metadata", required = true, num_args = 1..)]
        metadata: Vec<PathBuf>,
        /// Projection configuration (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the ABI module name
        #[arg(long)]
        abi_module: Option<String>,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        /// Report what would be generated without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// List the module each assembly is assigned to
    Modules {
        /// Metadata documents to load
        #[arg(short, long = "metadata", required = true, num_args = 1..)]
        metadata: Vec<PathBuf>,
        /// Projection configuration (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Log to stderr when `SWIFTWINRT_LOG` holds a filter, e.g. `swiftwinrt_projection=debug`
fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_env("SWIFTWINRT_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut out = StyledOutput::new(resolve_color_choice(cli.color.as_deref()));

    match cli.command {
        Commands::Generate {
            metadata,
            config,
            abi_module,
            out: out_dir,
            dry_run,
        } => {
            let options = GenerateOptions {
                metadata,
                config,
                abi_module,
                out: out_dir,
                dry_run,
            };
            commands::generate::execute(&options, &mut out)?;
        }

        Commands::Modules { metadata, config } => {
            commands::modules::execute(&metadata, config, &mut out)?;
        }
    }

    Ok(())
}
