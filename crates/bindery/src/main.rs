//! Bindery CLI - documentation build pipeline for the YASL native library.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "bindery")]
#[command(about = "Build browsable HTML docs from the library's annotated headers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the documentation toolchain into the package environment
    Install,

    /// Build the documentation site
    Build {
        /// Output directory (defaults to config or "_build")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let config = config::load(&cli.config)?;

    // No subcommand means install the toolchain, then build.
    match cli.command {
        Some(Commands::Install) => {
            commands::install::run(&config).await?;
        }
        Some(Commands::Build { output }) => {
            commands::build::run(&config, output).await?;
        }
        None => {
            commands::install::run(&config).await?;
            commands::build::run(&config, None).await?;
        }
    }

    Ok(())
}
