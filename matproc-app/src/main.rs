use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod config;
mod plotting;
mod workflow;

/// Normalizes materials-processing lab entries kept in a local upload directory.
#[derive(Debug, Parser)]
#[command(name = "matproc", version, about)]
struct Cli {
    /// Configuration file (defaults to ./matproc.yaml when present).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output of the normalizers.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Overrides `upload_dir` of the configuration.
    #[arg(long, global = true)]
    upload_dir: Option<PathBuf>,

    /// Overrides `upload_id` of the configuration.
    #[arg(long, global = true)]
    upload_id: Option<String>,

    /// Overrides `output_dir` of the configuration.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize entry files (or directories of them) and write them back.
    Normalize {
        #[arg(required = true)]
        entries: Vec<PathBuf>,
        /// Write the normalized entries into this directory instead.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Normalize a solution preparation, creating its solution entry.
    Prepare { entry: PathBuf },
    /// Write the component report and composition chart of a solution.
    Report { entry: PathBuf },
    /// Render the sample map of a combinatorial library.
    PlotLibrary { entry: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    println!("--- matproc ---");
    let mut config = config::AppConfig::load(cli.config.as_deref())?;
    if let Some(upload_dir) = cli.upload_dir {
        config.upload_dir = upload_dir;
    }
    if let Some(upload_id) = cli.upload_id {
        config.upload_id = upload_id;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    match cli.command {
        Command::Normalize { entries, out } => {
            let paths = config::collect_entry_paths(&entries)?;
            workflow::run_normalize(&config, &paths, out.as_deref())?;
        }
        Command::Prepare { entry } => workflow::run_prepare(&config, &entry)?,
        Command::Report { entry } => workflow::run_report(&config, &entry)?,
        Command::PlotLibrary { entry } => workflow::run_plot_library(&config, &entry)?,
    }

    println!("\nDone. Outputs are in '{}'", config.output_dir.display());
    Ok(())
}
