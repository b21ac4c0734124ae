//! Command-line surface and dispatch.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use ordermill_core::{PipelineResult, ResolvedConfig};
use ordermill_pipeline::RunReport;

#[derive(Debug, Parser)]
#[command(name = "ordermill")]
#[command(about = "Aggregate restaurant orders into customer and item summaries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Process an orders document and write both aggregate files
    Run {
        /// Path to the JSON orders document
        input: PathBuf,
        /// Optional config file (positional form)
        config_file: Option<PathBuf>,
        /// Config file; wins over the positional form when both are given
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Existing directory to place the output files in
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Print every warning plus counts and timing
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Cli {
    /// Whether the selected command asked for verbose reporting.
    ///
    /// Needed before dispatch: logging is initialized first.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Commands::Run { verbose, .. } => *verbose,
        }
    }
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> PipelineResult<()> {
    match cli.command {
        Commands::Run {
            input,
            config_file,
            config,
            output_dir,
            verbose,
        } => run(
            &input,
            config.or(config_file).as_deref(),
            output_dir.as_deref(),
            verbose,
        ),
    }
}

fn run(
    input: &Path,
    config_path: Option<&Path>,
    output_dir: Option<&Path>,
    verbose: bool,
) -> PipelineResult<()> {
    let config = ResolvedConfig::resolve(config_path)?;
    let report = ordermill_pipeline::run(input, &config, output_dir)?;
    report_outcome(&report, verbose);
    Ok(())
}

/// Report warnings and counts once the run has finished.
fn report_outcome(report: &RunReport, verbose: bool) {
    if verbose {
        for warning in &report.warnings {
            tracing::warn!("{warning}");
        }
        tracing::info!(
            "processed {} orders ({} skipped), {} warnings, {} customers, {} items in {:?}",
            report.orders_loaded,
            report.orders_skipped,
            report.warnings.len(),
            report.customers,
            report.items,
            report.elapsed
        );
    } else if !report.warnings.is_empty() {
        tracing::warn!(
            "{} validation warnings (run with --verbose to see each one)",
            report.warnings.len()
        );
    }
    tracing::info!("processing complete");
}
