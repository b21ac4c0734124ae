//! Pipeline orchestration.

use std::path::Path;
use std::time::{Duration, Instant};

use ordermill_aggregate::{build_customer_directory, build_item_catalog};
use ordermill_core::{PipelineResult, ResolvedConfig, ValidationWarning};

use crate::loader;
use crate::writer::{self, OutputPaths};

/// Outcome of one completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Records that passed element validation.
    pub orders_loaded: usize,
    /// Elements rejected by element validation.
    pub orders_skipped: usize,
    /// Unique phone numbers in the customer directory.
    pub customers: usize,
    /// Unique item names in the item catalog.
    pub items: usize,
    /// Item-lines counted into the catalog.
    pub item_lines: u64,
    /// Everything non-fatal that was wrong with the input, in loader,
    /// customer, item order.
    pub warnings: Vec<ValidationWarning>,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

/// Run the whole pipeline: load, aggregate, write both outputs.
///
/// Only document-level failures abort; per-record issues come back as
/// warnings on the report with the run still completing.
pub fn run(
    input: &Path,
    config: &ResolvedConfig,
    output_dir: Option<&Path>,
) -> PipelineResult<RunReport> {
    let started = Instant::now();
    tracing::info!("processing orders from {}", input.display());

    let batch = loader::load_orders(input, config.encoding)?;
    tracing::info!(
        "loaded {} orders ({} skipped)",
        batch.orders.len(),
        batch.skipped
    );

    let (directory, customer_warnings) =
        build_customer_directory(&batch.orders, &config.phone_pattern);
    tracing::info!("found {} unique customers", directory.len());

    let (catalog, item_warnings) = build_item_catalog(&batch.orders);
    tracing::info!("found {} unique items", catalog.len());

    let paths = OutputPaths::resolve(config, output_dir);
    writer::write_outputs(&directory, &catalog, config, &paths)?;

    let mut warnings = batch.warnings;
    warnings.extend(customer_warnings);
    warnings.extend(item_warnings);

    Ok(RunReport {
        orders_loaded: batch.orders.len(),
        orders_skipped: batch.skipped,
        customers: directory.len(),
        items: catalog.len(),
        item_lines: catalog.total_lines(),
        warnings,
        elapsed: started.elapsed(),
    })
}
