//! Table command implementation
//!
//! Tabulates Φ(z), φ(z) and erf(z) over an evenly spaced grid.

use std::io::Write;

use stats_core::math::{nerf, norm_pdf};
use tracing::info;

use super::output::write_rows;
use crate::config::{CliConfig, TableRange};
use crate::Result;

/// Run the table command
///
/// `range` overrides `config.table` when given.
pub fn run<W: Write>(range: Option<TableRange>, config: &CliConfig, out: &mut W) -> Result<()> {
    let range = range.unwrap_or(config.table);
    range.validate()?;

    let points = range.points();
    info!(
        from = range.from,
        to = range.to,
        step = range.step,
        rows = points.len(),
        method = %config.method,
        "Tabulating normal distribution"
    );

    let rows: Vec<Vec<f64>> = points
        .iter()
        .map(|&z| vec![z, config.method.cdf(z), norm_pdf(z), nerf(z)])
        .collect();

    write_rows(
        out,
        config.format,
        config.precision,
        &["z", "cdf", "pdf", "erf"],
        &rows,
    )
}
