//! Cdf command implementation
//!
//! Evaluates Φ(z) for each value with the configured approximation.

use std::io::Write;

use stats_core::math::cdf_batch;
use tracing::{debug, info};

use super::output::write_rows;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the cdf command
pub fn run<W: Write>(values: &[f64], config: &CliConfig, out: &mut W) -> Result<()> {
    if values.is_empty() {
        return Err(CliError::InvalidArgument(
            "cdf requires at least one value".to_string(),
        ));
    }

    info!(count = values.len(), method = %config.method, "Evaluating normal CDF");

    let probabilities = cdf_batch(config.method, values);
    let rows: Vec<Vec<f64>> = values
        .iter()
        .zip(&probabilities)
        .map(|(&z, &p)| {
            debug!(z, p, "cdf");
            vec![z, p]
        })
        .collect();

    write_rows(out, config.format, config.precision, &["z", "cdf"], &rows)
}
