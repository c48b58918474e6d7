//! Check command implementation
//!
//! Reports the resolved configuration and verifies the approximations
//! against known values.

use std::io::Write;

use stats_core::math::{cdf, cdf_rational, nerf};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::Result;

/// (description, computed, expected, tolerance)
fn self_checks() -> Vec<(&'static str, f64, f64, f64)> {
    vec![
        ("cdf(0)", cdf(0.0), 0.5, 1e-12),
        ("cdf(1)", cdf(1.0), 0.841_344_746_068_543, 1e-9),
        ("cdf(-1.96)", cdf(-1.96), 0.024_997_895_148_220_4, 1e-9),
        ("cdf(-7)", cdf(-7.0), 0.0, 0.0),
        ("cdf_rational(1)", cdf_rational(1.0), 0.841_344_746_068_543, 1e-6),
        ("nerf(0.5)", nerf(0.5), 0.520_499_877_813_046_5, 1e-6),
        ("nerf(11)", nerf(11.0), 1.0, 0.0),
    ]
}

/// Run the check command
///
/// Returns the number of failed checks.
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<usize> {
    info!("Checking configuration...");
    writeln!(out, "log_level = {}", config.log_level)?;
    writeln!(out, "method    = {}", config.method)?;
    writeln!(out, "format    = {}", config.format)?;
    writeln!(out, "precision = {}", config.precision)?;
    writeln!(
        out,
        "table     = {} .. {} step {}",
        config.table.from, config.table.to, config.table.step
    )?;

    let mut failures = 0;
    for (name, computed, expected, tolerance) in self_checks() {
        let ok = (computed - expected).abs() <= tolerance;
        if !ok {
            warn!(name, computed, expected, "Self-check failed");
            failures += 1;
        }
        writeln!(out, "[{}] {}", if ok { "ok" } else { "FAIL" }, name)?;
    }

    info!(failures, "Check complete");
    Ok(failures)
}
