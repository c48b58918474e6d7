//! Erf command implementation
//!
//! Evaluates the rational error function approximation for each value.

use std::io::Write;

use stats_core::math::nerf;
use tracing::info;

use super::output::write_rows;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the erf command
pub fn run<W: Write>(values: &[f64], config: &CliConfig, out: &mut W) -> Result<()> {
    if values.is_empty() {
        return Err(CliError::InvalidArgument(
            "erf requires at least one value".to_string(),
        ));
    }

    info!(count = values.len(), "Evaluating error function");

    let rows: Vec<Vec<f64>> = values.iter().map(|&x| vec![x, nerf(x)]).collect();
    write_rows(out, config.format, config.precision, &["x", "erf"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_erf_csv() {
        let config = CliConfig {
            format: OutputFormat::Csv,
            precision: 4,
            ..Default::default()
        };
        let mut buf = Vec::new();
        run(&[-11.0, 0.0, 0.5, 1.0], &config, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "x,erf\n-11.0000,-1.0000\n0.0000,0.0000\n0.5000,0.5205\n1.0000,0.8427\n"
        );
    }

    #[test]
    fn test_erf_requires_values() {
        let mut buf = Vec::new();
        assert!(run(&[], &CliConfig::default(), &mut buf).is_err());
    }
}
