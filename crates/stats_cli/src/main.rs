//! normstat - Command Line Front End for the Normal Approximations
//!
//! # Commands
//!
//! - `normstat cdf <Z>...` - Evaluate the standard normal CDF
//! - `normstat erf <X>...` - Evaluate the rational erf approximation
//! - `normstat table` - Tabulate CDF, PDF and erf over a grid
//! - `normstat price --spot S --strike K --vol σ --expiry T` - Black-Scholes price and Greeks
//! - `normstat check` - Show the resolved configuration and run self-checks
//!
//! Configuration is layered from defaults, an optional TOML file, `NORMSTAT_*`
//! environment variables and command line flags. Logs go to stderr so that
//! results on stdout stay machine readable.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stats_core::analytical::OptionType;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::price::PriceArgs;
use config::{build_config, CliArgs, CliConfig, TableRange};

/// Normal distribution approximations CLI
#[derive(Parser, Debug)]
#[command(name = "normstat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// CDF approximation (series, rational)
    #[arg(short, long, global = true)]
    method: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Fractional digits for table and csv output
    #[arg(short, long, global = true)]
    precision: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the standard normal CDF
    Cdf {
        /// Points at which to evaluate Φ
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Evaluate the error function approximation
    Erf {
        /// Points at which to evaluate erf
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Tabulate CDF, PDF and erf over an evenly spaced grid
    Table {
        /// First grid point
        #[arg(long, allow_negative_numbers = true)]
        from: Option<f64>,

        /// Last grid point
        #[arg(long, allow_negative_numbers = true)]
        to: Option<f64>,

        /// Grid spacing
        #[arg(long)]
        step: Option<f64>,
    },

    /// Price a European option with Black-Scholes
    Price {
        /// Spot price
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Continuously compounded risk-free rate
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        rate: f64,

        /// Volatility
        #[arg(long = "vol")]
        volatility: f64,

        /// Time to expiry in years
        #[arg(long)]
        expiry: f64,

        /// Price a put instead of a call
        #[arg(long)]
        put: bool,
    },

    /// Check configuration and approximation accuracy
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            method: self.method.clone(),
            format: self.format.clone(),
            precision: self.precision,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_command<W: Write>(command: Commands, config: &CliConfig, out: &mut W) -> Result<()> {
    match command {
        Commands::Cdf { values } => commands::cdf::run(&values, config, out),
        Commands::Erf { values } => commands::erf::run(&values, config, out),
        Commands::Table { from, to, step } => {
            let range = (from.is_some() || to.is_some() || step.is_some()).then(|| TableRange {
                from: from.unwrap_or(config.table.from),
                to: to.unwrap_or(config.table.to),
                step: step.unwrap_or(config.table.step),
            });
            commands::table::run(range, config, out)
        }
        Commands::Price {
            spot,
            strike,
            rate,
            volatility,
            expiry,
            put,
        } => {
            let args = PriceArgs {
                spot,
                strike,
                rate,
                volatility,
                expiry,
                option_type: if put { OptionType::Put } else { OptionType::Call },
            };
            commands::price::run(&args, config, out)
        }
        Commands::Check => match commands::check::run(config, out)? {
            0 => Ok(()),
            failures => Err(CliError::SelfCheckFailed(failures)),
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level.as_filter_str());
    info!(
        log_level = %config.log_level,
        method = %config.method,
        format = %config.format,
        precision = config.precision,
        "Configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(cli.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_cdf_negative_values() {
        let cli = parse(&["normstat", "cdf", "-1.96", "0", "2.5"]);
        match cli.command {
            Commands::Cdf { values } => assert_eq!(values, vec![-1.96, 0.0, 2.5]),
            other => panic!("Expected Cdf, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_cdf_requires_values() {
        assert!(Cli::try_parse_from(["normstat", "cdf"]).is_err());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = parse(&[
            "normstat", "erf", "0.5", "--method", "rational", "-f", "csv", "-p", "3",
        ]);
        let args = cli.config_args();
        assert_eq!(args.method.as_deref(), Some("rational"));
        assert_eq!(args.format.as_deref(), Some("csv"));
        assert_eq!(args.precision, Some(3));
        assert!(args.config_file.is_none());
    }

    #[test]
    fn test_parse_price() {
        let cli = parse(&[
            "normstat", "price", "--spot", "100", "--strike", "95", "--rate", "-0.01", "--vol",
            "0.25", "--expiry", "0.5", "--put",
        ]);
        match cli.command {
            Commands::Price {
                spot,
                strike,
                rate,
                volatility,
                expiry,
                put,
            } => {
                assert_eq!(spot, 100.0);
                assert_eq!(strike, 95.0);
                assert_eq!(rate, -0.01);
                assert_eq!(volatility, 0.25);
                assert_eq!(expiry, 0.5);
                assert!(put);
            }
            other => panic!("Expected Price, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_price_default_rate() {
        let cli = parse(&[
            "normstat", "price", "--spot", "100", "--strike", "100", "--vol", "0.2", "--expiry",
            "1",
        ]);
        assert!(matches!(cli.command, Commands::Price { rate, put: false, .. } if rate == 0.0));
    }

    #[test]
    fn test_run_table_partial_override() {
        let cli = parse(&["normstat", "table", "--from", "-1", "--step", "1"]);
        let config = CliConfig {
            format: OutputFormat::Csv,
            precision: 2,
            ..Default::default()
        };
        let mut buf = Vec::new();
        run_command(cli.command, &config, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        // -1, 0, 1, 2, 3
        assert_eq!(text.lines().count(), 6);
        assert!(text.lines().nth(1).unwrap().starts_with("-1.00,"));
    }

    #[test]
    fn test_run_check() {
        let cli = parse(&["normstat", "check"]);
        let mut buf = Vec::new();
        assert!(run_command(cli.command, &CliConfig::default(), &mut buf).is_ok());
    }
}
