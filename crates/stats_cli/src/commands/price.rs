//! Price command implementation
//!
//! Prices a European option with Black-Scholes, using the configured
//! approximation for N(·).

use std::io::Write;

use serde::Serialize;
use stats_core::analytical::{BlackScholes, Greeks, OptionType};
use stats_core::math::NormalMethod;
use tracing::info;

use super::output::write_rows;
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Contract and market inputs for the price command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceArgs {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    pub expiry: f64,
    pub option_type: OptionType,
}

/// JSON payload written by the price command
#[derive(Debug, Serialize)]
struct PriceReport {
    option_type: OptionType,
    method: NormalMethod,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    #[serde(flatten)]
    greeks: Greeks,
}

/// Run the price command
pub fn run<W: Write>(args: &PriceArgs, config: &CliConfig, out: &mut W) -> Result<()> {
    info!(
        option_type = %args.option_type,
        spot = args.spot,
        strike = args.strike,
        rate = args.rate,
        volatility = args.volatility,
        expiry = args.expiry,
        method = %config.method,
        "Starting pricing..."
    );

    let model =
        BlackScholes::new(args.spot, args.rate, args.volatility)?.with_method(config.method);
    BlackScholes::validate_contract(args.strike, args.expiry)?;
    let greeks = model.greeks(args.option_type, args.strike, args.expiry);

    info!(price = greeks.price, "Pricing complete");

    match config.format {
        OutputFormat::Json => {
            let report = PriceReport {
                option_type: args.option_type,
                method: config.method,
                spot: args.spot,
                strike: args.strike,
                rate: args.rate,
                volatility: args.volatility,
                expiry: args.expiry,
                greeks,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            Ok(())
        }
        format => {
            let row = vec![
                greeks.price,
                greeks.delta,
                greeks.gamma,
                greeks.vega,
                greeks.theta,
                greeks.rho,
            ];
            write_rows(
                out,
                format,
                config.precision,
                &["price", "delta", "gamma", "vega", "theta", "rho"],
                &[row],
            )
        }
    }
}
