//! Analytical option pricing on top of the normal approximations.
//!
//! - Black-Scholes model for European calls and puts
//! - Closed-form Greeks (Delta, Gamma, Vega, Theta, Rho)

pub mod black_scholes;
pub mod error;

pub use black_scholes::{BlackScholes, Greeks, OptionType};
pub use error::AnalyticalError;
