//! # stats_core: Normal Distribution Approximations
//!
//! ## Role
//!
//! stats_core is the numeric kernel of the workspace, providing:
//! - Series approximation of the standard normal CDF (`math::normal::cdf`)
//! - Rational approximation of the error function (`math::normal::nerf`)
//! - PDF, method selection and batch evaluation (`math::distributions`)
//! - Black-Scholes pricing built on the CDF (`analytical`)
//!
//! ## Purity
//!
//! Every function is pure: no global state, no allocation outside the batch
//! helpers, no logging. Values outside the approximation range saturate to
//! the asymptotic limits instead of failing.
//!
//! ## Usage Examples
//!
//! ```rust
//! use stats_core::math::normal::{cdf, nerf};
//! use stats_core::analytical::BlackScholes;
//!
//! assert_eq!(cdf(-7.0), 0.0);
//! assert!((cdf(1.0) - 0.8413447).abs() < 1e-6);
//! assert!((nerf(0.5) - 0.5205).abs() < 1e-3);
//!
//! let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
//! let call = bs.price_call(100.0, 1.0);
//! # assert!((call - 10.4506).abs() < 1e-3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serde support for `NormalMethod`, `OptionType` and `Greeks`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod math;
