//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod cdf;
pub mod check;
pub mod erf;
pub mod output;
pub mod price;
pub mod table;
