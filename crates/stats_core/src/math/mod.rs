//! Mathematical primitives for the standard normal distribution.
//!
//! - `normal`: series CDF, rational erf and the absolute-value helper
//! - `distributions`: PDF, method selection and batch evaluation

pub mod distributions;
pub mod normal;

pub use distributions::{cdf_batch, cdf_rational, norm_pdf, NormalMethod, ParseMethodError};
pub use normal::{cdf, fabs, nerf};
