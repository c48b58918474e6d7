//! Black-Scholes pricing model for European options.
//!
//! The cumulative normal N(·) is taken from `math::distributions::NormalMethod`,
//! so prices can be produced with either the series CDF or the rational erf.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use std::fmt;

use super::error::AnalyticalError;
use crate::math::distributions::{norm_pdf, NormalMethod};

/// Expiries at or below this are treated as expired.
const EXPIRY_EPSILON: f64 = 1e-10;

/// d1 returned for expired options away from the money.
const EXPIRED_D1: f64 = 100.0;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionType {
    /// Returns true for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Price and first-order sensitivities of a European option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Greeks {
    /// Option value
    pub price: f64,
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t (per year)
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

/// Black-Scholes model for European option pricing.
///
/// # Examples
/// ```
/// use stats_core::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
    /// Approximation used for N(·)
    method: NormalMethod,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model using the series CDF.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot is not a positive finite number
    /// - `AnalyticalError::InvalidVolatility` if volatility is not a positive finite number
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    ///
    /// # Examples
    /// ```
    /// use stats_core::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }

        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }

        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate { rate });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
            method: NormalMethod::Series,
        })
    }

    /// Returns a copy of the model that evaluates N(·) with `method`.
    pub fn with_method(mut self, method: NormalMethod) -> Self {
        self.method = method;
        self
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the CDF approximation in use.
    #[inline]
    pub fn method(&self) -> NormalMethod {
        self.method
    }

    /// Checks contract terms against the model domain.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike is not a positive finite number
    /// - `AnalyticalError::InvalidExpiry` if expiry is negative or not finite
    pub fn validate_contract(strike: f64, expiry: f64) -> Result<(), AnalyticalError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        if !(expiry.is_finite() && expiry >= 0.0) {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }
        Ok(())
    }

    /// Computes the d1 term.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// For expired options returns `±100` (or `0` at the money) so that
    /// N(d₁) collapses to the exercise indicator.
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return if self.spot > strike {
                EXPIRED_D1
            } else if self.spot < strike {
                -EXPIRED_D1
            } else {
                0.0
            };
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// Contract terms are not validated: any expiry at or below `1e-10`,
    /// negative ones included, returns intrinsic value.
    /// Use [`BlackScholes::try_price`] to reject bad strikes and expiries.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return (self.spot - strike).max(0.0);
        }

        let n = |x| self.method.cdf(x);
        let discount = (-self.rate * expiry).exp();

        self.spot * n(self.d1(strike, expiry)) - strike * discount * n(self.d2(strike, expiry))
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    ///
    /// Like [`BlackScholes::price_call`], this does not validate its inputs.
    /// Use [`BlackScholes::try_price`] for checked pricing.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return (strike - self.spot).max(0.0);
        }

        let n = |x| self.method.cdf(x);
        let discount = (-self.rate * expiry).exp();

        strike * discount * n(-self.d2(strike, expiry)) - self.spot * n(-self.d1(strike, expiry))
    }

    /// Prices a call or put.
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Validates the contract, then prices it.
    ///
    /// # Errors
    /// See [`BlackScholes::validate_contract`].
    pub fn try_price(
        &self,
        option_type: OptionType,
        strike: f64,
        expiry: f64,
    ) -> Result<f64, AnalyticalError> {
        Self::validate_contract(strike, expiry)?;
        Ok(self.price(option_type, strike, expiry))
    }

    /// Computes price and Greeks together.
    ///
    /// - Delta: N(d₁) for calls, N(d₁) - 1 for puts
    /// - Gamma: φ(d₁) / (S·σ·√T)
    /// - Vega: S·√T·φ(d₁)
    /// - Theta: -(S·σ·φ(d₁))/(2√T) ∓ r·K·e^(-rT)·N(±d₂)
    /// - Rho: ±K·T·e^(-rT)·N(±d₂)
    ///
    /// Expired options report intrinsic value, an indicator delta and zero
    /// for the remaining sensitivities.
    pub fn greeks(&self, option_type: OptionType, strike: f64, expiry: f64) -> Greeks {
        let price = self.price(option_type, strike, expiry);

        if expiry <= EXPIRY_EPSILON {
            let delta = match option_type {
                OptionType::Call if self.spot > strike => 1.0,
                OptionType::Put if self.spot < strike => -1.0,
                _ => 0.0,
            };
            return Greeks {
                price,
                delta,
                gamma: 0.0,
                vega: 0.0,
                theta: 0.0,
                rho: 0.0,
            };
        }

        let n = |x| self.method.cdf(x);
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let sqrt_t = expiry.sqrt();
        let discount = (-self.rate * expiry).exp();
        let pdf_d1 = norm_pdf(d1);

        let gamma = pdf_d1 / (self.spot * self.volatility * sqrt_t);
        let vega = self.spot * sqrt_t * pdf_d1;
        let decay = -(self.spot * self.volatility * pdf_d1) / (2.0 * sqrt_t);

        let (delta, theta, rho) = match option_type {
            OptionType::Call => (
                n(d1),
                decay - self.rate * strike * discount * n(d2),
                strike * expiry * discount * n(d2),
            ),
            OptionType::Put => (
                n(d1) - 1.0,
                decay + self.rate * strike * discount * n(-d2),
                -strike * expiry * discount * n(-d2),
            ),
        };

        Greeks {
            price,
            delta,
            gamma,
            vega,
            theta,
            rho,
        }
    }
}
