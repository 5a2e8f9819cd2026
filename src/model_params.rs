//! Contract parameters shared read-only by every pricer. A single
//! [`OptionParameters`] value is built per pricing run and passed by reference
//! into both the analytical and the simulated pricer, so neither can disagree
//! about the option being priced.

use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, PricingResult};

/// Immutable description of a European call under Black-Scholes dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptionParameters {
    /// Current price of the underlying (S)
    pub spot: f64,
    /// Exercise price (K)
    pub strike: f64,
    /// Continuously-compounded risk-free rate (r)
    pub rate: f64,
    /// Annualised volatility of log-returns (σ). Zero is the deterministic limit.
    pub volatility: f64,
    /// Time to maturity in years (T)
    pub time: f64,
}

impl Default for OptionParameters {
    /// The at-the-money contract used by the command line when no flags are given.
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            volatility: 0.2,
            time: 0.1,
        }
    }
}

impl OptionParameters {
    /// Build a validated parameter set.
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        time: f64,
    ) -> PricingResult<Self> {
        let params = Self {
            spot,
            strike,
            rate,
            volatility,
            time,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check S > 0, K > 0, T > 0, σ >= 0 and a finite r.
    ///
    /// Fields are public so a value may have been assembled by hand or
    /// deserialised; every pricer calls this before doing any arithmetic.
    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_finite("rate", self.rate)?;
        ensure_non_negative("volatility", self.volatility)?;
        ensure_positive("time", self.time)?;
        Ok(())
    }

    /// e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time).exp()
    }

    /// σ√T
    pub fn vol_sqrt_time(&self) -> f64 {
        self.volatility * self.time.sqrt()
    }

    /// Risk-neutral forward S·e^(rT)
    pub fn forward(&self) -> f64 {
        self.spot * (self.rate * self.time).exp()
    }

    /// Present value of the payoff when σ = 0: max(S·e^(rT) - K, 0)·e^(-rT).
    pub fn deterministic_value(&self) -> f64 {
        (self.forward() - self.strike).max(0.0) * self.discount_factor()
    }

    /// Copy with a different volatility, used by the implied-vol solver.
    pub fn with_volatility(&self, volatility: f64) -> Self {
        Self { volatility, ..*self }
    }
}
