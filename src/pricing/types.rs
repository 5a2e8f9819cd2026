use crate::model_params::OptionParameters;
use crate::models::monte_carlo::SimulationResult;

/// Both prices for one contract and how far apart they are
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingComparison {
    /// Contract both pricers were given
    pub params: OptionParameters,
    /// Monte Carlo estimate with its statistical error
    pub simulation: SimulationResult,
    /// Closed-form Black-Scholes price
    pub bs_price: f64,
    /// |mc - bs| / bs × 100
    pub percent_error: f64,
    /// Black-Scholes volatility reproducing the Monte Carlo price, when one exists
    pub mc_implied_vol: Option<f64>,
}

impl PricingComparison {
    pub fn mc_price(&self) -> f64 {
        self.simulation.price
    }

    pub fn abs_error(&self) -> f64 {
        (self.simulation.price - self.bs_price).abs()
    }

    /// Distance between the prices measured in Monte Carlo standard errors.
    pub fn z_score(&self) -> Option<f64> {
        (self.simulation.std_error > 0.0).then(|| self.abs_error() / self.simulation.std_error)
    }
}

/// One row of a convergence study
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergencePoint {
    pub paths: usize,
    pub mc_price: f64,
    pub bs_price: f64,
    pub abs_error: f64,
    pub std_error: f64,
    pub percent_error: f64,
}
