pub mod bs;
pub mod monte_carlo;

/// Common traits used by all call pricers
pub mod traits {
    use crate::error::PricingResult;
    use crate::model_params::OptionParameters;

    /// A model able to value a European call for a given parameter set.
    ///
    /// `price_call` takes `&mut self` because simulation-based pricers consume
    /// entropy from the generator they own.
    pub trait CallPricer {
        fn model_name(&self) -> &str;
        fn price_call(&mut self, params: &OptionParameters) -> PricingResult<f64>;
    }
}

/// Numeric primitives shared by the pricers and the reporting layer
pub mod utils {
    use std::f64::consts::FRAC_1_SQRT_2;

    /// Standard normal CDF: Φ(x) = 0.5·erfc(-x/√2)
    pub fn normal_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
    }

    /// Payoff of a European call at maturity
    pub fn european_call_payoff(spot: f64, strike: f64) -> f64 {
        (spot - strike).max(0.0)
    }

    /// Round to the hundredths place, halves away from zero.
    pub fn round_to_cents(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }

    /// |mc - bs| / bs × 100, or `None` when the reference price is zero and
    /// the estimate is not.
    pub fn percent_error(estimate: f64, reference: f64) -> Option<f64> {
        let diff = (estimate - reference).abs();
        if reference == 0.0 {
            return if diff == 0.0 { Some(0.0) } else { None };
        }
        Some(diff / reference.abs() * 100.0)
    }

}
