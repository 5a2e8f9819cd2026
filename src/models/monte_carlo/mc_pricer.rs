use crate::error::{PricingError, PricingResult};
use crate::model_params::OptionParameters;
use crate::models::monte_carlo::accumulator::PayoffAccumulator;
use crate::models::traits::CallPricer;
use crate::models::utils::european_call_payoff;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, info};

/// Path count used when the caller does not pick one.
pub const DEFAULT_PATHS: usize = 1_000_000;

/// Outcome of one Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Discounted mean payoff
    pub price: f64,
    /// Number of simulated terminal prices
    pub paths: usize,
    /// Standard error of `price` (discounted sample sd / √paths)
    pub std_error: f64,
}

impl SimulationResult {
    /// Two-sided normal confidence interval `price ± z·std_error` at `level`,
    /// e.g. 0.95.
    pub fn confidence_interval(&self, level: f64) -> PricingResult<(f64, f64)> {
        if !(level > 0.0 && level < 1.0) {
            return Err(PricingError::invalid(
                "confidence_level",
                level,
                "must lie strictly between 0 and 1",
            ));
        }
        let normal =
            Normal::new(0.0, 1.0).map_err(|e| PricingError::NumericDegeneracy(e.to_string()))?;
        let z = normal.inverse_cdf(0.5 * (1.0 + level));
        let half_width = z * self.std_error;
        Ok((self.price - half_width, self.price + half_width))
    }
}

/// Monte Carlo estimator for European calls.
///
/// Owns its random source so a run is reproducible whenever the generator is
/// seeded. Independent pricers must be built from independent seeds.
#[derive(Debug, Clone)]
pub struct MonteCarloPricer<R: Rng = StdRng> {
    rng: R,
    paths: usize,
}

impl MonteCarloPricer<StdRng> {
    /// Deterministic generator for reproducible runs and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// `from_seed` when a seed is given, otherwise `from_entropy`.
    pub fn seeded(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> MonteCarloPricer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            paths: DEFAULT_PATHS,
        }
    }

    /// Path count used by [`CallPricer::price_call`].
    pub fn with_paths(mut self, paths: usize) -> Self {
        self.paths = paths;
        self
    }

    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Estimate the call price from `paths` independent terminal prices.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if `paths` is zero or `params` fails validation
    /// * `NumericDegeneracy` if the estimate overflows (extreme σ·√T)
    pub fn price(
        &mut self,
        params: &OptionParameters,
        paths: usize,
    ) -> PricingResult<SimulationResult> {
        params.validate()?;
        if paths == 0 {
            return Err(PricingError::invalid(
                "paths",
                0.0,
                "at least one simulated path is required",
            ));
        }

        let drift = (params.rate - 0.5 * params.volatility * params.volatility) * params.time;
        let diffusion = params.vol_sqrt_time();
        debug!(paths, drift, diffusion, "starting GBM terminal price simulation");

        let mut payoffs = PayoffAccumulator::new();
        for _ in 0..paths {
            let z: f64 = self.rng.sample(StandardNormal);
            let spot_at_maturity = params.spot * (drift + diffusion * z).exp();
            payoffs.push(european_call_payoff(spot_at_maturity, params.strike));
        }

        let mean_payoff = payoffs.mean().ok_or_else(|| {
            PricingError::NumericDegeneracy("no payoff samples were accumulated".to_string())
        })?;
        let discount = params.discount_factor();
        let price = discount * mean_payoff;
        let std_error = discount * payoffs.standard_error();

        if !price.is_finite() || !std_error.is_finite() {
            return Err(PricingError::NumericDegeneracy(format!(
                "Monte Carlo estimate is not finite (price={}, std_error={})",
                price, std_error
            )));
        }

        info!(paths, price, std_error, "Monte Carlo simulation finished");
        Ok(SimulationResult {
            price,
            paths,
            std_error,
        })
    }
}

impl<R: Rng> CallPricer for MonteCarloPricer<R> {
    fn model_name(&self) -> &str {
        "monte-carlo"
    }

    fn price_call(&mut self, params: &OptionParameters) -> PricingResult<f64> {
        let paths = self.paths;
        self.price(params, paths).map(|result| result.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bs::bs_call_price;

    fn atm() -> OptionParameters {
        OptionParameters::new(100.0, 100.0, 0.05, 0.2, 0.1).unwrap()
    }

    #[test]
    fn test_zero_paths_is_rejected() {
        let mut pricer = MonteCarloPricer::from_seed(1);
        match pricer.price(&atm(), 0) {
            Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "paths"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_single_path_is_defined() {
        let mut pricer = MonteCarloPricer::from_seed(7);
        let result = pricer.price(&atm(), 1).unwrap();
        assert_eq!(result.paths, 1);
        assert!(result.price.is_finite() && result.price >= 0.0);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn test_same_seed_same_estimate() {
        let a = MonteCarloPricer::from_seed(42).price(&atm(), 10_000).unwrap();
        let b = MonteCarloPricer::from_seed(42).price(&atm(), 10_000).unwrap();
        assert_eq!(a.price.to_bits(), b.price.to_bits());
        assert_eq!(a.std_error.to_bits(), b.std_error.to_bits());

        let c = MonteCarloPricer::from_seed(43).price(&atm(), 10_000).unwrap();
        assert_ne!(a.price, c.price);
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let p = atm().with_volatility(0.0);
        let result = MonteCarloPricer::from_seed(3).price(&p, 1_000).unwrap();
        assert!((result.price - p.deterministic_value()).abs() < 1e-10);
        assert!(result.std_error < 1e-10);
    }

    #[test]
    fn test_estimate_within_standard_errors_of_closed_form() {
        let p = atm();
        let bs = bs_call_price(&p).unwrap();
        let result = MonteCarloPricer::from_seed(2024).price(&p, 200_000).unwrap();
        assert!(result.std_error > 0.0);
        assert!(
            (result.price - bs).abs() < 5.0 * result.std_error,
            "mc={} bs={} se={}",
            result.price,
            bs,
            result.std_error
        );
    }

    #[test]
    fn test_parameters_are_not_mutated() {
        let p = atm();
        let before = p;
        let _ = MonteCarloPricer::from_seed(9).price(&p, 100).unwrap();
        assert_eq!(p, before);
    }

    #[test]
    fn test_confidence_interval() {
        let result = SimulationResult {
            price: 2.5,
            paths: 100,
            std_error: 0.1,
        };
        let (lo, hi) = result.confidence_interval(0.95).unwrap();
        assert!((lo - (2.5 - 1.959964 * 0.1)).abs() < 1e-5);
        assert!((hi - (2.5 + 1.959964 * 0.1)).abs() < 1e-5);

        assert!(result.confidence_interval(0.0).is_err());
        assert!(result.confidence_interval(1.0).is_err());
        assert!(result.confidence_interval(f64::NAN).is_err());
    }

    #[test]
    fn test_pricer_trait_uses_configured_paths() {
        let mut pricer = MonteCarloPricer::from_seed(5).with_paths(5_000);
        assert_eq!(pricer.model_name(), "monte-carlo");
        assert_eq!(pricer.paths(), 5_000);
        let via_trait = pricer.price_call(&atm()).unwrap();

        let direct = MonteCarloPricer::from_seed(5).price(&atm(), 5_000).unwrap();
        assert_eq!(via_trait, direct.price);
    }
}
