use crate::error::{PricingError, PricingResult};
use crate::model_params::OptionParameters;
use crate::models::bs::{bs_call_price, implied_volatility};
use crate::models::monte_carlo::MonteCarloPricer;
use crate::models::utils::percent_error;
use crate::pricing::config::SimulationConfig;
use crate::pricing::types::{ConvergencePoint, PricingComparison};
use rand::Rng;
use tracing::{debug, info};

/// One comparison of the analytical and simulated prices for a contract
pub struct PricingRun {
    params: OptionParameters,
    simulation: SimulationConfig,
}

impl PricingRun {
    pub fn new(params: OptionParameters, simulation: SimulationConfig) -> Self {
        Self { params, simulation }
    }

    /// Fix the generator seed so the run is reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    /// Price with both models and report the deviation
    pub fn run(&self) -> PricingResult<PricingComparison> {
        self.simulation.validate()?;
        let mut mc = MonteCarloPricer::seeded(self.simulation.seed);
        compare_with(&self.params, &mut mc, self.simulation.paths)
    }
}

/// Run both pricers on the same contract using the supplied simulator.
///
/// Parameters are validated by the analytical pricer first, so an invalid
/// contract never starts a simulation.
pub fn compare_with<R: Rng>(
    params: &OptionParameters,
    mc: &mut MonteCarloPricer<R>,
    paths: usize,
) -> PricingResult<PricingComparison> {
    let bs_price = bs_call_price(params)?;
    let simulation = mc.price(params, paths)?;

    let percent_error = percent_error(simulation.price, bs_price).ok_or_else(|| {
        PricingError::NumericDegeneracy(format!(
            "percent error undefined: Black-Scholes price is zero but Monte Carlo gave {}",
            simulation.price
        ))
    })?;

    let mc_implied_vol = match implied_volatility(simulation.price, params) {
        Ok(vol) => Some(vol),
        Err(e) => {
            debug!("no implied volatility for Monte Carlo price: {}", e);
            None
        }
    };

    info!(
        mc_price = simulation.price,
        bs_price, percent_error, "priced European call with both models"
    );

    Ok(PricingComparison {
        params: *params,
        simulation,
        bs_price,
        percent_error,
        mc_implied_vol,
    })
}

/// Price the same contract at each path count with independent generators.
///
/// Run `i` is seeded with `seed + i` when a seed is given, otherwise from OS
/// entropy.
pub fn convergence_study(
    params: &OptionParameters,
    path_counts: &[usize],
    seed: Option<u64>,
) -> PricingResult<Vec<ConvergencePoint>> {
    if path_counts.is_empty() {
        return Err(PricingError::invalid(
            "path_counts",
            0.0,
            "at least one path count is required",
        ));
    }

    let mut points = Vec::with_capacity(path_counts.len());
    for (i, &paths) in path_counts.iter().enumerate() {
        let mut mc = MonteCarloPricer::seeded(seed.map(|s| s.wrapping_add(i as u64)));
        let comparison = compare_with(params, &mut mc, paths)?;
        points.push(ConvergencePoint {
            paths,
            mc_price: comparison.mc_price(),
            bs_price: comparison.bs_price,
            abs_error: comparison.abs_error(),
            std_error: comparison.simulation.std_error,
            percent_error: comparison.percent_error,
        });
    }
    Ok(points)
}

/// Sample standard deviation of Monte Carlo estimates across seeds.
///
/// Shrinks like 1/√paths; needs at least two seeds.
pub fn seed_dispersion(
    params: &OptionParameters,
    paths: usize,
    seeds: &[u64],
) -> PricingResult<f64> {
    if seeds.len() < 2 {
        return Err(PricingError::invalid(
            "seeds",
            seeds.len() as f64,
            "at least two seeds are required",
        ));
    }

    let prices = seeds
        .iter()
        .map(|&seed| {
            MonteCarloPricer::from_seed(seed)
                .price(params, paths)
                .map(|r| r.price)
        })
        .collect::<PricingResult<Vec<f64>>>()?;

    let n = prices.len() as f64;
    let mean = prices.iter().sum::<f64>() / n;
    let var = prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok(var.sqrt())
}

/// Decades from 10^3 up to `max_paths`, always ending at `max_paths`.
pub fn decade_path_counts(max_paths: usize) -> Vec<usize> {
    let mut counts = Vec::new();
    let mut n = 1_000usize;
    while n < max_paths {
        counts.push(n);
        n = n.saturating_mul(10);
    }
    counts.push(max_paths);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm() -> OptionParameters {
        OptionParameters::new(100.0, 100.0, 0.05, 0.2, 0.1).unwrap()
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let a = PricingRun::new(atm(), SimulationConfig::minimal())
            .with_seed(11)
            .run()
            .unwrap();
        let b = PricingRun::new(atm(), SimulationConfig::minimal())
            .with_seed(11)
            .run()
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.simulation.paths, 1_000);
    }

    #[test]
    fn test_invalid_contract_fails_before_simulation() {
        let mut p = atm();
        p.spot = -1.0;
        let err = PricingRun::new(p, SimulationConfig::minimal())
            .with_seed(1)
            .run()
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter { name: "spot", .. }));
    }

    #[test]
    fn test_zero_paths_fails() {
        let cfg = SimulationConfig {
            paths: 0,
            seed: Some(1),
        };
        assert!(PricingRun::new(atm(), cfg).run().is_err());
    }

    #[test]
    fn test_deep_out_of_the_money_has_no_percent_error_blowup() {
        // both prices are exactly zero far out of the money
        let p = OptionParameters::new(100.0, 1e6, 0.05, 0.2, 0.1).unwrap();
        let cmp = PricingRun::new(p, SimulationConfig::minimal())
            .with_seed(3)
            .run()
            .unwrap();
        assert_eq!(cmp.simulation.price, 0.0);
        assert_eq!(cmp.bs_price, 0.0);
        assert_eq!(cmp.percent_error, 0.0);
        assert_eq!(cmp.mc_implied_vol, None);
    }

    #[test]
    fn test_decade_path_counts() {
        assert_eq!(decade_path_counts(1_000_000), vec![1_000, 10_000, 100_000, 1_000_000]);
        assert_eq!(decade_path_counts(50_000), vec![1_000, 10_000, 50_000]);
        assert_eq!(decade_path_counts(10), vec![10]);
    }

    #[test]
    fn test_seed_dispersion_needs_two_seeds() {
        assert!(seed_dispersion(&atm(), 100, &[1]).is_err());
        let sd = seed_dispersion(&atm(), 100, &[1, 2, 3]).unwrap();
        assert!(sd > 0.0);
    }

    #[test]
    fn test_convergence_study_rows() {
        let points = convergence_study(&atm(), &[1_000, 10_000], Some(5)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].paths, 1_000);
        assert_eq!(points[1].paths, 10_000);
        for p in &points {
            assert!((p.abs_error - (p.mc_price - p.bs_price).abs()).abs() < 1e-15);
            assert!(p.std_error > 0.0);
        }
        assert!(convergence_study(&atm(), &[], Some(5)).is_err());
    }
}
