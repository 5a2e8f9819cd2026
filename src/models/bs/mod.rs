// Closed-form Black-Scholes pricing for European calls. This is the ground
// truth the Monte Carlo estimator is measured against, plus an implied
// volatility inversion used to express simulation error in vol terms.

use crate::error::{PricingError, PricingResult};
use crate::model_params::OptionParameters;
use crate::models::traits::CallPricer;
use crate::models::utils::normal_cdf;
use roots::{find_root_brent, SimpleConvergency};

/// Bracket searched by [`implied_volatility`].
pub const IMPLIED_VOL_BRACKET: (f64, f64) = (1e-6, 5.0);

/// The d1 and d2 terms of the Black-Scholes formula.
///
/// Requires σ > 0; callers handle the σ = 0 limit separately.
pub fn d1_d2(params: &OptionParameters) -> (f64, f64) {
    let vol_sqrt_t = params.vol_sqrt_time();
    let d1 = ((params.spot / params.strike).ln()
        + (params.rate + 0.5 * params.volatility * params.volatility) * params.time)
        / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Price of a European call under Black-Scholes assumptions.
///
/// With σ = 0 the general formula divides by zero, so the limiting value
/// `max(S - K·e^(-rT), 0)` is returned instead.
pub fn bs_call_price(params: &OptionParameters) -> PricingResult<f64> {
    params.validate()?;

    let price = if params.volatility == 0.0 {
        params.deterministic_value()
    } else {
        let (d1, d2) = d1_d2(params);
        params.spot * normal_cdf(d1) - params.strike * params.discount_factor() * normal_cdf(d2)
    };

    // |r|·T beyond ~709 overflows the forward or the discount factor.
    if !price.is_finite() {
        return Err(PricingError::NumericDegeneracy(format!(
            "Black-Scholes price is not finite (rate={}, volatility={}, time={})",
            params.rate, params.volatility, params.time
        )));
    }
    // Cancellation can leave a tiny negative residue far out of the money.
    Ok(price.max(0.0))
}

/// Volatility at which the Black-Scholes call price equals `target_price`.
///
/// Uses Brent's method over [`IMPLIED_VOL_BRACKET`]; the `volatility` field of
/// `params` is ignored.
pub fn implied_volatility(target_price: f64, params: &OptionParameters) -> PricingResult<f64> {
    params.validate()?;

    let lower = (params.spot - params.strike * params.discount_factor()).max(0.0);
    let upper = params.spot;
    if !target_price.is_finite() || target_price <= lower || target_price >= upper {
        return Err(PricingError::invalid(
            "target_price",
            target_price,
            "must lie strictly inside the no-arbitrage band (max(S - K·e^(-rT), 0), S)",
        ));
    }

    let objective = |sigma: f64| -> f64 {
        match bs_call_price(&params.with_volatility(sigma)) {
            Ok(price) => price - target_price,
            Err(_) => f64::NAN,
        }
    };

    let (lo, hi) = IMPLIED_VOL_BRACKET;
    let mut convergency = SimpleConvergency {
        eps: 1e-10_f64,
        max_iter: 100,
    };
    find_root_brent(lo, hi, &objective, &mut convergency).map_err(|e| {
        PricingError::NumericDegeneracy(format!(
            "implied volatility search failed for price {}: {:?}",
            target_price, e
        ))
    })
}

/// Analytical pricer as a [`CallPricer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl CallPricer for BlackScholes {
    fn model_name(&self) -> &str {
        "black-scholes"
    }

    fn price_call(&mut self, params: &OptionParameters) -> PricingResult<f64> {
        bs_call_price(params)
    }
}
