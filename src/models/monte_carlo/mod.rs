//! Monte Carlo pricing of European calls under risk-neutral geometric Brownian
//! motion.
//!
//! Terminal prices are drawn exactly from the lognormal law, so one normal draw
//! per path suffices:
//!
//! ```text
//! S_T = S · exp((r - σ²/2)·T + σ·√T·z),   z ~ N(0, 1)
//! price = e^(-rT) · mean(max(S_T - K, 0))
//! ```

pub mod accumulator;
pub mod mc_pricer;

pub use accumulator::*;
pub use mc_pricer::*;
