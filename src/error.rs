//! Error taxonomy shared by both pricers and the reporting layer.

/// Failures surfaced by pricing, configuration and reporting.
///
/// Every variant is detected before the simulation loop starts or while
/// assembling the final report; nothing in the Monte Carlo loop itself fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("output error: {0}")]
    Output(String),
}

impl PricingError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        PricingError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

impl From<csv::Error> for PricingError {
    fn from(e: csv::Error) -> Self {
        PricingError::Output(e.to_string())
    }
}

pub type PricingResult<T> = Result<T, PricingError>;

/// Reject non-finite or non-positive values.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> PricingResult<()> {
    if !value.is_finite() {
        return Err(PricingError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(PricingError::invalid(name, value, "must be > 0"));
    }
    Ok(())
}

/// Reject non-finite or negative values.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> PricingResult<()> {
    if !value.is_finite() {
        return Err(PricingError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(PricingError::invalid(name, value, "must be >= 0"));
    }
    Ok(())
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(name, value, "must be finite"))
    }
}
