use thiserror::Error;

/// Errors raised while deriving a Black-Scholes valuation.
///
/// There is a single kind: the inputs (or a quantity derived from them) fall
/// outside the domain where the closed-form formulas are defined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("invalid input: {name} = {value} ({reason})")]
    InvalidInput {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl PricingError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        PricingError::InvalidInput {
            name,
            value,
            reason,
        }
    }

    /// Name of the offending input or derived quantity.
    pub fn input_name(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { name, .. } => name,
        }
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(PricingError::invalid(name, value, "must be > 0"));
    }
    Ok(value)
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::invalid(name, value, "must be finite"));
    }
    Ok(value)
}
