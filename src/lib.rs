//! # bs-pricer: Black-Scholes Option Pricing and Sensitivity Surfaces
//!
//! `bs-pricer` values European calls and puts with the closed-form
//! Black-Scholes formulas, reports the five standard Greeks, and sweeps a
//! spot/volatility grid to build sensitivity heatmaps.
//!
//! ## Core Features
//!
//! - **Pricing model**: the auxiliary quantities (d1, d2, Φ(d1), Φ(d2), φ(d1),
//!   e^(−rT)) are derived once per input set and shared by the call and put
//! - **Greeks**: delta, gamma, vega, theta and rho for both sides
//! - **Sensitivity surface**: parallel sweep over spot prices and volatilities
//! - **Output**: text reports, SVG heatmaps and CSV tables
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_pricer::{OptionValuation, PricingModel};
//!
//! // spot, strike, days to maturity, volatility, risk-free rate (decimal)
//! let model = PricingModel::new(100.0, 90.0, 365.0, 0.5, 0.02)?;
//!
//! let call = model.call();
//! let put = model.put();
//! println!("call {:.2} (delta {:.3})", call.price(), call.delta());
//! println!("put  {:.2} (delta {:.3})", put.price(), put.delta());
//!
//! // Gamma and vega come from the shared state and agree exactly
//! assert_eq!(call.gamma(), put.gamma());
//! # Ok::<(), bs_pricer::PricingError>(())
//! ```
//!
//! ## Surface Presets
//!
//! - `standard()`: 11×11 grid, spot 90–110, volatility 0.3–0.7
//! - `fine()`: 21×21 grid over a wider range
//! - `minimal()`: 3×3 grid for quick checks

// ================================================================================================
// MODULES
// ================================================================================================

pub mod config;
pub mod models;
pub mod report;
pub mod surface;

// ================================================================================================
// IMPORTS
// ================================================================================================

use anyhow::{Context, Result};
use tracing::debug;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Pricing model and its option variants
pub use models::bs::{
    BlackScholesState, CallOption, MarketInputs, OptionSide, PricingError, PricingModel,
    PutOption, DAYS_PER_YEAR,
};

// Valuation contract and records
pub use models::traits::OptionValuation;
pub use models::utils::{norm_cdf, norm_pdf, ParseQuantityError, Quantity, Valuation};

// Sensitivity surface
pub use surface::{HeatmapOptions, SensitivitySurface, SurfaceCell, SurfaceConfig};

// Session configuration
pub use config::{InputConfig, OutputConfig, PricerConfig};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured surface sweeps.
///
/// # Available Configurations
///
/// - [`standard()`]: the default 11×11 sweep
/// - [`fine()`]: denser, wider sweep
/// - [`minimal()`]: 3×3 sweep
pub mod default_configs {
    use crate::surface::config::SurfaceConfig;

    /// 11×11 grid over spot 90–110 and volatility 0.3–0.7.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bs_pricer::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.grid_size, 11);
    /// ```
    pub fn standard() -> SurfaceConfig {
        SurfaceConfig::standard()
    }

    /// 21×21 grid over spot 80–120 and volatility 0.1–0.9.
    pub fn fine() -> SurfaceConfig {
        SurfaceConfig::fine()
    }

    /// 3×3 grid, mostly useful in tests.
    pub fn minimal() -> SurfaceConfig {
        SurfaceConfig::minimal()
    }
}

/// Value a call and a put from one set of inputs.
///
/// Returns the call and put [`Valuation`]s in that order. Gamma and vega are
/// evaluated once and copied into both.
///
/// # Errors
///
/// [`PricingError::InvalidInput`] when a spot, strike, maturity or volatility
/// is not a positive finite number, when the rate is not finite, or when a
/// derived quantity (such as `ln(S/K)` or `σ·√T`) is undefined.
///
/// # Example
///
/// ```rust
/// use bs_pricer::{value_options, MarketInputs};
///
/// let (call, put) = value_options(MarketInputs::new(100.0, 90.0, 365.0, 0.5, 0.02))?;
/// assert!(call.price > put.price);
/// assert_eq!(call.vega, put.vega);
/// # Ok::<(), bs_pricer::PricingError>(())
/// ```
pub fn value_options(inputs: MarketInputs) -> Result<(Valuation, Valuation), PricingError> {
    let model = PricingModel::from_inputs(inputs)?;
    Ok(model.valuations())
}

/// Sweep a spot/volatility surface around a set of inputs.
///
/// Strike, maturity and rate come from `inputs`; the axes come from `config`.
/// The input's own spot price and volatility do not take part in the sweep.
///
/// # Errors
///
/// * `anyhow::Error` if the surface configuration is out of bounds
/// * `anyhow::Error` wrapping a [`PricingError`] if any cell cannot be valued
///
/// # Example
///
/// ```rust
/// use bs_pricer::{default_configs, sweep_surface, MarketInputs, OptionSide, Quantity};
///
/// let inputs = MarketInputs::new(100.0, 95.0, 30.0, 0.5, 0.01);
/// let surface = sweep_surface(&default_configs::minimal(), &inputs)?;
/// let prices = surface.values(OptionSide::Call, Quantity::Price);
/// assert_eq!(prices.len(), 3);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn sweep_surface(config: &SurfaceConfig, inputs: &MarketInputs) -> Result<SensitivitySurface> {
    let surface = SensitivitySurface::from_config(config, inputs)?;
    let (columns, rows) = surface.dimensions();
    debug!(columns, rows, "surface ready");
    Ok(surface)
}

/// Value the configured option and sweep its surface in one step.
///
/// The configuration is validated first, including the input form's
/// minimums (for example at least one day to maturity).
pub fn run_session(config: &PricerConfig) -> Result<(PricingModel, SensitivitySurface)> {
    config.validate()?;
    let inputs = config.inputs.to_market_inputs();
    let model = PricingModel::from_inputs(inputs).context("failed to value configured option")?;
    let surface = sweep_surface(&config.surface, &inputs)?;
    Ok((model, surface))
}
