use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::models::utils::Quantity;
use crate::surface::grid::linspace;

/// Smallest spot price accepted by the surface inputs.
pub const MIN_SPOT_PRICE: f64 = 0.01;
/// Bounds of the volatility range selector.
pub const VOLATILITY_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Settings for the spot/volatility sensitivity sweep.
///
/// Spot prices vary along the x axis and volatilities along the y axis; both
/// axes are sampled with `grid_size` evenly spaced points including the end
/// points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_min_spot_price")]
    pub min_spot_price: f64,

    #[serde(default = "default_max_spot_price")]
    pub max_spot_price: f64,

    #[serde(default = "default_min_volatility")]
    pub min_volatility: f64,

    #[serde(default = "default_max_volatility")]
    pub max_volatility: f64,

    /// Points per axis
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    /// Value plotted in each cell
    #[serde(default)]
    pub quantity: Quantity,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            min_spot_price: default_min_spot_price(),
            max_spot_price: default_max_spot_price(),
            min_volatility: default_min_volatility(),
            max_volatility: default_max_volatility(),
            grid_size: default_grid_size(),
            quantity: Quantity::default(),
        }
    }
}

impl SurfaceConfig {
    /// 11×11 grid over spot 90–110 and volatility 0.3–0.7
    pub fn standard() -> Self {
        Self::default()
    }

    /// 21×21 grid over a wider spot range, for smoother heatmaps
    pub fn fine() -> Self {
        Self {
            min_spot_price: 80.0,
            max_spot_price: 120.0,
            min_volatility: 0.1,
            max_volatility: 0.9,
            grid_size: 21,
            ..Self::default()
        }
    }

    /// 3×3 grid for quick checks
    pub fn minimal() -> Self {
        Self {
            grid_size: 3,
            ..Self::default()
        }
    }

    /// Checks the ranges against the input bounds of the sweep.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_spot_price.is_finite() && self.max_spot_price.is_finite(),
            "spot price range must be finite (got {}..{})",
            self.min_spot_price,
            self.max_spot_price
        );
        ensure!(
            self.min_spot_price >= MIN_SPOT_PRICE,
            "min_spot_price ({}) must be >= {}",
            self.min_spot_price,
            MIN_SPOT_PRICE
        );
        ensure!(
            self.min_spot_price < self.max_spot_price,
            "min_spot_price ({}) must be below max_spot_price ({})",
            self.min_spot_price,
            self.max_spot_price
        );

        let (vol_floor, vol_cap) = VOLATILITY_BOUNDS;
        ensure!(
            self.min_volatility >= vol_floor && self.max_volatility <= vol_cap,
            "volatility range {}..{} must lie within [{}, {}]",
            self.min_volatility,
            self.max_volatility,
            vol_floor,
            vol_cap
        );
        ensure!(
            self.min_volatility > 0.0,
            "min_volatility must be > 0, a zero volatility has no Black-Scholes value"
        );
        ensure!(
            self.min_volatility < self.max_volatility,
            "min_volatility ({}) must be below max_volatility ({})",
            self.min_volatility,
            self.max_volatility
        );
        ensure!(
            self.grid_size >= 2,
            "grid_size ({}) must be at least 2",
            self.grid_size
        );
        Ok(())
    }

    /// Spot prices along the x axis, ascending.
    pub fn spot_axis(&self) -> Vec<f64> {
        linspace(self.min_spot_price, self.max_spot_price, self.grid_size)
    }

    /// Volatilities along the y axis, ascending.
    pub fn volatility_axis(&self) -> Vec<f64> {
        linspace(self.min_volatility, self.max_volatility, self.grid_size)
    }
}

fn default_min_spot_price() -> f64 {
    90.0
}

fn default_max_spot_price() -> f64 {
    110.0
}

fn default_min_volatility() -> f64 {
    0.3
}

fn default_max_volatility() -> f64 {
    0.7
}

fn default_grid_size() -> usize {
    11
}
