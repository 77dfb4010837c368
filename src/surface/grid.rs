//! Spot/volatility sensitivity sweep.
//!
//! Every cell is an independent [`PricingModel`] built from its own
//! (spot price, volatility) pair with strike, maturity and rate held fixed, so
//! the rows are evaluated in parallel with rayon and the result does not
//! depend on scheduling.

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

use crate::models::bs::{MarketInputs, OptionSide, PricingError, PricingModel};
use crate::models::utils::{Quantity, Valuation};
use crate::surface::config::SurfaceConfig;

/// `n` evenly spaced points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// Call and put valuations of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCell {
    pub call: Valuation,
    pub put: Valuation,
}

impl SurfaceCell {
    pub fn side(&self, side: OptionSide) -> &Valuation {
        match side {
            OptionSide::Call => &self.call,
            OptionSide::Put => &self.put,
        }
    }
}

/// Grid of valuations indexed by `[volatility_index][spot_index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivitySurface {
    spot_prices: Vec<f64>,
    volatilities: Vec<f64>,
    strike_price: f64,
    days_to_maturity: f64,
    risk_free_interest_rate: f64,
    cells: Vec<Vec<SurfaceCell>>,
}

impl SensitivitySurface {
    /// Values every (spot, volatility) pair of the two axes.
    ///
    /// Fails with the first [`PricingError`] met if any cell has invalid inputs.
    pub fn build(
        spot_prices: &[f64],
        volatilities: &[f64],
        strike_price: f64,
        days_to_maturity: f64,
        risk_free_interest_rate: f64,
    ) -> Result<Self, PricingError> {
        debug!(
            spots = spot_prices.len(),
            volatilities = volatilities.len(),
            strike_price,
            days_to_maturity,
            risk_free_interest_rate,
            "sweeping sensitivity surface"
        );

        let cells = volatilities
            .par_iter()
            .map(|&volatility| {
                spot_prices
                    .iter()
                    .map(|&spot_price| -> Result<SurfaceCell, PricingError> {
                        let model = PricingModel::new(
                            spot_price,
                            strike_price,
                            days_to_maturity,
                            volatility,
                            risk_free_interest_rate,
                        )?;
                        let (call, put) = model.valuations();
                        Ok(SurfaceCell { call, put })
                    })
                    .collect::<Result<Vec<_>, PricingError>>()
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok(Self {
            spot_prices: spot_prices.to_vec(),
            volatilities: volatilities.to_vec(),
            strike_price,
            days_to_maturity,
            risk_free_interest_rate,
            cells,
        })
    }

    /// Sweeps the axes described by `config`, taking strike, maturity and rate
    /// from `inputs`. The spot price and volatility of `inputs` are ignored.
    pub fn from_config(config: &SurfaceConfig, inputs: &MarketInputs) -> Result<Self> {
        config.validate().context("invalid surface configuration")?;
        let surface = Self::build(
            &config.spot_axis(),
            &config.volatility_axis(),
            inputs.strike_price,
            inputs.days_to_maturity,
            inputs.risk_free_interest_rate,
        )
        .context("failed to value sensitivity surface")?;
        Ok(surface)
    }

    pub fn spot_prices(&self) -> &[f64] {
        &self.spot_prices
    }

    pub fn volatilities(&self) -> &[f64] {
        &self.volatilities
    }

    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    pub fn days_to_maturity(&self) -> f64 {
        self.days_to_maturity
    }

    pub fn risk_free_interest_rate(&self) -> f64 {
        self.risk_free_interest_rate
    }

    /// (columns, rows) = (spot points, volatility points)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.spot_prices.len(), self.volatilities.len())
    }

    pub fn cell(&self, volatility_index: usize, spot_index: usize) -> Option<&SurfaceCell> {
        self.cells.get(volatility_index)?.get(spot_index)
    }

    /// One quantity of one side as rows of volatility, columns of spot price.
    pub fn values(&self, side: OptionSide, quantity: Quantity) -> Vec<Vec<f64>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.side(side).get(quantity)).collect())
            .collect()
    }

    /// Smallest and largest value of a quantity, `None` for an empty surface.
    pub fn value_range(&self, side: OptionSide, quantity: Quantity) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .map(|cell| cell.side(side).get(quantity))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
