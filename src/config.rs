//! Session configuration loaded from TOML.
//!
//! ```toml
//! [inputs]
//! spot_price = 100.0
//! strike_price = 95.0
//! days_to_maturity = 30.0
//! volatility = 0.5
//! risk_free_rate_percent = 1.0
//!
//! [surface]
//! min_spot_price = 90.0
//! max_spot_price = 110.0
//! min_volatility = 0.3
//! max_volatility = 0.7
//! grid_size = 11
//! quantity = "price"
//!
//! [output]
//! heatmap_dir = "out"
//! csv_dir = "out"
//! ```
//!
//! Every key is optional and falls back to the values above (the output
//! directories default to none).

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::bs::MarketInputs;
use crate::surface::config::{SurfaceConfig, MIN_SPOT_PRICE};

/// Smallest strike accepted from the input form.
pub const MIN_STRIKE_PRICE: f64 = 0.01;
/// Shortest maturity accepted from the input form, in days.
pub const MIN_DAYS_TO_MATURITY: f64 = 1.0;
/// Smallest volatility accepted from the input form.
pub const MIN_VOLATILITY: f64 = 0.01;

/// The option being valued, as entered by the user.
///
/// The rate is entered in percent (`1.0` = 1%) and converted to a decimal
/// fraction by [`InputConfig::to_market_inputs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_spot_price")]
    pub spot_price: f64,

    #[serde(default = "default_strike_price")]
    pub strike_price: f64,

    #[serde(default = "default_days_to_maturity")]
    pub days_to_maturity: f64,

    #[serde(default = "default_volatility")]
    pub volatility: f64,

    #[serde(default = "default_risk_free_rate_percent")]
    pub risk_free_rate_percent: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            spot_price: default_spot_price(),
            strike_price: default_strike_price(),
            days_to_maturity: default_days_to_maturity(),
            volatility: default_volatility(),
            risk_free_rate_percent: default_risk_free_rate_percent(),
        }
    }
}

impl InputConfig {
    /// Applies the input form's minimums.
    pub fn validate(&self) -> Result<()> {
        check_minimum("spot_price", self.spot_price, MIN_SPOT_PRICE)?;
        check_minimum("strike_price", self.strike_price, MIN_STRIKE_PRICE)?;
        check_minimum("days_to_maturity", self.days_to_maturity, MIN_DAYS_TO_MATURITY)?;
        check_minimum("volatility", self.volatility, MIN_VOLATILITY)?;
        check_minimum("risk_free_rate_percent", self.risk_free_rate_percent, 0.0)?;
        Ok(())
    }

    /// Model inputs with the rate converted from percent to a decimal.
    pub fn to_market_inputs(&self) -> MarketInputs {
        MarketInputs::new(
            self.spot_price,
            self.strike_price,
            self.days_to_maturity,
            self.volatility,
            self.risk_free_rate_percent / 100.0,
        )
    }
}

fn check_minimum(name: &str, value: f64, minimum: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value >= minimum,
        "{} ({}) must be a finite number >= {}",
        name,
        value,
        minimum
    );
    Ok(())
}

/// Where rendered artefacts go. Nothing is written when a directory is unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub heatmap_dir: Option<PathBuf>,

    #[serde(default)]
    pub csv_dir: Option<PathBuf>,
}

/// Complete configuration of a pricing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricerConfig {
    #[serde(default)]
    pub inputs: InputConfig,

    #[serde(default)]
    pub surface: SurfaceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl PricerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to parse pricer configuration")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("in config file {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialise pricer configuration")
    }

    pub fn validate(&self) -> Result<()> {
        self.inputs.validate().context("invalid [inputs]")?;
        self.surface.validate().context("invalid [surface]")?;
        Ok(())
    }
}

/// Commented TOML template holding the default configuration.
pub fn default_config_template() -> Result<String> {
    let body = PricerConfig::default().to_toml_string()?;
    Ok(format!(
        "# Black-Scholes option pricer configuration\n\
         #\n\
         # risk_free_rate_percent is in percent (1.0 = 1%).\n\
         # Set [output] heatmap_dir / csv_dir to write SVG heatmaps and CSV surfaces.\n\n{}",
        body
    ))
}

fn default_spot_price() -> f64 {
    100.0
}

fn default_strike_price() -> f64 {
    95.0
}

fn default_days_to_maturity() -> f64 {
    30.0
}

fn default_volatility() -> f64 {
    0.5
}

fn default_risk_free_rate_percent() -> f64 {
    1.0
}
