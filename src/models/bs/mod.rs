// src/models/bs/mod.rs

//! Closed-form Black-Scholes valuation of European calls and puts.
//!
//! A [`PricingModel`] derives the auxiliary quantities once:
//!
//! ```text
//! T  = days / 365
//! d1 = [ln(S/K) + (r + σ²/2)·T] / (σ·√T)
//! d2 = d1 − σ·√T
//! ```
//!
//! together with Φ(d1), Φ(d2), φ(d1) and the discount factor e^(−rT), and hands
//! the same [`BlackScholesState`] to a [`CallOption`] and a [`PutOption`]. Both
//! variants read from that state only, so gamma and vega are bit-identical
//! between them.

pub mod error;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::traits::OptionValuation;
use crate::models::utils::{norm_cdf, norm_pdf, Quantity, Valuation};

pub use error::PricingError;
use error::{ensure_finite, ensure_positive};

/// Calendar days per year used to convert days to maturity into years.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// The five scalar inputs of a Black-Scholes valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInputs {
    /// Current price of the underlying
    pub spot_price: f64,
    /// Option strike
    pub strike_price: f64,
    /// Calendar days until expiry
    pub days_to_maturity: f64,
    /// Annualised volatility as a decimal (0.5 = 50%)
    pub volatility: f64,
    /// Continuously-compounded annual rate as a decimal (0.02 = 2%)
    pub risk_free_interest_rate: f64,
}

impl MarketInputs {
    pub fn new(
        spot_price: f64,
        strike_price: f64,
        days_to_maturity: f64,
        volatility: f64,
        risk_free_interest_rate: f64,
    ) -> Self {
        Self {
            spot_price,
            strike_price,
            days_to_maturity,
            volatility,
            risk_free_interest_rate,
        }
    }

    /// Checks the domain of every input. The rate may be zero or negative.
    pub fn validate(&self) -> Result<(), PricingError> {
        ensure_positive("spot_price", self.spot_price)?;
        ensure_positive("strike_price", self.strike_price)?;
        ensure_positive("days_to_maturity", self.days_to_maturity)?;
        ensure_positive("volatility", self.volatility)?;
        ensure_finite("risk_free_interest_rate", self.risk_free_interest_rate)?;
        Ok(())
    }

    /// Time to maturity in years.
    pub fn years_to_maturity(&self) -> f64 {
        self.days_to_maturity / DAYS_PER_YEAR
    }
}

/// Which side of the contract a valuation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    pub const BOTH: [OptionSide; 2] = [OptionSide::Call, OptionSide::Put];

    /// Lower-case name used for output file stems.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Call => "call",
            OptionSide::Put => "put",
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSide::Call => write!(f, "CALL"),
            OptionSide::Put => write!(f, "PUT"),
        }
    }
}

/// Intermediates shared by the call and put of one [`PricingModel`].
///
/// Only [`PricingModel`] can build this, so a state always satisfies the
/// input preconditions and every field is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesState {
    inputs: MarketInputs,
    years_to_maturity: f64,
    d1: f64,
    d2: f64,
    d1_cdf: f64,
    d2_cdf: f64,
    d1_pdf: f64,
    continuous_discounting_factor: f64,
}

impl BlackScholesState {
    fn derive(inputs: MarketInputs) -> Result<Self, PricingError> {
        inputs.validate()?;

        let years_to_maturity = inputs.years_to_maturity();
        if !years_to_maturity.is_normal() {
            return Err(PricingError::invalid(
                "years_to_maturity",
                years_to_maturity,
                "must be a positive normal number",
            ));
        }

        let moneyness = inputs.spot_price / inputs.strike_price;
        if !moneyness.is_normal() {
            return Err(PricingError::invalid(
                "spot_price / strike_price",
                moneyness,
                "must be a positive normal number",
            ));
        }

        let vol_sqrt_t = inputs.volatility * years_to_maturity.sqrt();
        if !vol_sqrt_t.is_normal() {
            return Err(PricingError::invalid(
                "volatility * sqrt(years_to_maturity)",
                vol_sqrt_t,
                "must be a positive normal number",
            ));
        }

        let r = inputs.risk_free_interest_rate;
        let drift = (r + 0.5 * inputs.volatility * inputs.volatility) * years_to_maturity;
        let d1 = ensure_finite("d1", (moneyness.ln() + drift) / vol_sqrt_t)?;
        let d2 = ensure_finite("d2", d1 - vol_sqrt_t)?;
        let continuous_discounting_factor = ensure_finite(
            "continuous_discounting_factor",
            (-r * years_to_maturity).exp(),
        )?;

        let state = Self {
            inputs,
            years_to_maturity,
            d1,
            d2,
            d1_cdf: norm_cdf(d1),
            d2_cdf: norm_cdf(d2),
            d1_pdf: norm_pdf(d1),
            continuous_discounting_factor,
        };

        // Terms every price and Greek is assembled from.
        let discounted_strike = inputs.strike_price * continuous_discounting_factor;
        ensure_finite("gamma", state.gamma())?;
        ensure_finite("vega", state.vega())?;
        ensure_finite("theta", state.theta_decay())?;
        ensure_finite("discounted_strike", discounted_strike)?;
        ensure_finite("discounted_rate_strike", state.discounted_rate_strike())?;
        ensure_finite("rho", discounted_strike * years_to_maturity)?;

        trace!(?state, "derived Black-Scholes intermediates");
        Ok(state)
    }

    pub fn inputs(&self) -> &MarketInputs {
        &self.inputs
    }

    pub fn spot_price(&self) -> f64 {
        self.inputs.spot_price
    }

    pub fn strike_price(&self) -> f64 {
        self.inputs.strike_price
    }

    pub fn volatility(&self) -> f64 {
        self.inputs.volatility
    }

    pub fn risk_free_interest_rate(&self) -> f64 {
        self.inputs.risk_free_interest_rate
    }

    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    pub fn d1(&self) -> f64 {
        self.d1
    }

    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// Φ(d1)
    pub fn d1_cdf(&self) -> f64 {
        self.d1_cdf
    }

    /// Φ(d2)
    pub fn d2_cdf(&self) -> f64 {
        self.d2_cdf
    }

    /// φ(d1)
    pub fn d1_pdf(&self) -> f64 {
        self.d1_pdf
    }

    /// e^(−rT)
    pub fn continuous_discounting_factor(&self) -> f64 {
        self.continuous_discounting_factor
    }

    /// Gamma, identical for calls and puts: φ(d1) / (S·σ·√T).
    pub fn gamma(&self) -> f64 {
        self.d1_pdf / (self.spot_price() * self.volatility() * self.years_to_maturity.sqrt())
    }

    /// Vega, identical for calls and puts: S·φ(d1)·√T.
    pub fn vega(&self) -> f64 {
        self.spot_price() * self.d1_pdf * self.years_to_maturity.sqrt()
    }

    /// Time-decay term common to both theta formulas: −(S·φ(d1)·σ) / (2T).
    fn theta_decay(&self) -> f64 {
        -(self.spot_price() * self.d1_pdf * self.volatility()) / (2.0 * self.years_to_maturity)
    }

    /// r·K·e^(−rT)
    fn discounted_rate_strike(&self) -> f64 {
        self.risk_free_interest_rate() * self.strike_price() * self.continuous_discounting_factor
    }
}

/// European call sharing its model's [`BlackScholesState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallOption {
    state: BlackScholesState,
}

impl OptionValuation for CallOption {
    fn side(&self) -> OptionSide {
        OptionSide::Call
    }

    fn state(&self) -> &BlackScholesState {
        &self.state
    }

    fn price(&self) -> f64 {
        let s = &self.state;
        s.spot_price() * s.d1_cdf - s.strike_price() * s.continuous_discounting_factor * s.d2_cdf
    }

    fn delta(&self) -> f64 {
        self.state.d1_cdf
    }

    fn theta(&self) -> f64 {
        let s = &self.state;
        s.theta_decay() - s.discounted_rate_strike() * s.d2_cdf
    }

    fn rho(&self) -> f64 {
        let s = &self.state;
        s.strike_price() * s.years_to_maturity * s.continuous_discounting_factor * s.d2_cdf
    }
}

/// European put sharing its model's [`BlackScholesState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PutOption {
    state: BlackScholesState,
}

impl OptionValuation for PutOption {
    fn side(&self) -> OptionSide {
        OptionSide::Put
    }

    fn state(&self) -> &BlackScholesState {
        &self.state
    }

    fn price(&self) -> f64 {
        let s = &self.state;
        s.strike_price() * s.continuous_discounting_factor * (1.0 - s.d2_cdf)
            - s.spot_price() * (1.0 - s.d1_cdf)
    }

    fn delta(&self) -> f64 {
        self.state.d1_cdf - 1.0
    }

    fn theta(&self) -> f64 {
        let s = &self.state;
        s.theta_decay() + s.discounted_rate_strike() * (s.d2_cdf - 1.0)
    }

    fn rho(&self) -> f64 {
        let s = &self.state;
        s.strike_price() * s.years_to_maturity * s.continuous_discounting_factor * (s.d2_cdf - 1.0)
    }
}

/// A call and a put valued from one set of [`MarketInputs`].
///
/// Construction is the only fallible step: once a model exists every
/// valuation operation on [`PricingModel::call`] and [`PricingModel::put`]
/// returns a finite number.
///
/// # Example
///
/// ```rust
/// use bs_pricer::{OptionValuation, PricingModel};
///
/// let model = PricingModel::new(100.0, 90.0, 365.0, 0.5, 0.02)?;
/// assert!((model.call().price() - 25.04).abs() < 0.005);
/// assert!((model.put().price() - 13.26).abs() < 0.005);
/// assert_eq!(model.call().gamma(), model.put().gamma());
/// # Ok::<(), bs_pricer::PricingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingModel {
    call: CallOption,
    put: PutOption,
}

impl PricingModel {
    pub fn new(
        spot_price: f64,
        strike_price: f64,
        days_to_maturity: f64,
        volatility: f64,
        risk_free_interest_rate: f64,
    ) -> Result<Self, PricingError> {
        Self::from_inputs(MarketInputs::new(
            spot_price,
            strike_price,
            days_to_maturity,
            volatility,
            risk_free_interest_rate,
        ))
    }

    pub fn from_inputs(inputs: MarketInputs) -> Result<Self, PricingError> {
        let state = BlackScholesState::derive(inputs)?;
        let model = Self {
            call: CallOption { state },
            put: PutOption { state },
        };

        // Finite terms can still overflow when combined.
        let (call, put) = model.valuations();
        let sides = [
            (call, "call value must be finite"),
            (put, "put value must be finite"),
        ];
        for (valuation, reason) in sides {
            for quantity in Quantity::ALL {
                let value = valuation.get(quantity);
                if !value.is_finite() {
                    return Err(PricingError::invalid(quantity.name(), value, reason));
                }
            }
        }
        Ok(model)
    }

    pub fn call(&self) -> &CallOption {
        &self.call
    }

    pub fn put(&self) -> &PutOption {
        &self.put
    }

    pub fn inputs(&self) -> &MarketInputs {
        self.call.state.inputs()
    }

    pub fn state(&self) -> &BlackScholesState {
        &self.call.state
    }

    /// The option for `side` as a trait object.
    pub fn option(&self, side: OptionSide) -> &dyn OptionValuation {
        match side {
            OptionSide::Call => &self.call,
            OptionSide::Put => &self.put,
        }
    }

    /// Snapshots of both options, evaluating the shared gamma and vega once.
    pub fn valuations(&self) -> (Valuation, Valuation) {
        let state = self.state();
        let gamma = state.gamma();
        let vega = state.vega();
        let call = Valuation {
            price: self.call.price(),
            delta: self.call.delta(),
            gamma,
            vega,
            theta: self.call.theta(),
            rho: self.call.rho(),
        };
        let put = Valuation {
            price: self.put.price(),
            delta: self.put.delta(),
            gamma,
            vega,
            theta: self.put.theta(),
            rho: self.put.rho(),
        };
        (call, put)
    }

    /// Snapshot of a single side.
    pub fn valuation(&self, side: OptionSide) -> Valuation {
        let (call, put) = self.valuations();
        match side {
            OptionSide::Call => call,
            OptionSide::Put => put,
        }
    }
}
