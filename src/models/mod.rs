pub mod bs;

/// Common traits implemented by both option variants
pub mod traits {
    use crate::models::bs::{BlackScholesState, OptionSide};
    use crate::models::utils::Valuation;

    /// Valuation contract of a European option.
    ///
    /// Every method is a pure function of the state fixed at construction.
    /// `gamma` and `vega` are provided here once, so a call and a put built
    /// from the same [`BlackScholesState`] always agree on them.
    pub trait OptionValuation {
        fn side(&self) -> OptionSide;
        fn state(&self) -> &BlackScholesState;

        /// Fair value
        fn price(&self) -> f64;
        /// ∂price/∂S
        fn delta(&self) -> f64;
        /// ∂price/∂t, annualised
        fn theta(&self) -> f64;
        /// ∂price/∂r
        fn rho(&self) -> f64;

        /// ∂²price/∂S²
        fn gamma(&self) -> f64 {
            self.state().gamma()
        }

        /// ∂price/∂σ
        fn vega(&self) -> f64 {
            self.state().vega()
        }

        fn valuation(&self) -> Valuation {
            Valuation {
                price: self.price(),
                delta: self.delta(),
                gamma: self.gamma(),
                vega: self.vega(),
                theta: self.theta(),
                rho: self.rho(),
            }
        }
    }
}

/// Standard normal helpers and valuation records
pub mod utils {
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;
    use thiserror::Error;

    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

    /// Standard normal cumulative distribution function Φ(x).
    pub fn norm_cdf(x: f64) -> f64 {
        // 0.5 * erfc(-x / sqrt(2)) keeps precision in the lower tail
        0.5 * libm::erfc(-x / std::f64::consts::SQRT_2)
    }

    /// Standard normal probability density function φ(x).
    pub fn norm_pdf(x: f64) -> f64 {
        INV_SQRT_2PI * (-0.5 * x * x).exp()
    }

    /// Price and Greeks of one option at one input set.
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct Valuation {
        pub price: f64,
        pub delta: f64,
        pub gamma: f64,
        pub vega: f64,
        pub theta: f64,
        pub rho: f64,
    }

    impl Valuation {
        pub fn get(&self, quantity: Quantity) -> f64 {
            match quantity {
                Quantity::Price => self.price,
                Quantity::Delta => self.delta,
                Quantity::Gamma => self.gamma,
                Quantity::Vega => self.vega,
                Quantity::Theta => self.theta,
                Quantity::Rho => self.rho,
            }
        }
    }

    /// One field of a [`Valuation`], selectable for surfaces and exports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Quantity {
        #[default]
        Price,
        Delta,
        Gamma,
        Vega,
        Theta,
        Rho,
    }

    impl Quantity {
        pub const ALL: [Quantity; 6] = [
            Quantity::Price,
            Quantity::Delta,
            Quantity::Gamma,
            Quantity::Vega,
            Quantity::Theta,
            Quantity::Rho,
        ];

        pub fn name(&self) -> &'static str {
            match self {
                Quantity::Price => "price",
                Quantity::Delta => "delta",
                Quantity::Gamma => "gamma",
                Quantity::Vega => "vega",
                Quantity::Theta => "theta",
                Quantity::Rho => "rho",
            }
        }

        /// Greek letter shown on badges; `None` for the price.
        pub fn symbol(&self) -> Option<&'static str> {
            match self {
                Quantity::Price => None,
                Quantity::Delta => Some("Δ"),
                Quantity::Gamma => Some("Γ"),
                Quantity::Vega => Some("ν"),
                Quantity::Theta => Some("θ"),
                Quantity::Rho => Some("ρ"),
            }
        }
    }

    impl fmt::Display for Quantity {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.name())
        }
    }

    /// A quantity name that is not one of [`Quantity::ALL`].
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    #[error("unknown quantity '{input}', expected one of: price, delta, gamma, vega, theta, rho")]
    pub struct ParseQuantityError {
        pub input: String,
    }

    impl FromStr for Quantity {
        type Err = ParseQuantityError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Quantity::ALL
                .iter()
                .copied()
                .find(|q| q.name().eq_ignore_ascii_case(s.trim()))
                .ok_or_else(|| ParseQuantityError {
                    input: s.to_string(),
                })
        }
    }

}
