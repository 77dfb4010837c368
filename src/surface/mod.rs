//! Spot/volatility sensitivity surfaces built on top of [`crate::models::bs`].
//!
//! The sweep itself lives in [`grid`]; [`heatmap`] and [`export`] turn a
//! finished surface into SVG charts and CSV tables.

pub mod config;
pub mod export;
pub mod grid;
pub mod heatmap;

pub use config::SurfaceConfig;
pub use grid::{linspace, SensitivitySurface, SurfaceCell};
pub use heatmap::HeatmapOptions;
