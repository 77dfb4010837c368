//! SVG heatmaps of a [`SensitivitySurface`].
//!
//! Spot prices run along the x axis and volatilities along the y axis. Each
//! cell is filled on a viridis-like ramp between the smallest and largest
//! value of the plotted quantity and, when enabled, annotated with its value.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use crate::models::bs::OptionSide;
use crate::models::utils::Quantity;
use crate::report::format_significant;
use crate::surface::grid::SensitivitySurface;

const RAMP: [RGBColor; 3] = [
    RGBColor(68, 1, 84),
    RGBColor(33, 145, 140),
    RGBColor(253, 231, 37),
];

/// Rendering options for a heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapOptions {
    pub width: u32,
    pub height: u32,
    /// Write each cell's value inside it
    pub annotate: bool,
    /// Decimals of the cell annotations
    pub decimals: usize,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            width: 720,
            height: 720,
            annotate: true,
            decimals: 2,
        }
    }
}

/// Chart title: `CALL` for prices, `CALL delta` for a Greek.
pub fn heatmap_title(side: OptionSide, quantity: Quantity) -> String {
    match quantity {
        Quantity::Price => side.to_string(),
        other => format!("{} {}", side, other),
    }
}

/// Colour of a value normalised to `[0, 1]`.
pub fn ramp_colour(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (RAMP.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(RAMP.len() - 2);
    let frac = scaled - idx as f64;
    let (a, b) = (RAMP[idx], RAMP[idx + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Renders the heatmap into an SVG document held in memory.
pub fn render_svg(
    surface: &SensitivitySurface,
    side: OptionSide,
    quantity: Quantity,
    options: &HeatmapOptions,
) -> Result<String> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        draw_heatmap(&root, surface, side, quantity, options)?;
        root.present()?;
    }
    Ok(svg)
}

/// Renders the heatmap into an SVG file at `path`.
pub fn write_svg(
    path: &Path,
    surface: &SensitivitySurface,
    side: OptionSide,
    quantity: Quantity,
    options: &HeatmapOptions,
) -> Result<()> {
    {
        let root = SVGBackend::new(path, (options.width, options.height)).into_drawing_area();
        draw_heatmap(&root, surface, side, quantity, options)?;
        root.present()
            .with_context(|| format!("failed to write heatmap {}", path.display()))?;
    }
    info!(path = %path.display(), %side, %quantity, "heatmap written");
    Ok(())
}

fn draw_heatmap<DB>(
    root: &DrawingArea<DB, Shift>,
    surface: &SensitivitySurface,
    side: OptionSide,
    quantity: Quantity,
    options: &HeatmapOptions,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (columns, rows) = surface.dimensions();
    let (lo, hi) = surface
        .value_range(side, quantity)
        .ok_or_else(|| anyhow!("cannot draw a heatmap of an empty surface"))?;
    let span = hi - lo;

    root.fill(&WHITE)?;

    let spots = surface.spot_prices();
    let vols = surface.volatilities();
    let x_formatter = |x: &f64| axis_label(spots, *x, |s| format!("{:.2}", s));
    let y_formatter = |y: &f64| axis_label(vols, *y, |v| format_significant(v, 2));

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(heatmap_title(side, quantity), ("sans-serif", 28))
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..columns as f64 - 0.5, -0.5..rows as f64 - 0.5)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(columns)
        .y_labels(rows)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc("Spot Price (€)")
        .y_desc("Volatility")
        .draw()?;

    let values = surface.values(side, quantity);
    let normalise = |v: f64| if span > 0.0 { (v - lo) / span } else { 0.5 };

    chart.draw_series(values.iter().enumerate().flat_map(|(row, row_values)| {
        row_values.iter().enumerate().map(move |(col, &v)| {
            let (x, y) = (col as f64, row as f64);
            Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                ramp_colour(normalise(v)).filled(),
            )
        })
    }))?;

    if options.annotate {
        let font_size = annotation_font_size(options, columns.max(rows));
        let decimals = options.decimals;
        chart.draw_series(values.iter().enumerate().flat_map(|(row, row_values)| {
            row_values.iter().enumerate().map(move |(col, &v)| {
                let text_colour = if normalise(v) > 0.6 { BLACK } else { WHITE };
                let style = ("sans-serif", font_size)
                    .into_font()
                    .color(&text_colour)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                Text::new(format!("{:.*}", decimals, v), (col as f64, row as f64), style)
            })
        }))?;
    }

    Ok(())
}

/// Label for a tick at `position` if it sits on a cell centre.
fn axis_label(axis: &[f64], position: f64, fmt: impl Fn(f64) -> String) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    axis.get(index as usize).map(|&v| fmt(v)).unwrap_or_default()
}

fn annotation_font_size(options: &HeatmapOptions, cells_per_axis: usize) -> f64 {
    let cell_px = options.width.min(options.height) as f64 / cells_per_axis.max(1) as f64;
    (cell_px / 4.0).clamp(8.0, 16.0)
}
