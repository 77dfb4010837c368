use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::bs::OptionSide;
use crate::models::utils::Quantity;
use crate::surface::grid::SensitivitySurface;

/// Writes one quantity of one side as CSV.
///
/// The header is `volatility` followed by every spot price; each following
/// record holds a volatility and the values across the spot axis.
pub fn write_csv<W: io::Write>(
    writer: W,
    surface: &SensitivitySurface,
    side: OptionSide,
    quantity: Quantity,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(surface.spot_prices().len() + 1);
    header.push("volatility".to_string());
    header.extend(surface.spot_prices().iter().map(|s| s.to_string()));
    wtr.write_record(&header)?;

    for (vol, row) in surface
        .volatilities()
        .iter()
        .zip(surface.values(side, quantity))
    {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(vol.to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the CSV into a file at `path`, replacing any existing file.
pub fn write_csv_file(
    path: &Path,
    surface: &SensitivitySurface,
    side: OptionSide,
    quantity: Quantity,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(file, surface, side, quantity)
        .with_context(|| format!("failed to write surface CSV {}", path.display()))?;
    info!(path = %path.display(), %side, %quantity, "surface CSV written");
    Ok(())
}
