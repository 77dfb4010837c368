// Example: surface_heatmap.rs
// Sweeps a spot/volatility grid around a 95-strike option and writes call and
// put heatmaps for the chosen quantity.
//
// Usage:
//     cargo run --example surface_heatmap -- [QUANTITY] [OUTPUT_DIR]
//
// QUANTITY is one of price, delta, gamma, vega, theta, rho (default: price).
// The images are written to <OUTPUT_DIR>/call_<quantity>.svg and
// <OUTPUT_DIR>/put_<quantity>.svg (default directory: the working directory).

use std::env;
use std::error::Error;
use std::path::PathBuf;

use bs_pricer::report::render_surface_table;
use bs_pricer::surface::heatmap;
use bs_pricer::{
    default_configs, sweep_surface, HeatmapOptions, MarketInputs, OptionSide, Quantity,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let quantity: Quantity = match args.get(1) {
        Some(arg) => arg.parse()?,
        None => Quantity::Price,
    };
    let out_dir = args.get(2).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    // Strike, maturity and rate stay fixed; spot and volatility come from the grid
    let inputs = MarketInputs::new(100.0, 95.0, 30.0, 0.5, 0.01);
    let mut config = default_configs::standard();
    config.quantity = quantity;

    let surface = sweep_surface(&config, &inputs)?;
    let (columns, rows) = surface.dimensions();
    println!("Swept {} x {} grid", columns, rows);

    let options = HeatmapOptions {
        decimals: if quantity == Quantity::Gamma { 4 } else { 2 },
        ..HeatmapOptions::default()
    };

    for side in OptionSide::BOTH {
        println!("{}", render_surface_table(&surface, side, quantity));

        if let Some((lo, hi)) = surface.value_range(side, quantity) {
            println!("{} {} range: {:.4} .. {:.4}", side, quantity, lo, hi);
        }

        let path = out_dir.join(format!("{}_{}.svg", side.as_str(), quantity.name()));
        heatmap::write_svg(&path, &surface, side, quantity, &options)?;
        println!("Heatmap saved to {}", path.display());
    }

    Ok(())
}
