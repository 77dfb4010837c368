// src/main.rs
//
// Command-line front end: collects the five inputs (from a TOML file and/or
// flags), prints the call/put valuation report, and renders the spot/volatility
// surface as a text grid, SVG heatmaps and CSV tables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bs_pricer::config::default_config_template;
use bs_pricer::report::{render_report, render_surface_table};
use bs_pricer::surface::{export, heatmap};
use bs_pricer::{run_session, HeatmapOptions, OptionSide, PricerConfig, Quantity, SensitivitySurface};

#[derive(Parser, Debug)]
#[command(name = "option-pricer")]
#[command(about = "Black-Scholes option pricer with Greeks and sensitivity heatmaps")]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    generate_config: bool,

    /// Spot price of the underlying
    #[arg(long)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Days to maturity
    #[arg(long)]
    days: Option<f64>,

    /// Annualised volatility as a decimal (0.5 = 50%)
    #[arg(long)]
    volatility: Option<f64>,

    /// Risk-free rate in percent (1.0 = 1%)
    #[arg(long)]
    rate: Option<f64>,

    /// Lower end of the surface's spot axis
    #[arg(long)]
    min_spot: Option<f64>,

    /// Upper end of the surface's spot axis
    #[arg(long)]
    max_spot: Option<f64>,

    /// Lower end of the surface's volatility axis
    #[arg(long)]
    min_vol: Option<f64>,

    /// Upper end of the surface's volatility axis
    #[arg(long)]
    max_vol: Option<f64>,

    /// Points per surface axis
    #[arg(long)]
    grid_size: Option<usize>,

    /// Surface quantity: price, delta, gamma, vega, theta or rho
    #[arg(long)]
    quantity: Option<Quantity>,

    /// Directory for call/put SVG heatmaps
    #[arg(long)]
    heatmap_dir: Option<PathBuf>,

    /// Directory for call/put surface CSV files
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Skip the text surface grids on stdout
    #[arg(long)]
    no_table: bool,
}

impl Args {
    /// Flags take precedence over the configuration file.
    fn apply_overrides(&self, config: &mut PricerConfig) {
        let inputs = &mut config.inputs;
        override_with(&mut inputs.spot_price, self.spot);
        override_with(&mut inputs.strike_price, self.strike);
        override_with(&mut inputs.days_to_maturity, self.days);
        override_with(&mut inputs.volatility, self.volatility);
        override_with(&mut inputs.risk_free_rate_percent, self.rate);

        let surface = &mut config.surface;
        override_with(&mut surface.min_spot_price, self.min_spot);
        override_with(&mut surface.max_spot_price, self.max_spot);
        override_with(&mut surface.min_volatility, self.min_vol);
        override_with(&mut surface.max_volatility, self.max_vol);
        override_with(&mut surface.grid_size, self.grid_size);
        override_with(&mut surface.quantity, self.quantity);

        if self.heatmap_dir.is_some() {
            config.output.heatmap_dir = self.heatmap_dir.clone();
        }
        if self.csv_dir.is_some() {
            config.output.csv_dir = self.csv_dir.clone();
        }
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if args.generate_config {
        print!("{}", default_config_template()?);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => PricerConfig::from_file(path)?,
        None => PricerConfig::default(),
    };
    args.apply_overrides(&mut config);

    let inputs = &config.inputs;
    info!(
        spot = inputs.spot_price,
        strike = inputs.strike_price,
        days = inputs.days_to_maturity,
        volatility = inputs.volatility,
        rate_percent = inputs.risk_free_rate_percent,
        "pricing option"
    );

    let (model, surface) = run_session(&config)?;

    println!("{}", render_report(&model));

    let quantity = config.surface.quantity;
    if !args.no_table {
        for side in OptionSide::BOTH {
            println!("{}", render_surface_table(&surface, side, quantity));
        }
    }

    if let Some(dir) = &config.output.heatmap_dir {
        write_heatmaps(dir, &surface, quantity)?;
    }
    if let Some(dir) = &config.output.csv_dir {
        write_csvs(dir, &surface, quantity)?;
    }
    if config.output.heatmap_dir.is_none() && config.output.csv_dir.is_none() && args.no_table {
        warn!("no surface output requested");
    }

    Ok(())
}

fn output_path(dir: &Path, side: OptionSide, kind: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}_{}.{}", side.as_str(), kind, extension))
}

fn write_heatmaps(dir: &Path, surface: &SensitivitySurface, quantity: Quantity) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create heatmap directory {}", dir.display()))?;
    let options = HeatmapOptions::default();
    for side in OptionSide::BOTH {
        let path = output_path(dir, side, "heatmap", "svg");
        heatmap::write_svg(&path, surface, side, quantity, &options)?;
    }
    Ok(())
}

fn write_csvs(dir: &Path, surface: &SensitivitySurface, quantity: Quantity) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create CSV directory {}", dir.display()))?;
    for side in OptionSide::BOTH {
        let path = output_path(dir, side, "surface", "csv");
        export::write_csv_file(&path, surface, side, quantity)?;
    }
    Ok(())
}
