
use bs_pricer::surface::{export, heatmap};
use bs_pricer::{
    default_configs, run_session, sweep_surface, HeatmapOptions, OptionSide, PricingModel,
    Quantity, SensitivitySurface,
};
use test_utils::{
    create_test_session_config, create_test_surface_config, default_session_inputs, scratch_dir,
};

/// The parallel sweep must produce exactly what valuing each cell on its own does.
#[test]
fn test_parallel_sweep_matches_sequential_valuation() {
    let inputs = default_session_inputs();
    let surface = sweep_surface(&default_configs::standard(), &inputs).unwrap();
    let (columns, rows) = surface.dimensions();
    assert_eq!((columns, rows), (11, 11));

    for (row, &vol) in surface.volatilities().iter().enumerate() {
        for (col, &spot) in surface.spot_prices().iter().enumerate() {
            let model = PricingModel::new(
                spot,
                inputs.strike_price,
                inputs.days_to_maturity,
                vol,
                inputs.risk_free_interest_rate,
            )
            .unwrap();
            let (call, put) = model.valuations();
            let cell = surface.cell(row, col).unwrap();
            assert_eq!(cell.call, call, "cell ({}, {})", row, col);
            assert_eq!(cell.put, put, "cell ({}, {})", row, col);
        }
    }
}

#[test]
fn test_axes_follow_config() {
    let config = default_configs::standard();
    let surface = sweep_surface(&config, &default_session_inputs()).unwrap();

    let spots = surface.spot_prices();
    assert_eq!(spots.first(), Some(&90.0));
    assert_eq!(spots.last(), Some(&110.0));
    assert!((spots[1] - 92.0).abs() < 1e-12);

    let vols = surface.volatilities();
    assert_eq!(vols.first(), Some(&0.3));
    assert_eq!(vols.last(), Some(&0.7));

    assert_eq!(surface.strike_price(), 95.0);
    assert_eq!(surface.days_to_maturity(), 30.0);
}

#[test]
fn test_surface_prices_are_monotone() {
    let surface = sweep_surface(&default_configs::standard(), &default_session_inputs()).unwrap();
    let calls = surface.values(OptionSide::Call, Quantity::Price);
    let puts = surface.values(OptionSide::Put, Quantity::Price);

    for row in &calls {
        assert!(row.windows(2).all(|w| w[0] < w[1]));
    }
    for row in &puts {
        assert!(row.windows(2).all(|w| w[0] > w[1]));
    }
    // Down each column, price rises with volatility
    for col in 0..calls[0].len() {
        assert!(calls.windows(2).all(|w| w[0][col] < w[1][col]));
        assert!(puts.windows(2).all(|w| w[0][col] < w[1][col]));
    }
}

#[test]
fn test_surface_greeks_are_shared_between_sides() {
    let surface = sweep_surface(&create_test_surface_config(), &default_session_inputs()).unwrap();
    for quantity in [Quantity::Gamma, Quantity::Vega] {
        assert_eq!(
            surface.values(OptionSide::Call, quantity),
            surface.values(OptionSide::Put, quantity)
        );
    }
}

#[test]
fn test_invalid_surface_configs_are_rejected() {
    let inputs = default_session_inputs();

    let mut zero_vol = default_configs::standard();
    zero_vol.min_volatility = 0.0;
    assert!(sweep_surface(&zero_vol, &inputs).is_err());

    let mut inverted = default_configs::standard();
    inverted.min_spot_price = 120.0;
    assert!(sweep_surface(&inverted, &inputs).is_err());

    let mut too_volatile = default_configs::standard();
    too_volatile.max_volatility = 1.5;
    assert!(sweep_surface(&too_volatile, &inputs).is_err());

    let mut single_point = default_configs::standard();
    single_point.grid_size = 1;
    assert!(sweep_surface(&single_point, &inputs).is_err());
}

#[test]
fn test_build_propagates_pricing_errors() {
    let err = SensitivitySurface::build(&[90.0, 100.0], &[0.3, 0.5], 95.0, 0.0, 0.01).unwrap_err();
    assert_eq!(err.input_name(), "days_to_maturity");
}

#[test]
fn test_run_session() {
    let config = create_test_session_config();
    let (model, surface) = run_session(&config).unwrap();

    assert_eq!(model.inputs().risk_free_interest_rate, 0.01);
    assert_eq!(surface.dimensions(), (5, 5));
    assert_eq!(surface.strike_price(), model.inputs().strike_price);
}

#[test]
fn test_csv_export() {
    let surface = sweep_surface(&create_test_surface_config(), &default_session_inputs()).unwrap();
    let mut buffer = Vec::new();
    export::write_csv(&mut buffer, &surface, OptionSide::Put, Quantity::Delta).unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 6);
    assert_eq!(&headers[0], "volatility");
    assert_eq!(headers[1].parse::<f64>().unwrap(), 90.0);

    let deltas = surface.values(OptionSide::Put, Quantity::Delta);
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 5);
    for (record, row) in records.iter().zip(&deltas) {
        for (field, &expected) in record.iter().skip(1).zip(row) {
            assert_eq!(field.parse::<f64>().unwrap(), expected);
        }
    }
}

#[test]
fn test_files_are_written() {
    let dir = scratch_dir("surface-files");
    let surface = sweep_surface(&create_test_surface_config(), &default_session_inputs()).unwrap();

    let svg_path = dir.join("call_heatmap.svg");
    heatmap::write_svg(
        &svg_path,
        &surface,
        OptionSide::Call,
        Quantity::Theta,
        &HeatmapOptions::default(),
    )
    .unwrap();
    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("CALL theta"));

    let csv_path = dir.join("put_surface.csv");
    export::write_csv_file(&csv_path, &surface, OptionSide::Put, Quantity::Price).unwrap();
    let contents = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(contents.lines().count(), 6);

    let _ = std::fs::remove_dir_all(&dir);
}
