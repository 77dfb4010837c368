
use bs_pricer::{
    norm_cdf, norm_pdf, value_options, MarketInputs, OptionSide, OptionValuation, PricingError,
    PricingModel, Quantity,
};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use test_utils::{assert_close, assert_rel_close, input_grid, reference_inputs, reference_model};

/// Reference scenario: S=100, K=90, 365 days, σ=0.5, r=2%
///
/// Checks every price and Greek against independently computed values.
#[test]
fn test_reference_scenario() {
    let model = reference_model();
    let call = model.call();
    let put = model.put();

    println!("call: {:?}", model.valuation(OptionSide::Call));
    println!("put:  {:?}", model.valuation(OptionSide::Put));

    assert_close("call price", call.price(), 25.04, 0.005);
    assert_close("call delta", call.delta(), 0.692, 0.0005);
    assert_close("call gamma", call.gamma(), 0.00704, 5e-6);
    assert_close("call vega", call.vega(), 35.2, 0.05);
    assert_close("call theta", call.theta(), -9.68, 0.005);
    assert_close("call rho", call.rho(), 44.1, 0.05);

    assert_close("put price", put.price(), 13.26, 0.005);
    assert_close("put delta", put.delta(), -0.308, 0.0005);
    assert_close("put theta", put.theta(), -9.68, 0.005);
    assert_close("put rho", put.rho(), -44.1, 0.05);
}

#[test]
fn test_valuation_is_deterministic() {
    let first = PricingModel::from_inputs(reference_inputs()).unwrap();
    let second = PricingModel::from_inputs(reference_inputs()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.valuations(), second.valuations());
    assert_eq!(first.call().price(), first.call().price());
}

#[test]
fn test_value_options_matches_model() {
    let (call, put) = value_options(reference_inputs()).unwrap();
    let model = reference_model();

    assert_eq!(call, model.valuation(OptionSide::Call));
    assert_eq!(put, model.valuation(OptionSide::Put));
    for quantity in Quantity::ALL {
        assert_eq!(
            call.get(quantity),
            model.option(OptionSide::Call).valuation().get(quantity)
        );
    }
}

#[test]
fn test_gamma_and_vega_are_shared() {
    for inputs in input_grid() {
        let model = PricingModel::from_inputs(inputs).unwrap();
        assert_eq!(model.call().gamma(), model.put().gamma(), "{:?}", inputs);
        assert_eq!(model.call().vega(), model.put().vega(), "{:?}", inputs);
        assert!(model.call().gamma() >= 0.0);
        assert!(model.call().vega() >= 0.0);
    }
}

/// C − P = S − K·e^(−rT) to within 1e-9 relative
#[test]
fn test_put_call_parity() {
    for inputs in input_grid() {
        let model = PricingModel::from_inputs(inputs).unwrap();
        let lhs = model.call().price() - model.put().price();
        let rhs = inputs.spot_price
            - inputs.strike_price * model.state().continuous_discounting_factor();
        assert_rel_close(&format!("parity {:?}", inputs), lhs, rhs, 1e-9);
    }
}

#[test]
fn test_delta_bounds_and_spread() {
    for inputs in input_grid() {
        let model = PricingModel::from_inputs(inputs).unwrap();
        let call_delta = model.call().delta();
        let put_delta = model.put().delta();

        assert!((0.0..=1.0).contains(&call_delta), "{:?}", inputs);
        assert!((-1.0..=0.0).contains(&put_delta), "{:?}", inputs);
        assert_close("delta spread", call_delta - put_delta, 1.0, 1e-12);
    }
}

#[test]
fn test_prices_are_finite_and_non_negative() {
    for inputs in input_grid() {
        let model = PricingModel::from_inputs(inputs).unwrap();
        for side in OptionSide::BOTH {
            let valuation = model.valuation(side);
            for quantity in Quantity::ALL {
                assert!(valuation.get(quantity).is_finite(), "{} {} {:?}", side, quantity, inputs);
            }
            // Allow rounding noise on deep out-of-the-money options
            assert!(valuation.price >= -1e-9, "{} {:?}", side, inputs);
        }
    }
}

/// Central differences of the price agree with the closed-form Greeks.
#[test]
fn test_greeks_match_finite_differences() {
    let scenarios = [
        MarketInputs::new(100.0, 90.0, 365.0, 0.5, 0.02),
        MarketInputs::new(100.0, 95.0, 30.0, 0.5, 0.01),
        MarketInputs::new(80.0, 100.0, 180.0, 0.25, 0.05),
        MarketInputs::new(120.0, 100.0, 730.0, 0.8, 0.0),
    ];

    let price = |inputs: MarketInputs, side: OptionSide| {
        PricingModel::from_inputs(inputs)
            .unwrap()
            .option(side)
            .price()
    };

    for inputs in scenarios {
        let model = PricingModel::from_inputs(inputs).unwrap();
        for side in OptionSide::BOTH {
            let option = model.option(side);
            let label = format!("{} {:?}", side, inputs);

            let h = inputs.spot_price * 1e-4;
            let up = MarketInputs { spot_price: inputs.spot_price + h, ..inputs };
            let down = MarketInputs { spot_price: inputs.spot_price - h, ..inputs };
            let (p_up, p_mid, p_down) = (price(up, side), option.price(), price(down, side));
            assert_rel_close(&label, option.delta(), (p_up - p_down) / (2.0 * h), 1e-5);
            assert_rel_close(&label, option.gamma(), (p_up - 2.0 * p_mid + p_down) / (h * h), 1e-3);

            let h = 1e-5;
            let up = MarketInputs { volatility: inputs.volatility + h, ..inputs };
            let down = MarketInputs { volatility: inputs.volatility - h, ..inputs };
            let vega_fd = (price(up, side) - price(down, side)) / (2.0 * h);
            assert_rel_close(&label, option.vega(), vega_fd, 1e-5);

            let up = MarketInputs { risk_free_interest_rate: inputs.risk_free_interest_rate + h, ..inputs };
            let down = MarketInputs { risk_free_interest_rate: inputs.risk_free_interest_rate - h, ..inputs };
            let rho_fd = (price(up, side) - price(down, side)) / (2.0 * h);
            assert_rel_close(&label, option.rho(), rho_fd, 1e-5);
        }
    }
}

#[test]
fn test_prices_monotone_in_spot_and_volatility() {
    let spots = [60.0, 80.0, 95.0, 100.0, 105.0, 120.0, 150.0];
    let call_prices: Vec<f64> = spots
        .iter()
        .map(|&s| PricingModel::new(s, 100.0, 90.0, 0.4, 0.03).unwrap().call().price())
        .collect();
    let put_prices: Vec<f64> = spots
        .iter()
        .map(|&s| PricingModel::new(s, 100.0, 90.0, 0.4, 0.03).unwrap().put().price())
        .collect();

    assert!(call_prices.windows(2).all(|w| w[0] < w[1]), "{:?}", call_prices);
    assert!(put_prices.windows(2).all(|w| w[0] > w[1]), "{:?}", put_prices);

    let vols = [0.1, 0.2, 0.4, 0.8];
    for side in OptionSide::BOTH {
        let prices: Vec<f64> = vols
            .iter()
            .map(|&v| PricingModel::new(100.0, 100.0, 90.0, v, 0.03).unwrap().option(side).price())
            .collect();
        assert!(prices.windows(2).all(|w| w[0] < w[1]), "{} {:?}", side, prices);
    }
}

/// Doubling volatility raises both prices (and so the straddle) while the
/// call/put spread stays pinned to S − K·e^(−rT).
#[test]
fn test_doubling_volatility() {
    let base = reference_model();
    let doubled = PricingModel::new(100.0, 90.0, 365.0, 1.0, 0.02).unwrap();

    assert!(doubled.call().price() > base.call().price());
    assert!(doubled.put().price() > base.put().price());

    let straddle = |m: &PricingModel| m.call().price() + m.put().price();
    assert!(straddle(&doubled) > straddle(&base));

    let spread = |m: &PricingModel| m.call().price() - m.put().price();
    assert_close("spread", spread(&doubled), spread(&base), 1e-9);
}

#[test]
fn test_boundary_inputs_are_rejected() {
    let cases = [
        (MarketInputs::new(0.0, 90.0, 365.0, 0.5, 0.02), "spot_price"),
        (MarketInputs::new(100.0, -5.0, 365.0, 0.5, 0.02), "strike_price"),
        (MarketInputs::new(100.0, 90.0, 0.0, 0.5, 0.02), "days_to_maturity"),
        (MarketInputs::new(100.0, 90.0, 365.0, 0.0, 0.02), "volatility"),
        (MarketInputs::new(100.0, 90.0, 365.0, 0.5, f64::INFINITY), "risk_free_interest_rate"),
    ];

    for (inputs, name) in cases {
        let err = PricingModel::from_inputs(inputs).unwrap_err();
        assert_eq!(err.input_name(), name);
        assert!(matches!(err, PricingError::InvalidInput { .. }));
        assert!(err.to_string().starts_with(&format!("invalid input: {}", name)));
    }
}

#[test]
fn test_tiny_but_valid_inputs() {
    // One second to expiry with a deep in-the-money call
    let model = PricingModel::new(150.0, 100.0, 1.0 / 86_400.0, 0.2, 0.01).unwrap();
    assert_close("intrinsic", model.call().price(), 50.0, 1e-3);
    assert_close("delta", model.call().delta(), 1.0, 1e-12);
    assert_close("put", model.put().price(), 0.0, 1e-9);
}

#[test]
fn test_normal_distribution_matches_statrs() {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut x = -8.0;
    while x <= 8.0 {
        assert_close(&format!("cdf({})", x), norm_cdf(x), normal.cdf(x), 1e-14);
        assert_close(&format!("pdf({})", x), norm_pdf(x), normal.pdf(x), 1e-14);
        x += 0.25;
    }
}
