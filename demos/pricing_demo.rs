// demos/pricing_demo.rs

//! Demonstration of Black-Scholes pricing and Greeks
//!
//! This example shows how to:
//! 1. Build a pricing model from the five market inputs
//! 2. Read prices and Greeks for the call and the put
//! 3. Check put-call parity on the results
//! 4. See how the valuations move when volatility doubles

use anyhow::Result;
use bs_pricer::report::render_report;
use bs_pricer::{OptionValuation, PricingModel, Quantity};

fn main() -> Result<()> {
    println!("Black-Scholes Pricing Demo");
    println!("==========================");

    let spot = 100.0;
    let strike = 90.0;
    let days = 365.0;
    let volatility = 0.5;
    let rate = 0.02;

    println!("Spot price:        {:.2}", spot);
    println!("Strike price:      {:.2}", strike);
    println!("Days to maturity:  {:.0}", days);
    println!("Volatility:        {:.0}%", volatility * 100.0);
    println!("Risk-free rate:    {:.1}%", rate * 100.0);

    println!("\nStep 1: Valuing both options...");
    let model = PricingModel::new(spot, strike, days, volatility, rate)?;

    let state = model.state();
    println!("  d1 = {:.6}", state.d1());
    println!("  d2 = {:.6}", state.d2());
    println!("  e^(-rT) = {:.6}", state.continuous_discounting_factor());

    println!("\n{}", render_report(&model));

    println!("Step 2: Greeks side by side");
    let (call, put) = model.valuations();
    println!("{:<8} {:>12} {:>12}", "Greek", "Call", "Put");
    println!("{}", "-".repeat(34));
    for quantity in Quantity::ALL {
        println!(
            "{:<8} {:>12.6} {:>12.6}",
            quantity.name(),
            call.get(quantity),
            put.get(quantity)
        );
    }

    println!("\nStep 3: Put-call parity");
    let lhs = model.call().price() - model.put().price();
    let rhs = spot - strike * state.continuous_discounting_factor();
    println!("  C - P          = {:.10}", lhs);
    println!("  S - K e^(-rT)  = {:.10}", rhs);
    println!("  difference     = {:.2e}", (lhs - rhs).abs());

    println!("\nStep 4: Doubling volatility");
    let doubled = PricingModel::new(spot, strike, days, volatility * 2.0, rate)?;
    println!(
        "  call {:.4} -> {:.4}",
        model.call().price(),
        doubled.call().price()
    );
    println!(
        "  put  {:.4} -> {:.4}",
        model.put().price(),
        doubled.put().price()
    );
    println!(
        "  vega {:.4} -> {:.4}",
        model.call().vega(),
        doubled.call().vega()
    );

    println!("\nStep 5: Invalid inputs are rejected");
    match PricingModel::new(spot, strike, 0.0, volatility, rate) {
        Ok(_) => println!("  unexpected: zero maturity accepted"),
        Err(e) => println!("  {}", e),
    }

    println!("\nDemo completed successfully!");
    Ok(())
}
