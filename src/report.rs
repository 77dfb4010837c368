//! Plain-text rendering of valuations.
//!
//! Each option is shown as a price metric followed by five Greek badges:
//!
//! ```text
//! CALL  € 25.04
//!   Δ 0.692  Γ 0.00704  ν 35.2  θ -9.68  ρ 44.1
//! ```
//!
//! Prices use two decimals; Greeks use three significant digits in the
//! general (`g`) style, switching to exponent notation for very small or
//! very large magnitudes.

use crate::models::bs::{OptionSide, PricingModel};
use crate::models::utils::{Quantity, Valuation};
use crate::surface::grid::SensitivitySurface;

/// Currency symbol placed in front of prices.
pub const CURRENCY: &str = "€";

/// Significant digits shown on Greek badges.
pub const GREEK_DIGITS: usize = 3;

/// Formats `value` with `digits` significant digits.
///
/// Fixed notation is used when the decimal exponent lies in `-4..digits`,
/// exponent notation (`1.23e+03`) otherwise. Trailing zeros are dropped but
/// fixed notation keeps at least one fractional digit.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);

    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    let mut fixed = trim_fraction(&format!("{:.*}", decimals, value)).to_string();
    if !fixed.contains('.') {
        fixed.push_str(".0");
    }
    fixed
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// `€ 25.04`
pub fn format_price(price: f64) -> String {
    format!("{} {:.2}", CURRENCY, price)
}

/// Badge text for one Greek, e.g. `Δ 0.692`.
pub fn format_badge(quantity: Quantity, valuation: &Valuation) -> String {
    let symbol = quantity.symbol().unwrap_or("€");
    format!(
        "{} {}",
        symbol,
        format_significant(valuation.get(quantity), GREEK_DIGITS)
    )
}

/// Metric line plus badge line for one option.
pub fn render_option(side: OptionSide, valuation: &Valuation) -> String {
    let badges: Vec<String> = Quantity::ALL
        .iter()
        .filter(|q| q.symbol().is_some())
        .map(|&q| format_badge(q, valuation))
        .collect();
    format!(
        "{:<5} {}\n  {}\n",
        side.to_string(),
        format_price(valuation.price),
        badges.join("  ")
    )
}

/// Both options of a model, call first.
pub fn render_report(model: &PricingModel) -> String {
    let (call, put) = model.valuations();
    let mut out = render_option(OptionSide::Call, &call);
    out.push('\n');
    out.push_str(&render_option(OptionSide::Put, &put));
    out
}

/// Text grid of a surface quantity: one row per volatility (lowest first),
/// one column per spot price.
pub fn render_surface_table(
    surface: &SensitivitySurface,
    side: OptionSide,
    quantity: Quantity,
) -> String {
    let header: String = surface
        .spot_prices()
        .iter()
        .map(|spot| format!(" {:>9.2}", spot))
        .collect();
    let width = 10 + 10 * surface.spot_prices().len();

    let mut lines = vec![
        format!("{} {} (rows: volatility, columns: spot price)", side, quantity),
        format!("{:>8} |{}", "σ \\ S", header),
        "-".repeat(width),
    ];
    let values = surface.values(side, quantity);
    lines.extend(surface.volatilities().iter().zip(values.iter()).map(|(vol, row)| {
        let cells: String = row.iter().map(|value| format!(" {:>9.2}", value)).collect();
        format!("{:>8} |{}", format_significant(*vol, 2), cells)
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
