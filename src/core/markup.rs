pub const DEFAULT_ADD_AMOUNT: f64 = 30.0;

/// Customer-facing price for a base price. Never rounds; rounding happens
/// only when a value is rendered.
pub fn derive(price: f64, add_amount: f64) -> f64 {
    price + add_amount
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Markup {
    pub add_amount: f64,
}

impl Markup {
    pub fn new(add_amount: f64) -> Self {
        Self { add_amount }
    }

    pub fn apply(&self, price: f64) -> f64 {
        derive(price, self.add_amount)
    }
}

impl Default for Markup {
    fn default() -> Self {
        Self::new(DEFAULT_ADD_AMOUNT)
    }
}

/// Beyond this magnitude an `f64` carries no cents.
const WHOLE_UNITS_ONLY: f64 = 1e15;

/// Two decimal places, half away from zero. The epsilon nudges values such as
/// `1.005` that sit just under the boundary in binary.
pub fn round_money(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= WHOLE_UNITS_ONLY {
        return value;
    }
    let nudged = value + f64::EPSILON.copysign(value);
    (nudged * 100.0).round() / 100.0
}

/// `110` stays `110`, `110.5` stays `110.5`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = round_money(value);
    if !rounded.is_finite() {
        return "0".to_string();
    }
    if rounded == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Whole-rand display used on order lines and the price table.
pub fn format_rand(value: f64) -> String {
    let whole = value.round();
    if whole == 0.0 {
        return "R0".to_string();
    }
    format!("R{:.0}", whole)
}
