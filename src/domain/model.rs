use serde::{Deserialize, Serialize};
use std::fmt;

/// One price-list record. `price` is the base price; the marked-up price is
/// always computed from it and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub brand: String,
    pub model: String,
    pub r#type: String,
    pub price: f64,
}

impl PriceRow {
    /// Builds a row from raw cell text. Total over all inputs: text fields are
    /// trimmed and an unreadable price becomes 0.
    pub fn normalize(brand: &str, model: &str, r#type: &str, price: &str) -> Self {
        Self {
            brand: brand.trim().to_string(),
            model: model.trim().to_string(),
            r#type: r#type.trim().to_string(),
            price: parse_price(price),
        }
    }

    /// A row without brand and model is noise, not data.
    pub fn is_degenerate(&self) -> bool {
        self.brand.trim().is_empty() && self.model.trim().is_empty()
    }

    pub fn derived_price(&self, add_amount: f64) -> f64 {
        crate::core::markup::derive(self.price, add_amount)
    }

    pub fn key(&self) -> CartKey {
        CartKey::of(&self.brand, &self.model, &self.r#type)
    }
}

/// Keeps digits, `.` and `-`, then converts. Anything that does not come out
/// as a finite, non-negative number is 0, so `"12-34"` and `"N/A"` both give 0.
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Seed catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub brand: String,
    pub model: String,
    pub r#type: String,
    pub base_price: f64,
}

impl From<&Product> for PriceRow {
    fn from(product: &Product) -> Self {
        PriceRow {
            brand: product.brand.clone(),
            model: product.model.clone(),
            r#type: product.r#type.clone(),
            price: product.base_price,
        }
    }
}

/// Composite `brand|model|type` identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartKey(String);

impl CartKey {
    pub fn of(brand: &str, model: &str, r#type: &str) -> Self {
        CartKey(format!("{}|{}|{}", brand, model, r#type))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartKey {
    fn from(raw: &str) -> Self {
        CartKey(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub brand: String,
    pub model: String,
    pub r#type: String,
    /// Unit price at the time the item was added, markup included.
    pub price: f64,
    pub qty: u32,
}

impl CartItem {
    pub fn key(&self) -> CartKey {
        CartKey::of(&self.brand, &self.model, &self.r#type)
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

/// A rendered delimited-text document ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub name: String,
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Every parsed row, in source order.
    pub rows: Vec<PriceRow>,
    /// Filtered and sorted rows for display.
    pub view: Vec<PriceRow>,
    pub exports: Vec<ExportFile>,
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub rows_parsed: usize,
    pub view: Vec<PriceRow>,
    pub files_written: Vec<String>,
}
