use crate::core::markup::{derive, format_money};
use crate::domain::model::PriceRow;
use std::borrow::Cow;

pub const HEADER: [&str; 4] = ["brand", "model", "type", "price"];
pub const UPDATED_PRICE_COLUMN: &str = "updated_price";

/// Quotes a value that contains a comma, a double quote or a newline.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn header_line(include_updated: bool) -> String {
    let mut columns = HEADER.to_vec();
    if include_updated {
        columns.push(UPDATED_PRICE_COLUMN);
    }
    columns.join(",")
}

fn row_line(row: &PriceRow, include_updated: bool, add_amount: f64) -> String {
    let mut values = vec![
        escape_field(&row.brand).into_owned(),
        escape_field(&row.model).into_owned(),
        escape_field(&row.r#type).into_owned(),
        format_money(row.price),
    ];
    if include_updated {
        values.push(format_money(derive(row.price, add_amount)));
    }
    values.join(",")
}

/// Renders rows as delimited text that `parse` accepts. Header and body are
/// joined by a single `\n`; there is no trailing newline.
pub fn serialize(rows: &[PriceRow], include_updated: bool, add_amount: f64) -> String {
    let body = rows
        .iter()
        .map(|row| row_line(row, include_updated, add_amount))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", header_line(include_updated), body)
}
