use crate::app::cart::Cart;
use crate::app::notify::Notification;
use crate::core::markup::format_rand;
use crate::utils::error::{PriceListError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub brand: String,
    pub model: String,
    pub r#type: String,
    pub qty: u32,
    pub unit_price: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.qty)
    }

    /// `Samsung - A04 (ORG) x2 @ R140 = R280`
    pub fn render(&self) -> String {
        format!(
            "{} - {} ({}) x{} @ {} = {}",
            self.brand,
            self.model,
            self.r#type,
            self.qty,
            format_rand(self.unit_price),
            format_rand(self.line_total())
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub customer: Customer,
    pub items: Vec<OrderLine>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub fn new(customer: Customer, items: Vec<OrderLine>) -> Self {
        Self {
            customer,
            items,
            placed_at: Utc::now(),
        }
    }

    pub fn from_cart(customer: Customer, cart: &Cart) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                brand: item.brand.clone(),
                model: item.model.clone(),
                r#type: item.r#type.clone(),
                qty: item.qty,
                unit_price: item.price,
            })
            .collect();
        Self::new(customer, items)
    }

    pub fn validate(&self) -> Result<()> {
        if self.customer.name.trim().is_empty() || self.items.is_empty() {
            return Err(PriceListError::ValidationError {
                message: "Invalid order".to_string(),
            });
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderLine::line_total).sum()
    }

    pub fn render_lines(&self) -> String {
        self.items
            .iter()
            .map(OrderLine::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn subject(&self) -> String {
        format!("New Order - {}", self.customer.name.trim())
    }

    pub fn render_html(&self) -> String {
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(escape_html)
                .unwrap_or_else(|| "-".to_string())
        };

        format!(
            concat!(
                "<div style=\"font-family: Arial, sans-serif\">\n",
                "<h2>New Website Order</h2>\n",
                "<p><strong>Customer:</strong> {}</p>\n",
                "<p><strong>Phone:</strong> {}</p>\n",
                "<p><strong>Email:</strong> {}</p>\n",
                "<pre style=\"background:#f6f6f6;padding:12px;border-radius:6px\">{}</pre>\n",
                "<p><strong>Total:</strong> {}</p>\n",
                "</div>"
            ),
            escape_html(self.customer.name.trim()),
            optional(&self.customer.phone),
            optional(&self.customer.email),
            escape_html(&self.render_lines()),
            format_rand(self.total())
        )
    }

    /// Validates, then renders the order for the notification sink.
    pub fn to_notification(&self, from: &str, to: &str) -> Result<Notification> {
        self.validate()?;
        Ok(Notification {
            from: from.to_string(),
            to: to.to_string(),
            subject: self.subject(),
            html: self.render_html(),
            data: serde_json::to_value(self)?,
        })
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
