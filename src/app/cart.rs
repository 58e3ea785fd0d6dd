use crate::core::Storage;
use crate::domain::model::{CartItem, CartKey, PriceRow};
use crate::utils::error::{PriceListError, Result};
use serde::{Deserialize, Serialize};

pub const CART_DOCUMENT: &str = "cart.json";

/// Caller-owned cart. Mutations never persist on their own; `save` and
/// `load` are the only points where the cart touches storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `row` at `unit_price`, or bumps the quantity of an
    /// existing line with the same key. The first unit price sticks and the
    /// quantity saturates at `u32::MAX`.
    pub fn add(&mut self, row: &PriceRow, unit_price: f64) -> &CartItem {
        let key = row.key();
        let index = match self.items.iter().position(|item| item.key() == key) {
            Some(index) => {
                let item = &mut self.items[index];
                item.qty = item.qty.saturating_add(1);
                index
            }
            None => {
                self.items.push(CartItem {
                    brand: row.brand.clone(),
                    model: row.model.clone(),
                    r#type: row.r#type.clone(),
                    price: unit_price,
                    qty: 1,
                });
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    pub fn remove(&mut self, key: &CartKey) -> Option<CartItem> {
        let index = self.items.iter().position(|item| &item.key() == key)?;
        Some(self.items.remove(index))
    }

    /// A quantity of zero removes the line. Returns false for an unknown key.
    pub fn set_quantity(&mut self, key: &CartKey, qty: u32) -> bool {
        if qty == 0 {
            return self.remove(key).is_some();
        }
        match self.items.iter_mut().find(|item| &item.key() == key) {
            Some(item) => {
                item.qty = qty;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, key: &CartKey) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.key() == key)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn save<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let json = self.to_json()?;
        storage.write_file(path, json.as_bytes()).await?;
        tracing::debug!("Saved cart with {} lines to {}", self.items.len(), path);
        Ok(())
    }

    /// A missing document is an empty cart.
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        match storage.read_file(path).await {
            Ok(bytes) => {
                let cart: Cart = serde_json::from_slice(&bytes)?;
                tracing::debug!("Loaded cart with {} lines from {}", cart.items.len(), path);
                Ok(cart)
            }
            Err(PriceListError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No saved cart at {}, starting empty", path);
                Ok(Cart::new())
            }
            Err(e) => Err(e),
        }
    }
}
