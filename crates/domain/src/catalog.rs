//! Catalog records served by the inventory backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A supplier directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    /// Backend identifier.
    pub id: i64,
    /// Company name.
    pub name: String,
    /// Contact person.
    #[serde(default)]
    pub contact_name: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Delivery reliability between 0 and 1.
    #[serde(default = "default_reliability")]
    pub reliability_score: Option<f64>,
}

#[allow(clippy::unnecessary_wraps)]
const fn default_reliability() -> Option<f64> {
    Some(1.0)
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Unit price.
    pub price: f64,
    /// Units on hand.
    pub stock_level: i64,
    /// Stock level at which a reorder is due.
    pub reorder_point: i64,
    /// Owning supplier.
    pub supplier_id: i64,
    /// Embedded supplier, when the backend joins it.
    #[serde(default)]
    pub supplier: Option<Supplier>,
}

impl Product {
    /// True when stock has fallen to the reorder point.
    #[must_use]
    pub const fn needs_reorder(&self) -> bool {
        self.stock_level <= self.reorder_point
    }
}

/// A purchase order, optionally with its product and supplier joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Backend identifier.
    pub id: i64,
    /// Ordered product.
    pub product_id: i64,
    /// Supplier the order was placed with.
    pub supplier_id: i64,
    /// Units ordered.
    pub quantity: i64,
    /// Free-form status such as `Pending` or `Received`.
    #[serde(default = "default_status")]
    pub status: String,
    /// Timestamp as sent by the backend.
    pub order_date: String,
    /// Joined product.
    #[serde(default)]
    pub product: Option<Product>,
    /// Joined supplier.
    #[serde(default)]
    pub supplier: Option<Supplier>,
}

fn default_status() -> String {
    "Pending".to_string()
}

impl Order {
    /// Calendar day the order was placed, if the timestamp parses.
    #[must_use]
    pub fn placed_on(&self) -> Option<NaiveDate> {
        let day = self.order_date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// Fields sent when creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Unit price.
    pub price: f64,
    /// Units on hand.
    pub stock_level: i64,
    /// Stock level at which a reorder is due.
    pub reorder_point: i64,
    /// Owning supplier.
    pub supplier_id: i64,
}

/// Fields sent when creating or replacing a supplier. Unset optional
/// fields are left out so the backend applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierDraft {
    /// Company name.
    pub name: String,
    /// Contact person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Delivery reliability between 0 and 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reliability_score: Option<f64>,
}

/// Fields sent when placing a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Product to order.
    pub product_id: i64,
    /// Supplier to order from.
    pub supplier_id: i64,
    /// Units to order.
    pub quantity: i64,
    /// Initial status.
    #[serde(default = "default_status")]
    pub status: String,
}

impl OrderDraft {
    /// A pending order.
    #[must_use]
    pub fn new(product_id: i64, supplier_id: i64, quantity: i64) -> Self {
        Self {
            product_id,
            supplier_id,
            quantity,
            status: default_status(),
        }
    }
}
