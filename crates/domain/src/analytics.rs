//! Analytics results computed by the backend.
//!
//! The client only displays these; every figure is produced server-side.

use serde::{Deserialize, Serialize};

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sum of quantity times unit price over all orders.
    pub total_revenue: i64,
    /// Number of catalog products.
    pub total_products: i64,
    /// Products at or below their reorder point.
    pub low_stock_alerts: i64,
    /// Number of suppliers.
    pub active_suppliers: i64,
}

/// ABC inventory class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbcClass {
    /// Items making up the first 80% of stock value.
    A,
    /// The next 15%.
    B,
    /// The remainder.
    C,
}

/// One product in the ABC classification, ordered by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcEntry {
    /// Product identifier.
    pub product_id: i64,
    /// Product name.
    pub name: String,
    /// Stock value used for ranking.
    pub value: f64,
    /// Assigned class.
    pub category: AbcClass,
}

/// Demand forecast for one product.
///
/// The backend answers with `200 OK` either way; a product with too little
/// order history comes back as `Unavailable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Forecast {
    /// Projected daily demand.
    Projected {
        /// Days, as `YYYY-MM-DD`.
        dates: Vec<String>,
        /// Projected quantity per day.
        forecast: Vec<f64>,
    },
    /// No projection could be made.
    Unavailable {
        /// Reason given by the backend.
        error: String,
    },
}

impl Forecast {
    /// Day/quantity pairs; empty when unavailable.
    #[must_use]
    pub fn points(&self) -> Vec<(&str, f64)> {
        match self {
            Self::Projected { dates, forecast } => dates
                .iter()
                .map(String::as_str)
                .zip(forecast.iter().copied())
                .collect(),
            Self::Unavailable { .. } => Vec::new(),
        }
    }
}

/// Result of asking the backend to generate a random order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedOrder {
    /// Human-readable outcome.
    pub message: String,
    /// Created order, absent when there was nothing to order.
    #[serde(default)]
    pub order_id: Option<i64>,
    /// Name of the ordered product.
    #[serde(default)]
    pub product: Option<String>,
    /// Units ordered.
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl SimulatedOrder {
    /// True if an order was actually created.
    #[must_use]
    pub const fn created(&self) -> bool {
        self.order_id.is_some()
    }
}
