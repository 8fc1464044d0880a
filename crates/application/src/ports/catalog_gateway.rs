//! Catalog, analytics and report ports

use async_trait::async_trait;
use stockroom_domain::{
    AbcEntry, DashboardStats, Forecast, Order, OrderDraft, Product, ProductDraft, ReportRequest,
    SimulatedOrder, Supplier, SupplierDraft,
};

use super::GatewayError;

/// Access to the inventory catalog.
///
/// All methods return a `GatewayError` if the backend rejects the call or
/// cannot be reached.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Lists all products.
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError>;

    /// Lists all suppliers.
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, GatewayError>;

    /// Lists all purchase orders with their product and supplier joined.
    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError>;

    /// Adds a product.
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, GatewayError>;

    /// Replaces a product's fields.
    async fn update_product(
        &self,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<Product, GatewayError>;

    /// Removes a product.
    async fn delete_product(&self, id: i64) -> Result<(), GatewayError>;

    /// Adds a supplier.
    async fn create_supplier(&self, draft: &SupplierDraft) -> Result<Supplier, GatewayError>;

    /// Replaces a supplier's fields.
    async fn update_supplier(
        &self,
        id: i64,
        draft: &SupplierDraft,
    ) -> Result<Supplier, GatewayError>;

    /// Removes a supplier.
    async fn delete_supplier(&self, id: i64) -> Result<(), GatewayError>;

    /// Places a purchase order.
    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, GatewayError>;
}

/// Backend-computed analytics.
#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    /// Headline dashboard figures.
    async fn dashboard_stats(&self) -> Result<DashboardStats, GatewayError>;

    /// Products ranked and classified by stock value.
    async fn abc_analysis(&self) -> Result<Vec<AbcEntry>, GatewayError>;

    /// Demand forecast for one product.
    async fn forecast(&self, product_id: i64) -> Result<Forecast, GatewayError>;

    /// Asks the backend to place a random order.
    async fn simulate_order(&self) -> Result<SimulatedOrder, GatewayError>;
}

/// Access to server-rendered reports.
#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// Downloads the rendered report body.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` if the download fails.
    async fn fetch_report(&self, request: &ReportRequest) -> Result<Vec<u8>, GatewayError>;
}
