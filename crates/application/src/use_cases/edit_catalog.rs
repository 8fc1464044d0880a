//! Edit catalog use case.

use std::sync::Arc;

use stockroom_domain::{AppRoute, Order, OrderDraft, Product, ProductDraft, Supplier, SupplierDraft};
use tracing::{info, warn};

use crate::ports::{CatalogGateway, GatewayError};

/// A single change to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEdit {
    /// Add a product.
    CreateProduct(ProductDraft),
    /// Replace a product's fields.
    UpdateProduct {
        /// Product to change.
        id: i64,
        /// New fields.
        draft: ProductDraft,
    },
    /// Remove a product.
    DeleteProduct(i64),
    /// Add a supplier.
    CreateSupplier(SupplierDraft),
    /// Replace a supplier's fields.
    UpdateSupplier {
        /// Supplier to change.
        id: i64,
        /// New fields.
        draft: SupplierDraft,
    },
    /// Remove a supplier.
    DeleteSupplier(i64),
    /// Place a purchase order.
    CreateOrder(OrderDraft),
}

impl CatalogEdit {
    /// Catalog section the change touches.
    #[must_use]
    pub const fn section(&self) -> &'static str {
        match self {
            Self::CreateProduct(_) | Self::UpdateProduct { .. } | Self::DeleteProduct(_) => {
                "products"
            }
            Self::CreateSupplier(_) | Self::UpdateSupplier { .. } | Self::DeleteSupplier(_) => {
                "suppliers"
            }
            Self::CreateOrder(_) => "orders",
        }
    }

    /// Screen the change is made from.
    #[must_use]
    pub const fn route(&self) -> AppRoute {
        match self {
            Self::CreateProduct(_) | Self::UpdateProduct { .. } | Self::DeleteProduct(_) => {
                AppRoute::Products
            }
            Self::CreateSupplier(_) | Self::UpdateSupplier { .. } | Self::DeleteSupplier(_) => {
                AppRoute::Suppliers
            }
            Self::CreateOrder(_) => AppRoute::Orders,
        }
    }
}

/// A record as returned by the backend after a write.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRecord {
    /// A saved product.
    Product(Product),
    /// A saved supplier.
    Supplier(Supplier),
    /// A placed order.
    Order(Order),
}

/// Outcome of a catalog change.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCatalogOutcome {
    /// The record was created or updated.
    Saved(CatalogRecord),
    /// The record was removed.
    Deleted {
        /// Section it was removed from.
        section: &'static str,
        /// Removed identifier.
        id: i64,
    },
    /// The backend refused the change or could not be reached.
    Failed(GatewayError),
}

impl EditCatalogOutcome {
    /// Converts to a `Result`, for callers that want to stop on failure.
    ///
    /// # Errors
    ///
    /// Returns the contained error for `Failed`.
    pub fn into_result(self) -> Result<Option<CatalogRecord>, GatewayError> {
        match self {
            Self::Saved(record) => Ok(Some(record)),
            Self::Deleted { .. } => Ok(None),
            Self::Failed(error) => Err(error),
        }
    }
}

/// Use case for creating, updating and deleting catalog records.
///
/// Failures are logged and returned as `EditCatalogOutcome::Failed`; they
/// never affect the session.
pub struct EditCatalog<C: CatalogGateway> {
    gateway: Arc<C>,
}

impl<C: CatalogGateway> EditCatalog<C> {
    /// Creates a new `EditCatalog` use case.
    pub const fn new(gateway: Arc<C>) -> Self {
        Self { gateway }
    }

    /// Applies one change.
    pub async fn execute(&self, edit: CatalogEdit) -> EditCatalogOutcome {
        let section = edit.section();
        let gateway = &self.gateway;
        let outcome = match edit {
            CatalogEdit::CreateProduct(draft) => {
                saved(gateway.create_product(&draft).await.map(CatalogRecord::Product))
            }
            CatalogEdit::UpdateProduct { id, draft } => {
                saved(gateway.update_product(id, &draft).await.map(CatalogRecord::Product))
            }
            CatalogEdit::DeleteProduct(id) => {
                deleted(section, id, gateway.delete_product(id).await)
            }
            CatalogEdit::CreateSupplier(draft) => {
                saved(gateway.create_supplier(&draft).await.map(CatalogRecord::Supplier))
            }
            CatalogEdit::UpdateSupplier { id, draft } => {
                saved(gateway.update_supplier(id, &draft).await.map(CatalogRecord::Supplier))
            }
            CatalogEdit::DeleteSupplier(id) => {
                deleted(section, id, gateway.delete_supplier(id).await)
            }
            CatalogEdit::CreateOrder(draft) => {
                saved(gateway.create_order(&draft).await.map(CatalogRecord::Order))
            }
        };

        match &outcome {
            EditCatalogOutcome::Failed(error) => warn!(section, %error, "catalog change failed"),
            _ => info!(section, "catalog change applied"),
        }
        outcome
    }
}

fn saved(result: Result<CatalogRecord, GatewayError>) -> EditCatalogOutcome {
    result.map_or_else(EditCatalogOutcome::Failed, EditCatalogOutcome::Saved)
}

fn deleted(section: &'static str, id: i64, result: Result<(), GatewayError>) -> EditCatalogOutcome {
    match result {
        Ok(()) => EditCatalogOutcome::Deleted { section, id },
        Err(error) => EditCatalogOutcome::Failed(error),
    }
}
