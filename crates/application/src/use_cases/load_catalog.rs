//! Load catalog use case.

use std::sync::Arc;

use stockroom_domain::{Order, Product, Supplier};

use super::sections::{SectionFailure, contain};
use crate::ports::CatalogGateway;

/// Which parts of the catalog to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadCatalogInput {
    /// Fetch products.
    pub products: bool,
    /// Fetch suppliers.
    pub suppliers: bool,
    /// Fetch orders.
    pub orders: bool,
}

impl LoadCatalogInput {
    /// Everything.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            products: true,
            suppliers: true,
            orders: true,
        }
    }
}

/// Catalog data as loaded. A failed section is empty and listed in
/// `failures`.
#[derive(Debug, Clone, Default)]
pub struct LoadCatalogOutput {
    /// Products.
    pub products: Vec<Product>,
    /// Suppliers.
    pub suppliers: Vec<Supplier>,
    /// Orders.
    pub orders: Vec<Order>,
    /// Section name and error for every fetch that failed.
    pub failures: Vec<SectionFailure>,
}

/// Use case for loading catalog listings.
///
/// Each section handles its own failure: the error is logged and the
/// section stays empty. Session state is never affected.
pub struct LoadCatalog<C: CatalogGateway> {
    gateway: Arc<C>,
}

impl<C: CatalogGateway> LoadCatalog<C> {
    /// Creates a new `LoadCatalog` use case.
    pub const fn new(gateway: Arc<C>) -> Self {
        Self { gateway }
    }

    /// Fetches the requested sections concurrently.
    pub async fn execute(&self, input: LoadCatalogInput) -> LoadCatalogOutput {
        let (products, suppliers, orders) = tokio::join!(
            async {
                if input.products {
                    Some(self.gateway.list_products().await)
                } else {
                    None
                }
            },
            async {
                if input.suppliers {
                    Some(self.gateway.list_suppliers().await)
                } else {
                    None
                }
            },
            async {
                if input.orders {
                    Some(self.gateway.list_orders().await)
                } else {
                    None
                }
            },
        );

        let mut failures = Vec::new();
        let products = contain("products", products, &mut failures).unwrap_or_default();
        let suppliers = contain("suppliers", suppliers, &mut failures).unwrap_or_default();
        let orders = contain("orders", orders, &mut failures).unwrap_or_default();

        LoadCatalogOutput {
            products,
            suppliers,
            orders,
            failures,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::GatewayError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stockroom_domain::{OrderDraft, ProductDraft, SupplierDraft};

    /// Mock catalog for testing.
    #[derive(Default)]
    struct MockCatalog {
        fail_suppliers: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogGateway for MockCatalog {
        async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Product {
                id: 1,
                name: "Widget".into(),
                category: "Parts".into(),
                price: 2.5,
                stock_level: 12,
                reorder_point: 10,
                supplier_id: 3,
                supplier: None,
            }])
        }

        async fn list_suppliers(&self) -> Result<Vec<Supplier>, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_suppliers {
                return Err(GatewayError::Unreachable("connection refused".into()));
            }
            Ok(Vec::new())
        }

        async fn list_orders(&self) -> Result<Vec<Order>, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn create_product(&self, _: &ProductDraft) -> Result<Product, GatewayError> {
            unimplemented!()
        }

        async fn update_product(&self, _: i64, _: &ProductDraft) -> Result<Product, GatewayError> {
            unimplemented!()
        }

        async fn delete_product(&self, _: i64) -> Result<(), GatewayError> {
            unimplemented!()
        }

        async fn create_supplier(&self, _: &SupplierDraft) -> Result<Supplier, GatewayError> {
            unimplemented!()
        }

        async fn update_supplier(
            &self,
            _: i64,
            _: &SupplierDraft,
        ) -> Result<Supplier, GatewayError> {
            unimplemented!()
        }

        async fn delete_supplier(&self, _: i64) -> Result<(), GatewayError> {
            unimplemented!()
        }

        async fn create_order(&self, _: &OrderDraft) -> Result<Order, GatewayError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_load_all_sections() {
        let gateway = Arc::new(MockCatalog::default());
        let output = LoadCatalog::new(gateway.clone())
            .execute(LoadCatalogInput::all())
            .await;

        assert_eq!(output.products.len(), 1);
        assert!(output.failures.is_empty());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failed_section_is_empty_and_reported() {
        let gateway = Arc::new(MockCatalog {
            fail_suppliers: true,
            ..MockCatalog::default()
        });
        let output = LoadCatalog::new(gateway)
            .execute(LoadCatalogInput::all())
            .await;

        assert_eq!(output.products.len(), 1);
        assert!(output.suppliers.is_empty());
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].0, "suppliers");
    }

    #[tokio::test]
    async fn test_skipped_sections_are_not_fetched() {
        let gateway = Arc::new(MockCatalog::default());
        let input = LoadCatalogInput {
            products: false,
            suppliers: false,
            orders: true,
        };
        let output = LoadCatalog::new(gateway.clone()).execute(input).await;

        assert!(output.products.is_empty());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }
}
