//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod auth_gateway;
mod catalog_gateway;
mod credential_provider;
mod token_storage;

pub use auth_gateway::{AuthGateway, GatewayError};
pub use catalog_gateway::{AnalyticsGateway, CatalogGateway, ReportGateway};
pub use credential_provider::{Anonymous, CredentialProvider};
pub use token_storage::{StorageError, TOKEN_KEY, TokenStorage};
