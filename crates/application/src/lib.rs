//! Stockroom Application - Session lifecycle, use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the backend and token storage)
//! - The session store and route guard
//! - Use case orchestration for catalog data, analytics and reports
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use auth::{RouteGuard, Router, SessionCredentials, SessionStore};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    AnalyticsGateway, Anonymous, AuthGateway, CatalogGateway, CredentialProvider, GatewayError,
    ReportGateway, StorageError, TOKEN_KEY, TokenStorage,
};
pub use use_cases::{
    CatalogEdit, CatalogRecord, DownloadReport, DownloadReportInput, EditCatalog,
    EditCatalogOutcome, LoadAnalytics, LoadAnalyticsInput, LoadAnalyticsOutput, LoadCatalog,
    LoadCatalogInput, LoadCatalogOutput, SectionFailure, SimulateOrder, SimulateOrderOutput,
};
