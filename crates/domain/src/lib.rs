//! Stockroom Domain - Core business types
//!
//! This crate defines the domain model for the Stockroom inventory client.
//! All types here are pure Rust with no I/O dependencies.

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod report;
pub mod route;
pub mod session;
pub mod settings;

pub use analytics::{AbcClass, AbcEntry, DashboardStats, Forecast, SimulatedOrder};
pub use auth::{BEARER_SCHEME, BearerToken, Identity, LoginCredentials, SignupRequest};
pub use catalog::{Order, OrderDraft, Product, ProductDraft, Supplier, SupplierDraft};
pub use error::{DomainError, DomainResult};
pub use report::{ReportFormat, ReportKind, ReportRequest};
pub use route::{Access, AppRoute, Navigation};
pub use session::{Session, SessionStatus};
pub use settings::{ClientSettings, DEFAULT_API_URL, DEFAULT_TIMEOUT_MS, VerificationPolicy};
