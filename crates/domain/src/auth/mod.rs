//! Authentication domain types

mod types;

pub use types::{BEARER_SCHEME, BearerToken, Identity, LoginCredentials, SignupRequest};
