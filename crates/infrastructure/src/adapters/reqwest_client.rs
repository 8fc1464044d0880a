//! HTTP client implementation using reqwest.
//!
//! This adapter implements the backend gateway ports using the reqwest
//! library. The bearer token is read from the credential provider on
//! every request; the client itself holds no auth state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stockroom_application::ports::{
    AnalyticsGateway, AuthGateway, CatalogGateway, CredentialProvider, GatewayError,
    ReportGateway,
};
use stockroom_domain::{
    AbcEntry, BearerToken, ClientSettings, DashboardStats, Forecast, Identity, LoginCredentials,
    Order, OrderDraft, Product, ProductDraft, ReportRequest, SignupRequest, SimulatedOrder,
    Supplier, SupplierDraft,
};
use tracing::debug;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
}

/// Error body sent by the backend: `{ "detail": ... }`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: serde_json::Value,
}

/// HTTP client for the inventory API.
///
/// One instance is shared by the session store and every data
/// collaborator.
pub struct ReqwestApiClient {
    client: Client,
    base_url: Url,
    timeout_ms: u64,
    credentials: Arc<dyn CredentialProvider>,
}

impl ReqwestApiClient {
    /// Creates a client for the configured backend.
    ///
    /// Default configuration:
    /// - Timeout: `settings.timeout_ms` per request
    /// - User-Agent: "Stockroom/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid (bad base URL, zero
    /// timeout) or the client cannot be created.
    pub fn new(
        settings: &ClientSettings,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, GatewayError> {
        settings
            .validate()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        let base_url = settings
            .base_url()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

        let client = Client::builder()
            .user_agent(concat!("Stockroom/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

        Ok(Self::with_client(
            client,
            base_url,
            settings.timeout_ms,
            credentials,
        ))
    }

    /// Creates a client around an existing reqwest client.
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: Url,
        timeout_ms: u64,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            base_url,
            timeout_ms,
            credentials,
        }
    }

    /// Absolute URL for an API path, keeping any path prefix of the base URL.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}{path}"));
        url
    }

    /// Starts a request, attaching the current bearer token if there is one.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(%method, %url, "sending request");

        let builder = self
            .client
            .request(method, url)
            .timeout(Duration::from_millis(self.timeout_ms));

        match self.credentials.bearer() {
            Some(token) => builder.header(AUTHORIZATION, token.authorization_header()),
            None => builder,
        }
    }

    /// Sends a request and turns non-success statuses into errors.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status, &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::read_json(response, path).await
    }

    /// Sends a JSON body and decodes the JSON answer.
    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, path).json(body)).await?;
        Self::read_json(response, path).await
    }

    /// Deletes a resource. The confirmation message in the body is ignored.
    async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        path: &str,
    ) -> Result<T, GatewayError> {
        response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("{path}: {e}")))
    }

    /// Maps an error status and body to a `GatewayError`.
    fn status_error(status: StatusCode, body: &str) -> GatewayError {
        let detail = serde_json::from_str::<ErrorResponse>(body).map_or_else(
            |_| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("error").to_string()
                } else {
                    body.to_string()
                }
            },
            |error| match error.detail {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            },
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GatewayError::Unauthorized { detail }
            }
            _ => GatewayError::Rejected {
                status: status.as_u16(),
                detail,
            },
        }
    }

    /// Maps reqwest errors to `GatewayError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> GatewayError {
        if error.is_timeout() {
            return GatewayError::Timeout { timeout_ms };
        }

        if error.is_builder() {
            return GatewayError::InvalidRequest(error.to_string());
        }

        if error.is_decode() || error.is_body() {
            return GatewayError::InvalidResponse(error.to_string());
        }

        GatewayError::Unreachable(error.to_string())
    }
}

#[async_trait]
impl AuthGateway for ReqwestApiClient {
    async fn request_token(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<BearerToken, GatewayError> {
        let params = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let body = serde_urlencoded::to_string(params)
            .map_err(|e| GatewayError::InvalidRequest(format!("Failed to encode form: {e}")))?;

        let builder = self
            .request(Method::POST, "/auth/token")
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);

        let token_response: TokenResponse = self
            .send(builder)
            .await?
            .json()
            .await
            .map_err(|e| {
                GatewayError::InvalidResponse(format!("Failed to parse token response: {e}"))
            })?;

        BearerToken::new(token_response.access_token)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn fetch_identity(&self) -> Result<Identity, GatewayError> {
        let value: serde_json::Value = self.get_json("/auth/users/me").await?;
        Identity::from_value(value).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), GatewayError> {
        let builder = self.request(Method::POST, "/auth/signup").json(request);
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogGateway for ReqwestApiClient {
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.get_json("/products/").await
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, GatewayError> {
        self.get_json("/suppliers/").await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError> {
        self.get_json("/orders/").await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, GatewayError> {
        self.send_json(Method::POST, "/products/", draft).await
    }

    async fn update_product(
        &self,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<Product, GatewayError> {
        self.send_json(Method::PUT, &format!("/products/{id}"), draft).await
    }

    async fn delete_product(&self, id: i64) -> Result<(), GatewayError> {
        self.delete(&format!("/products/{id}")).await
    }

    async fn create_supplier(&self, draft: &SupplierDraft) -> Result<Supplier, GatewayError> {
        self.send_json(Method::POST, "/suppliers/", draft).await
    }

    async fn update_supplier(
        &self,
        id: i64,
        draft: &SupplierDraft,
    ) -> Result<Supplier, GatewayError> {
        self.send_json(Method::PUT, &format!("/suppliers/{id}"), draft).await
    }

    async fn delete_supplier(&self, id: i64) -> Result<(), GatewayError> {
        self.delete(&format!("/suppliers/{id}")).await
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, GatewayError> {
        self.send_json(Method::POST, "/orders/", draft).await
    }
}

#[async_trait]
impl AnalyticsGateway for ReqwestApiClient {
    async fn dashboard_stats(&self) -> Result<DashboardStats, GatewayError> {
        self.get_json("/analytics/dashboard-stats").await
    }

    async fn abc_analysis(&self) -> Result<Vec<AbcEntry>, GatewayError> {
        self.get_json("/analytics/abc").await
    }

    async fn forecast(&self, product_id: i64) -> Result<Forecast, GatewayError> {
        self.get_json(&format!("/analytics/forecast/{product_id}")).await
    }

    async fn simulate_order(&self) -> Result<SimulatedOrder, GatewayError> {
        let response = self
            .send(self.request(Method::POST, "/simulate/generate-order"))
            .await?;
        Self::read_json(response, "/simulate/generate-order").await
    }
}

#[async_trait]
impl ReportGateway for ReqwestApiClient {
    async fn fetch_report(&self, request: &ReportRequest) -> Result<Vec<u8>, GatewayError> {
        let response = self.send(self.request(Method::GET, &request.path())).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to read body: {e}")))?;
        Ok(bytes.to_vec())
    }
}
