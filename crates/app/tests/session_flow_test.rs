//! End-to-end session flows against a mock backend.
//!
//! These tests wire the real reqwest client and file token storage into
//! the session store, the way the binary does.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::sync::Arc;

use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use stockroom_application::{
    CatalogEdit, CatalogRecord, DownloadReport, DownloadReportInput, EditCatalog,
    EditCatalogOutcome, GatewayError, LoadAnalytics, LoadAnalyticsInput, LoadCatalog,
    LoadCatalogInput, Router, SessionCredentials, SessionStore, SimulateOrder, TokenStorage,
};
use stockroom_domain::{
    AppRoute, BearerToken, ClientSettings, Forecast, Navigation, ReportFormat, ReportKind,
    ReportRequest, SupplierDraft, VerificationPolicy,
};
use stockroom_infrastructure::{FileTokenStorage, ReqwestApiClient};

type Store = SessionStore<ReqwestApiClient, FileTokenStorage>;

const ALICE: &str = r#"{"id":7,"username":"alice","email":"alice@example.com"}"#;

fn settings(url: &str) -> ClientSettings {
    ClientSettings {
        api_base_url: url.to_string(),
        timeout_ms: 2000,
        ..ClientSettings::default()
    }
}

fn wire(settings: &ClientSettings, storage: &Path) -> (Store, Arc<ReqwestApiClient>) {
    let credentials = Arc::new(SessionCredentials::new());
    let client = Arc::new(ReqwestApiClient::new(settings, credentials.clone()).unwrap());
    let store = SessionStore::new(
        client.clone(),
        Arc::new(FileTokenStorage::at(storage)),
        credentials,
    )
    .with_policy(settings.verification_policy);
    (store, client)
}

fn stored_token(path: &Path) -> Option<BearerToken> {
    FileTokenStorage::at(path).load().unwrap()
}

#[tokio::test]
async fn test_login_survives_restart() {
    let mut server = Server::new_async().await;
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");

    let token = server
        .mock("POST", "/auth/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "alice".into()),
            Matcher::UrlEncoded("password".into(), "s3cret".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok-1","token_type":"bearer"}"#)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/auth/users/me")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ALICE)
        .expect(2)
        .create_async()
        .await;

    let (first, _) = wire(&settings(&server.url()), &storage);
    first.initialize().await;
    assert!(!first.snapshot().is_authenticated());

    let user = first.login("alice", "s3cret").await.unwrap();
    assert_eq!(user.username(), Some("alice"));
    assert_eq!(stored_token(&storage).unwrap().as_str(), "tok-1");

    // A fresh process restores the session from disk.
    let (second, _) = wire(&settings(&server.url()), &storage);
    assert!(second.snapshot().loading);
    second.initialize().await;

    let session = second.snapshot();
    assert!(!session.loading);
    assert_eq!(session.user.unwrap().username(), Some("alice"));

    token.assert_async().await;
    me.assert_async().await;
}

#[tokio::test]
async fn test_rejected_token_is_discarded_on_startup() {
    let mut server = Server::new_async().await;
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    std::fs::write(&storage, r#"{"token":"expired"}"#).unwrap();

    let me = server
        .mock("GET", "/auth/users/me")
        .match_header("authorization", "Bearer expired")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Could not validate credentials"}"#)
        .create_async()
        .await;

    let (store, _) = wire(&settings(&server.url()), &storage);
    store.initialize().await;

    let session = store.snapshot();
    assert!(!session.loading);
    assert!(session.user.is_none());
    assert!(stored_token(&storage).is_none());
    assert!(!store.credentials().is_present());
    me.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_backend_policies() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    let offline = settings("http://127.0.0.1:9");

    std::fs::write(&storage, r#"{"token":"kept"}"#).unwrap();
    let keep = ClientSettings {
        verification_policy: VerificationPolicy::KeepOnUnreachable,
        ..offline.clone()
    };
    let (store, _) = wire(&keep, &storage);
    store.initialize().await;
    assert!(!store.snapshot().is_authenticated());
    assert!(!store.snapshot().loading);
    assert_eq!(stored_token(&storage).unwrap().as_str(), "kept");

    let (store, _) = wire(&offline, &storage);
    store.initialize().await;
    assert!(!store.snapshot().is_authenticated());
    assert!(stored_token(&storage).is_none());
}

#[tokio::test]
async fn test_logout_stops_sending_credentials() {
    let mut server = Server::new_async().await;
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    std::fs::write(&storage, r#"{"token":"tok-9"}"#).unwrap();

    server
        .mock("GET", "/auth/users/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ALICE)
        .create_async()
        .await;
    let authed = server
        .mock("GET", "/products/")
        .match_header("authorization", "Bearer tok-9")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":1,"name":"Widget","category":"Parts","price":2.5,
                 "stock_level":3,"reorder_point":10,"supplier_id":4}]"#,
        )
        .create_async()
        .await;
    let anonymous = server
        .mock("GET", "/products/")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Not authenticated"}"#)
        .create_async()
        .await;

    let (store, client) = wire(&settings(&server.url()), &storage);
    store.initialize().await;
    let catalog = LoadCatalog::new(client);
    let products_only = LoadCatalogInput {
        products: true,
        suppliers: false,
        orders: false,
    };

    let output = catalog.execute(products_only).await;
    assert_eq!(output.products.len(), 1);
    assert!(output.products[0].needs_reorder());

    store.logout();
    assert!(stored_token(&storage).is_none());

    let output = catalog.execute(products_only).await;
    assert!(output.products.is_empty());
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].1.status(), Some(401));

    // A data failure never touches the session.
    assert!(!store.snapshot().loading);
    assert!(store.snapshot().user.is_none());

    authed.assert_async().await;
    anonymous.assert_async().await;
}

#[tokio::test]
async fn test_router_follows_session() {
    let mut server = Server::new_async().await;
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");

    server
        .mock("POST", "/auth/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok-2","token_type":"bearer"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/auth/users/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ALICE)
        .create_async()
        .await;

    let (store, _) = wire(&settings(&server.url()), &storage);
    let router = Router::new();

    assert_eq!(router.navigate("/orders", &store.snapshot()), Navigation::Wait);

    store.initialize().await;
    assert_eq!(
        router.navigate("/orders", &store.snapshot()),
        Navigation::Redirect(AppRoute::Login)
    );
    assert_eq!(
        router.navigate("/login", &store.snapshot()),
        Navigation::Render(AppRoute::Login)
    );

    store.login("alice", "pw").await.unwrap();
    assert_eq!(
        router.navigate("/orders", &store.snapshot()),
        Navigation::Render(AppRoute::Orders)
    );

    store.logout();
    assert_eq!(
        router.navigate("/", &store.snapshot()),
        Navigation::Redirect(AppRoute::Login)
    );
}

#[tokio::test]
async fn test_download_report_to_disk() {
    let mut server = Server::new_async().await;
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    std::fs::write(&storage, r#"{"token":"tok-3"}"#).unwrap();

    server
        .mock("GET", "/auth/users/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ALICE)
        .create_async()
        .await;
    let report = server
        .mock("GET", "/reports/inventory/export/pdf")
        .match_header("authorization", "Bearer tok-3")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(b"%PDF-1.4 fake".as_slice())
        .create_async()
        .await;

    let (store, client) = wire(&settings(&server.url()), &storage);
    store.initialize().await;
    assert!(store.snapshot().is_authenticated());

    let out = dir.path().join("reports");
    let path = DownloadReport::new(client)
        .execute(DownloadReportInput {
            request: ReportRequest::new(ReportKind::Inventory, ReportFormat::Pdf),
            target_dir: out.clone(),
        })
        .await
        .unwrap();

    assert_eq!(path, out.join("inventory_report.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 fake");
    report.assert_async().await;
}

#[tokio::test]
async fn test_blank_stored_token_is_removed_on_startup() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    std::fs::write(&storage, r#"{"token":"  "}"#).unwrap();

    // Nothing listens here; a blank token must not reach the network.
    let (store, _) = wire(&settings("http://127.0.0.1:9"), &storage);
    store.initialize().await;

    assert!(!store.snapshot().loading);
    assert!(store.snapshot().user.is_none());
    assert!(!storage.exists());
}

#[tokio::test]
async fn test_zero_timeout_is_refused_before_startup() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    std::fs::write(&storage, r#"{"token":"valid"}"#).unwrap();

    let zero = ClientSettings {
        timeout_ms: 0,
        ..settings("http://127.0.0.1:9")
    };
    let credentials = Arc::new(SessionCredentials::new());
    let result = ReqwestApiClient::new(&zero, credentials);

    assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
    assert_eq!(stored_token(&storage).unwrap().as_str(), "valid");
}

#[tokio::test]
async fn test_catalog_changes_carry_the_session_token() {
    let mut server = Server::new_async().await;
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    std::fs::write(&storage, r#"{"token":"tok-5"}"#).unwrap();

    server
        .mock("GET", "/auth/users/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ALICE)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/suppliers/")
        .match_header("authorization", "Bearer tok-5")
        .match_body(Matcher::Json(serde_json::json!({
            "name": "Acme",
            "email": "sales@acme.test"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":3,"name":"Acme","email":"sales@acme.test"}"#)
        .create_async()
        .await;
    let duplicate = server
        .mock("POST", "/suppliers/")
        .match_body(Matcher::PartialJson(serde_json::json!({ "name": "Duplicate" })))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Supplier already registered"}"#)
        .create_async()
        .await;

    let (store, client) = wire(&settings(&server.url()), &storage);
    store.initialize().await;
    let edits = EditCatalog::new(client);

    let outcome = edits
        .execute(CatalogEdit::CreateSupplier(SupplierDraft {
            name: "Acme".into(),
            email: Some("sales@acme.test".into()),
            ..SupplierDraft::default()
        }))
        .await;
    let Some(CatalogRecord::Supplier(supplier)) = outcome.into_result().unwrap() else {
        panic!("expected a saved supplier");
    };
    assert_eq!(supplier.id, 3);

    let outcome = edits
        .execute(CatalogEdit::CreateSupplier(SupplierDraft {
            name: "Duplicate".into(),
            ..SupplierDraft::default()
        }))
        .await;
    assert!(matches!(
        outcome,
        EditCatalogOutcome::Failed(GatewayError::Rejected { status: 400, .. })
    ));

    // A refused change leaves the session alone.
    assert!(store.snapshot().is_authenticated());
    assert_eq!(stored_token(&storage).unwrap().as_str(), "tok-5");
    create.assert_async().await;
    duplicate.assert_async().await;
}

#[tokio::test]
async fn test_dashboard_and_simulation() {
    let mut server = Server::new_async().await;
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    std::fs::write(&storage, r#"{"token":"tok-6"}"#).unwrap();

    server
        .mock("GET", "/auth/users/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ALICE)
        .create_async()
        .await;
    let stats = server
        .mock("GET", "/analytics/dashboard-stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"total_revenue":500,"total_products":3,
                "low_stock_alerts":1,"active_suppliers":2}"#,
        )
        .expect(2)
        .create_async()
        .await;
    server
        .mock("GET", "/analytics/forecast/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"dates":["2024-06-01","2024-06-02"],"forecast":[4.0,5.5]}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/analytics/abc")
        .with_status(500)
        .with_body("")
        .create_async()
        .await;
    let simulate = server
        .mock("POST", "/simulate/generate-order")
        .match_header("authorization", "Bearer tok-6")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"message":"Random order generated","order_id":9,
                "product":"Widget","quantity":2}"#,
        )
        .create_async()
        .await;

    let (store, client) = wire(&settings(&server.url()), &storage);
    store.initialize().await;

    let output = LoadAnalytics::new(client.clone())
        .execute(LoadAnalyticsInput {
            stats: true,
            abc: true,
            forecast: Some(1),
        })
        .await;
    assert_eq!(output.stats.unwrap().total_revenue, 500);
    assert!(output.abc.is_empty());
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].0, "abc");
    assert!(matches!(output.forecast, Some(Forecast::Projected { .. })));

    let simulated = SimulateOrder::new(client).execute().await;
    assert!(simulated.failures.is_empty());
    assert_eq!(simulated.order.unwrap().order_id, Some(9));
    assert!(simulated.stats.is_some());

    assert!(store.snapshot().is_authenticated());
    stats.assert_async().await;
    simulate.assert_async().await;
}
