use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::StorageConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::{routes, startup};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

struct TestApp {
    router: Router,
    storage: StorageConfig,
}

impl TestApp {
    async fn new() -> anyhow::Result<Self> {
        // Isolated data directory per test
        let storage = StorageConfig {
            data_dir: std::env::temp_dir().join(format!("shop_http_{}", Uuid::new_v4())),
            ..StorageConfig::default()
        };
        let state = startup::build_state(&storage).await?;
        Ok(Self { router: routes::build_router(state, cors(), 1), storage })
    }

    async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&v)?))?,
            None => builder.body(Body::empty())?,
        };
        let res = self.router.clone().oneshot(req).await?;
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, value))
    }

    fn products_file(&self) -> PathBuf {
        self.storage.products_path()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.storage.data_dir);
    }
}

#[tokio::test]
async fn health_and_metrics_respond() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.call("GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let res = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn product_and_cart_scenario() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, product) = app.call("POST", "/products", Some(json!({"name": "X"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let pid = product["id"].as_u64().expect("numeric product id");
    assert!(pid < 1000);
    assert_eq!(product, json!({"id": pid, "name": "X"}));

    let (status, cart) = app.call("POST", "/carts", None).await?;
    assert_eq!(status, StatusCode::CREATED);
    let cid = cart["id"].as_u64().expect("numeric cart id");
    assert_eq!(cart, json!({"id": cid, "products": []}));

    let uri = format!("/carts/{cid}/product/{pid}");
    let (status, cart) = app.call("POST", &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart, json!({"id": cid, "products": [{"product": pid, "quantity": 1}]}));

    let (status, cart) = app.call("POST", &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart, json!({"id": cid, "products": [{"product": pid, "quantity": 2}]}));

    // GET returns only the line items
    let (status, items) = app.call("GET", &format!("/carts/{cid}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items, json!([{"product": pid, "quantity": 2}]));
    Ok(())
}

#[tokio::test]
async fn product_crud_over_http() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (_, created) = app.call("POST", "/products", Some(json!({"name": "Lamp", "price": 30}))).await?;
    let pid = created["id"].as_u64().expect("id");

    let (status, listed) = app.call("GET", "/products", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created.clone()]));

    // repeated reads are identical
    let (_, first) = app.call("GET", &format!("/products/{pid}"), None).await?;
    let (_, second) = app.call("GET", &format!("/products/{pid}"), None).await?;
    assert_eq!(first, created);
    assert_eq!(first, second);

    let (status, updated) = app
        .call("PUT", &format!("/products/{pid}"), Some(json!({"price": 25, "id": 12345})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": pid, "name": "Lamp", "price": 25}));

    let (status, body) = app.call("DELETE", &format!("/products/{pid}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = app.call("GET", &format!("/products/{pid}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Producto no encontrado"}));
    Ok(())
}

#[tokio::test]
async fn missing_entities_return_localized_404() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    for (method, uri, body) in [
        ("GET", "/products/5", None),
        ("GET", "/products/not-a-number", None),
        ("PUT", "/products/5", Some(json!({"name": "ghost"}))),
        ("DELETE", "/products/5", None),
    ] {
        let (status, res) = app.call(method, uri, body).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(res, json!({"error": "Producto no encontrado"}), "{method} {uri}");
    }

    let (status, res) = app.call("GET", "/carts/5", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res, json!({"error": "Carrito no encontrado"}));

    // cart is checked before the product
    let (status, res) = app.call("POST", "/carts/5/product/abc", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res, json!({"error": "Carrito no encontrado"}));

    let (_, cart) = app.call("POST", "/carts", None).await?;
    let cid = cart["id"].as_u64().expect("id");
    let (status, res) = app.call("POST", &format!("/carts/{cid}/product/7"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res, json!({"error": "Producto no encontrado"}));
    Ok(())
}

#[tokio::test]
async fn deleting_unknown_product_leaves_document_unchanged() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, created) = app.call("POST", "/products", Some(json!({"name": "keep"}))).await?;
    let pid = created["id"].as_u64().expect("id");
    let before = std::fs::read(app.products_file())?;

    let other = (pid + 1) % 1000;
    let (status, _) = app.call("DELETE", &format!("/products/{other}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(std::fs::read(app.products_file())?, before);
    Ok(())
}

#[tokio::test]
async fn limited_listing_returns_prefix() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let mut created = Vec::new();
    for i in 0..5 {
        let (_, p) = app.call("POST", "/products", Some(json!({"n": i}))).await?;
        created.push(p);
    }

    let (status, two) = app.call("GET", "/products/limited?limit=2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(two, Value::Array(created[..2].to_vec()));

    for uri in ["/products/limited?limit=0", "/products/limited", "/products/limited?limit=abc"] {
        let (status, all) = app.call("GET", uri, None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all, Value::Array(created.clone()), "{uri}");
    }

    // negative limits drop items from the end
    let (status, trimmed) = app.call("GET", "/products/limited?limit=-1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trimmed, Value::Array(created[..4].to_vec()));

    let (_, none) = app.call("GET", "/products/limited?limit=-9", None).await?;
    assert_eq!(none, json!([]));
    Ok(())
}

#[tokio::test]
async fn bad_bodies_and_empty_bodies() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let req = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from("{broken"))?;
    let res = app.router.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (status, _) = app.call("POST", "/products", Some(json!(["not", "an", "object"]))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // no body at all creates a product holding only its id
    let (status, created) = app.call("POST", "/products", None).await?;
    assert_eq!(status, StatusCode::CREATED);
    let obj = created.as_object().expect("object");
    assert_eq!(obj.len(), 1);
    assert!(obj.contains_key("id"));
    Ok(())
}

#[tokio::test]
async fn corrupted_product_collection_is_server_error() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    std::fs::write(app.products_file(), b"not json")?;

    let (status, body) = app.call("GET", "/products", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    Ok(())
}
