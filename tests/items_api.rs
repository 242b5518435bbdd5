//! HTTP integration tests for the item API.
//!
//! Starts the full router on an ephemeral port backed by the in-memory store and exercises it
//! with reqwest.

use async_trait::async_trait;
use inventory_service::{
    app, AppError, AppState, Item, ItemStore, LoadedItem, MemoryItemStore, ServiceConfig,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Store whose backend is always down.
struct UnavailableStore;

#[async_trait]
impl ItemStore for UnavailableStore {
    async fn get_all(&self) -> Result<Vec<LoadedItem>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn get_by_id(&self, _id: &str) -> Result<LoadedItem, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _item: &Item) -> Result<(), AppError> {
        Err(AppError::Internal("connection reset".into()))
    }

    async fn update(&self, _item: &Item) -> Result<(), AppError> {
        Err(AppError::Internal("connection reset".into()))
    }

    async fn delete(&self, _item: &Item) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

/// Bind to port 0 and return the listening address.
async fn serve(state: AppState, config: ServiceConfig) -> SocketAddr {
    let router = app(state, &config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// In-memory store with default config; returns the base URL.
async fn start_server() -> String {
    let addr = serve(AppState::new(MemoryItemStore::new()), ServiceConfig::default()).await;
    format!("http://{addr}")
}

async fn create(client: &reqwest::Client, base: &str, body: Value) -> Item {
    let resp = client
        .post(format!("{base}/api/v1/items"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

async fn error_of(resp: reqwest::Response, status: StatusCode) -> String {
    assert_eq!(resp.status(), status);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], status.as_u16());
    body["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_assigns_fresh_ids() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let a = create(&client, &base, json!({ "name": "Widget", "categoryID": "c1" })).await;
    let b = create(&client, &base, json!({ "name": "Widget", "categoryID": "c1" })).await;

    assert!(uuid::Uuid::parse_str(&a.id).is_ok());
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn create_requires_name() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/items"))
        .json(&json!({ "name": "", "categoryID": "c1" }))
        .send()
        .await
        .unwrap();
    let message = error_of(resp, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("name"));
}

#[tokio::test]
async fn create_requires_category() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/items"))
        .json(&json!({ "name": "Widget", "categoryID": "" }))
        .send()
        .await
        .unwrap();
    let message = error_of(resp, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("category"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for method in [reqwest::Method::POST, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let resp = client
            .request(method.clone(), format!("{base}/api/v1/items"))
            .header("content-type", "application/json")
            .body("{\"name\": ")
            .send()
            .await
            .unwrap();
        error_of(resp, StatusCode::BAD_REQUEST).await;
    }

    let resp = client
        .post(format!("{base}/api/v1/items"))
        .json(&json!({ "name": "Widget", "categoryID": "c1", "price": "cheap" }))
        .send()
        .await
        .unwrap();
    error_of(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn round_trip_preserves_fields() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let created = create(
        &client,
        &base,
        json!({ "name": "Widget", "categoryID": "c1", "price": 100, "cost": 50, "sku": "W1" }),
    )
    .await;

    let resp = client
        .get(format!("{base}/api/v1/items/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], created.id.as_str());
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["categoryID"], "c1");
    assert_eq!(body["price"], 100);
    assert_eq!(body["cost"], 50);
    assert_eq!(body["sku"], "W1");
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn path_and_query_lookup_agree() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, json!({ "name": "Widget", "categoryID": "c1", "color": "red" })).await;

    let by_path: Value = client
        .get(format!("{base}/api/v1/items/{}", created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let by_query: Value = client
        .get(format!("{base}/api/v1/items"))
        .query(&[("id", created.id.as_str())])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_path, by_query);
}

#[tokio::test]
async fn query_lookup_uses_first_id() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let first = create(&client, &base, json!({ "name": "First", "categoryID": "c1" })).await;
    let second = create(&client, &base, json!({ "name": "Second", "categoryID": "c1" })).await;

    let resp = client
        .get(format!("{base}/api/v1/items?id={}&id={}", first.id, second.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Item = resp.json().await.unwrap();
    assert_eq!(body, first);
}

#[tokio::test]
async fn empty_query_id_is_a_bad_request() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/v1/items?id=")).send().await.unwrap();
    error_of(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/v1/items/missing")).send().await.unwrap();
    error_of(resp, StatusCode::NOT_FOUND).await;

    let resp = client.get(format!("{base}/api/v1/items?id=missing")).send().await.unwrap();
    error_of(resp, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn list_returns_every_created_item() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let mut created = Vec::new();
    for n in 0..3 {
        created.push(create(&client, &base, json!({ "name": format!("Item {n}"), "categoryID": "c1" })).await);
    }

    let resp = client.get(format!("{base}/api/v1/items")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Vec<Item> = resp.json().await.unwrap();
    assert!(listed.len() >= created.len());
    for item in &created {
        assert!(listed.contains(item));
        let resp = client
            .get(format!("{base}/api/v1/items/{}", item.id))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn update_is_idempotent_full_replace() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, json!({ "name": "Widget", "categoryID": "c1", "sku": "W1" })).await;
    let replacement = json!({ "id": created.id, "name": "Gadget", "categoryID": "c2", "price": 7 });

    let mut states = Vec::new();
    for _ in 0..2 {
        let resp = client
            .put(format!("{base}/api/v1/items"))
            .json(&replacement)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let echoed: Item = resp.json().await.unwrap();
        assert_eq!(echoed.name, "Gadget");

        let stored: Item = client
            .get(format!("{base}/api/v1/items/{}", created.id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        states.push(stored);
    }
    assert_eq!(states[0], states[1]);
    assert_eq!(states[0].category_id, "c2");
    // Fields left out of the payload are overwritten with their zero value.
    assert_eq!(states[0].sku, "");
}

#[tokio::test]
async fn update_inserts_unknown_id() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/v1/items"))
        .json(&json!({ "id": "custom-1", "name": "Widget", "categoryID": "c1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.get(format!("{base}/api/v1/items/custom-1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn update_and_delete_require_id() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/v1/items"))
        .json(&json!({ "name": "Widget", "categoryID": "c1" }))
        .send()
        .await
        .unwrap();
    error_of(resp, StatusCode::BAD_REQUEST).await;

    let resp = client
        .delete(format!("{base}/api/v1/items"))
        .json(&json!({ "name": "Widget" }))
        .send()
        .await
        .unwrap();
    error_of(resp, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn delete_removes_item() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, json!({ "name": "Widget", "categoryID": "c1" })).await;

    let resp = client
        .delete(format!("{base}/api/v1/items"))
        .json(&created)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "success" }));

    let resp = client
        .get(format!("{base}/api/v1/items/{}", created.id))
        .send()
        .await
        .unwrap();
    error_of(resp, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn delete_unknown_id_fails() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/v1/items"))
        .json(&json!({ "id": "does-not-exist" }))
        .send()
        .await
        .unwrap();
    error_of(resp, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn health_ready_and_version() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let body: Value = client.get(format!("{base}/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let resp = client.get(format!("{base}/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["database"], "ok");

    let body: Value = client.get(format!("{base}/version")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["name"], "inventory-service");
}

#[tokio::test]
async fn serves_openapi_document() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/swagger/openapi.json")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = resp.json().await.unwrap();
    assert_eq!(doc["info"]["title"], "Inventory Service API Document");
    assert!(doc["paths"].get("/api/v1/items/{id}").is_some());
}

fn oversized_item() -> Value {
    json!({
        "name": "Widget with a rather long name",
        "categoryID": "c1",
        "sku": "W-0000000000000000000000000000000000000000",
        "barcode": "0000000000000000000000000000000000000000",
        "image": "https://images.example.com/items/widget.png"
    })
}

fn small_limit() -> ServiceConfig {
    ServiceConfig {
        max_body_bytes: 64,
        ..Default::default()
    }
}

#[tokio::test]
async fn oversized_body_is_rejected_with_envelope() {
    let addr = serve(AppState::new(MemoryItemStore::new()), small_limit()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/api/v1/items"))
        .json(&oversized_item())
        .send()
        .await
        .unwrap();
    error_of(resp, StatusCode::PAYLOAD_TOO_LARGE).await;
}

#[tokio::test]
async fn oversized_chunked_body_is_rejected_with_envelope() {
    let addr = serve(AppState::new(MemoryItemStore::new()), small_limit()).await;

    let body = oversized_item().to_string();
    let request = format!(
        "POST /api/v1/items HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\n\
         Transfer-Encoding: chunked\r\nConnection: close\r\n\r\n{:x}\r\n{body}\r\n0\r\n\r\n",
        body.len()
    );
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 413"), "{response}");
    let (_, payload) = response.split_once("\r\n\r\n").unwrap();
    let envelope: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(envelope["code"], 413);
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let addr = serve(AppState::new(UnavailableStore), ServiceConfig::default()).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let item = json!({ "id": "a", "name": "Widget", "categoryID": "c1" });

    let requests = [
        client.get(format!("{base}/api/v1/items")),
        client.get(format!("{base}/api/v1/items?id=a")),
        client.get(format!("{base}/api/v1/items/a")),
        client.post(format!("{base}/api/v1/items")).json(&item),
        client.put(format!("{base}/api/v1/items")).json(&item),
        client.delete(format!("{base}/api/v1/items")).json(&item),
    ];
    for request in requests {
        let resp = request.send().await.unwrap();
        error_of(resp, StatusCode::INTERNAL_SERVER_ERROR).await;
    }
}

#[tokio::test]
async fn ready_reports_unavailable_store() {
    let addr = serve(AppState::new(UnavailableStore), ServiceConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("http://{addr}/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "degraded", "database": "unavailable" }));

    let resp = client.get(format!("http://{addr}/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
