//! Shared fixtures for the catalog integration tests.

#![allow(dead_code)]

use heritage_catalog::{CatalogClient, CatalogConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CATALOG_PATH: &str = "/dev/temple-ar1";

/// Upper bound for any single wait in these tests.
pub const TEST_OUTER_TIMEOUT: Duration = Duration::from_secs(10);

/// Wrap models the way the catalog gateway does: `body` is a JSON string.
pub fn envelope(models: Value) -> Value {
    json!({ "body": models.to_string() })
}

pub fn two_model_catalog() -> Value {
    json!([
        {"id": 1, "name": "Virupaksha", "location": "Hampi, Karnataka"},
        {"id": 2, "name": "Taj Mahal", "location": "Agra"}
    ])
}

pub fn hampi_heavy_catalog() -> Value {
    json!([
        {"id": 1, "name": "Virupaksha Temple", "location": "Hampi, Karnataka", "url": "https://cdn.example/virupaksha.glb", "rating": 4.9, "description": "Main temple", "reviews": [{"author": "a"}]},
        {"id": 2, "name": "Taj Mahal", "location": "Agra, Uttar Pradesh", "url": "https://cdn.example/taj.glb", "rating": 4.8},
        {"id": 3, "name": "Stone Chariot", "location": "HAMPI", "url": "https://cdn.example/chariot.glb", "rating": 4.7},
        {"id": 4, "name": "Konark Sun Temple", "location": "Konark, Odisha", "url": "https://cdn.example/konark.glb", "rating": 4.6},
        {"id": 5, "name": "Lotus Mahal", "location": "hampi", "url": "https://cdn.example/lotus.glb", "rating": 4.5}
    ])
}

pub fn catalog_response(models: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(envelope(models))
}

/// Mount a catalog that answers every POST with `models`.
pub async fn mount_catalog(server: &MockServer, models: Value) {
    Mock::given(method("POST"))
        .and(path(CATALOG_PATH))
        .respond_with(catalog_response(models))
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer) -> CatalogConfig {
    CatalogConfig::default().with_endpoint(format!("{}{}", server.uri(), CATALOG_PATH))
}

pub fn client_for(server: &MockServer) -> Arc<CatalogClient> {
    Arc::new(CatalogClient::new(&config_for(server)).expect("valid test endpoint"))
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> Arc<CatalogClient> {
    let config = config_for(server).with_timeout(timeout);
    Arc::new(CatalogClient::new(&config).expect("valid test endpoint"))
}

/// Client aimed at a loopback port that nothing listens on.
pub fn closed_port_client() -> Arc<CatalogClient> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    let config =
        CatalogConfig::default().with_endpoint(format!("http://127.0.0.1:{port}{CATALOG_PATH}"));
    Arc::new(CatalogClient::new(&config).expect("valid test endpoint"))
}

/// Poll until the server has seen `count` requests.
pub async fn wait_for_requests(server: &MockServer, count: usize) {
    let poll = async {
        loop {
            let seen = server
                .received_requests()
                .await
                .map(|r| r.len())
                .unwrap_or_default();
            if seen >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(TEST_OUTER_TIMEOUT, poll)
        .await
        .expect("server did not receive the expected requests in time");
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|r| r.len())
        .unwrap_or_default()
}
