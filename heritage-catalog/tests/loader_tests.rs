//! Integration tests for the catalog loader against a mock catalog service.

mod helpers;

use helpers::*;
use heritage_catalog::{
    CatalogQuery, CatalogStatus, LoadOutcome, ModelCatalogLoader, ModelFilter, ModelId,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HTTP_INTERNAL_SERVER_ERROR: u16 = 500;
const SLOW_RESPONSE_DELAY: Duration = Duration::from_millis(500);
const SLOWER_RESPONSE_DELAY: Duration = Duration::from_millis(1500);

#[test_log::test(tokio::test)]
async fn test_hampi_filter_scenario() {
    let server = MockServer::start().await;
    mount_catalog(&server, two_model_catalog()).await;

    let loader = ModelCatalogLoader::new(
        client_for(&server),
        CatalogQuery::all().with_filter(ModelFilter::location_contains("hampi")),
    );
    let result = loader.load_and_wait().await;

    assert_eq!(result.status(), CatalogStatus::Ready);
    assert_eq!(result.items().len(), 1);
    assert_eq!(result.items()[0].id, ModelId::Number(1));
    assert!(result.error().is_none());
}

#[tokio::test]
async fn test_empty_catalog_is_ready_not_failed() {
    let server = MockServer::start().await;
    mount_catalog(&server, json!([])).await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let result = loader.load_and_wait().await;

    assert_eq!(result.status(), CatalogStatus::Ready);
    assert!(result.items().is_empty());
    assert!(result.error().is_none());
}

#[tokio::test]
async fn test_body_not_json_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"body": "not-json"})))
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let result = loader.load_and_wait().await;

    assert_eq!(result.status(), CatalogStatus::Failed);
    assert!(!result.error().unwrap().is_empty());
    assert!(result.items().is_empty());
}

#[tokio::test]
async fn test_outer_body_not_json_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let result = loader.load_and_wait().await;

    assert!(result.is_failed());
    assert!(result.error().unwrap().contains("envelope"));
}

#[tokio::test]
async fn test_http_500_fails_with_status_in_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(HTTP_INTERNAL_SERVER_ERROR))
        .expect(1)
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let result = loader.load_and_wait().await;

    assert_eq!(result.status(), CatalogStatus::Failed);
    assert!(result.error().unwrap().contains("500"));
}

#[tokio::test]
async fn test_timeout_fails_with_timeout_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(catalog_response(two_model_catalog()).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(
        client_with_timeout(&server, Duration::from_secs(1)),
        CatalogQuery::all(),
    );
    let result = tokio::time::timeout(TEST_OUTER_TIMEOUT, loader.load_and_wait())
        .await
        .expect("load should settle once the client timeout fires");

    assert!(result.is_failed());
    assert!(result.error().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_load_is_non_blocking_and_starts_loading() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(catalog_response(two_model_catalog()).set_delay(SLOW_RESPONSE_DELAY))
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    assert_eq!(loader.result().status(), CatalogStatus::Idle);

    let handle = loader.load();
    assert_eq!(loader.result().status(), CatalogStatus::Loading);
    assert_eq!(handle.generation(), 1);

    assert_eq!(handle.wait().await, LoadOutcome::Applied);
    assert_eq!(loader.result().items().len(), 2);
}

#[tokio::test]
async fn test_subscriber_sees_loading_then_ready() {
    let server = MockServer::start().await;
    mount_catalog(&server, two_model_catalog()).await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let mut rx = loader.subscribe();

    let handle = loader.load();
    assert!(rx.borrow_and_update().is_loading());

    handle.wait().await;
    rx.changed().await.unwrap();
    let result = rx.borrow_and_update().clone();
    assert!(result.is_ready());
    assert_eq!(result.items().len(), 2);
}

#[tokio::test]
async fn test_repeated_loads_are_identical() {
    let server = MockServer::start().await;
    mount_catalog(&server, hampi_heavy_catalog()).await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all().with_location("hampi"));
    let first = loader.load_and_wait().await;
    let second = loader.load_and_wait().await;

    assert_eq!(first.items(), second.items());
    let names: Vec<_> = first.items().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Virupaksha Temple", "Stone Chariot", "Lotus Mahal"]);
}

#[tokio::test]
async fn test_limit_applies_after_filter() {
    let server = MockServer::start().await;
    mount_catalog(&server, hampi_heavy_catalog()).await;

    let loader = ModelCatalogLoader::new(
        client_for(&server),
        CatalogQuery::all().with_location("hampi").with_limit(2),
    );
    let result = loader.load_and_wait().await;
    let ids: Vec<_> = result.items().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn test_one_request_per_load() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(catalog_response(two_model_catalog()))
        .expect(3)
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    loader.load_and_wait().await;
    loader.reload().wait().await;
    loader.reload().wait().await;

    assert_eq!(request_count(&server).await, 3);
    assert_eq!(loader.generation(), 3);
}

#[tokio::test]
async fn test_independent_loaders_do_not_share_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(catalog_response(hampi_heavy_catalog()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let landing = ModelCatalogLoader::new(client.clone(), CatalogQuery::all().with_limit(3));
    let temples = ModelCatalogLoader::new(client, CatalogQuery::all().with_location("hampi"));

    let (a, b) = tokio::join!(landing.load().wait(), temples.load().wait());
    assert_eq!(a, LoadOutcome::Applied);
    assert_eq!(b, LoadOutcome::Applied);

    assert_eq!(landing.result().items().len(), 3);
    assert_eq!(temples.result().items().len(), 3);
    assert_eq!(landing.result().items()[1].name, "Taj Mahal");
}

#[test_log::test(tokio::test)]
async fn test_stale_response_is_discarded() {
    let server = MockServer::start().await;
    // First request: slow, old data. Later requests: fast, new data.
    Mock::given(method("POST"))
        .respond_with(
            catalog_response(json!([{"id": "old", "name": "Old", "location": "Hampi"}]))
                .set_delay(SLOW_RESPONSE_DELAY),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_catalog(&server, json!([{"id": "new", "name": "New", "location": "Hampi"}])).await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let first = loader.load();
    wait_for_requests(&server, 1).await;
    let second = loader.reload();

    assert_eq!(second.wait().await, LoadOutcome::Applied);
    assert_eq!(loader.result().items()[0].name, "New");

    assert_eq!(first.wait().await, LoadOutcome::Superseded);
    let result = loader.result();
    assert!(result.is_ready());
    assert_eq!(result.items()[0].id, ModelId::Text("new".into()));
}

#[tokio::test]
async fn test_superseded_load_does_not_end_loading_early() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(catalog_response(two_model_catalog()).set_delay(SLOW_RESPONSE_DELAY))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(catalog_response(two_model_catalog()).set_delay(SLOWER_RESPONSE_DELAY))
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let first = loader.load();
    wait_for_requests(&server, 1).await;
    let second = loader.reload();

    // The first response lands while the second is still in flight.
    assert_eq!(first.wait().await, LoadOutcome::Superseded);
    assert!(loader.result().is_loading());

    assert_eq!(second.wait().await, LoadOutcome::Applied);
    assert!(loader.result().is_ready());
}

#[tokio::test]
async fn test_dropped_owner_is_never_written() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(catalog_response(two_model_catalog()).set_delay(SLOW_RESPONSE_DELAY))
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let rx = loader.subscribe();
    let handle = loader.load();
    drop(loader);

    assert_eq!(handle.wait().await, LoadOutcome::Orphaned);
    assert!(rx.borrow().is_loading());
    assert!(rx.has_changed().is_err(), "sender should be gone with its owner");
}

#[tokio::test]
async fn test_retry_after_failure_clears_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(HTTP_INTERNAL_SERVER_ERROR))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(catalog_response(two_model_catalog()).set_delay(SLOW_RESPONSE_DELAY))
        .mount(&server)
        .await;

    let loader = ModelCatalogLoader::new(client_for(&server), CatalogQuery::all());
    let failed = loader.load_and_wait().await;
    assert!(failed.is_failed());

    let retry = loader.reload();
    let during = loader.result();
    assert!(during.is_loading());
    assert!(during.error().is_none());

    retry.wait().await;
    let after = loader.result();
    assert!(after.is_ready());
    assert!(after.error().is_none());
    assert_eq!(after.items().len(), 2);
}

#[tokio::test]
async fn test_unreachable_service_fails() {
    let loader = ModelCatalogLoader::new(closed_port_client(), CatalogQuery::all());
    let result = loader.load_and_wait().await;

    assert!(result.is_failed());
    assert!(result.items().is_empty());
    let message = result.error().unwrap();
    assert!(message.starts_with("Catalog request failed"), "got {message}");
    assert!(!message.contains("API request failed"));
}
