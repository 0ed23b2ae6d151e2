use std::time::Duration;

use config::shared::ShardStoreConfig;
use destek::error::ErrorKind;
use destek::lookup::{LookupOutcome, LookupResolver};
use destek::routing::shard_for;
use destek::store::ConfiguredShardStore;
use destek::store::http::HttpShardStore;
use destek::test_utils::fixtures::fast_retry_config;
use destek::types::{DatasetId, HashKey, Record, Scalar, ShardDocument};
use telemetry::tracing::init_test_tracing;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IDENTITY: &str = "12345678901";

/// Path of the shard holding [`IDENTITY`] in the `koyun` dataset.
fn shard_path() -> String {
    let shard = shard_for(&HashKey::digest(IDENTITY));
    format!("/koyun/{}", shard.file_name())
}

fn shard_body() -> Vec<u8> {
    let mut document = ShardDocument::new(vec!["Ad".to_string(), "Tutar".to_string()]);
    document.data.insert(
        HashKey::digest(IDENTITY),
        Record::Single(vec![Scalar::from("Al*"), Scalar::from("1.500,00 ₺")]),
    );

    document.encode().unwrap()
}

fn resolver(server: &MockServer) -> LookupResolver<HttpShardStore> {
    let store = HttpShardStore::new(server.uri(), Duration::from_secs(5)).unwrap();

    LookupResolver::new(store, fast_retry_config(3))
}

fn dataset() -> DatasetId {
    DatasetId::new("koyun").unwrap()
}

#[tokio::test]
async fn fetches_shard_by_dataset_and_shard_id() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(shard_path()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(shard_body()))
        .expect(1)
        .mount(&server)
        .await;

    let LookupOutcome::Single(record) = resolver(&server)
        .resolve(&dataset(), IDENTITY)
        .await
        .unwrap()
    else {
        panic!("expected a single record");
    };

    assert_eq!(record.get("Tutar"), Some(&Scalar::from("1.500,00 ₺")));
}

#[tokio::test]
async fn missing_document_is_no_record() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = resolver(&server)
        .resolve(&dataset(), IDENTITY)
        .await
        .unwrap();

    assert_eq!(outcome, LookupOutcome::NoRecord);
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(shard_path()))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(shard_path()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(shard_body()))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = resolver(&server)
        .resolve(&dataset(), IDENTITY)
        .await
        .unwrap();

    assert!(outcome.is_found());
}

#[tokio::test]
async fn persistent_server_error_is_a_fetch_failure() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = resolver(&server)
        .resolve(&dataset(), IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ShardFetchFailed);
    assert!(err.kind().is_retryable());
}

#[tokio::test]
async fn malformed_document_is_not_retried() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>bakımda</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = resolver(&server)
        .resolve(&dataset(), IDENTITY)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedShard);
    assert!(!err.kind().is_retryable());
}

#[tokio::test]
async fn configured_store_uses_http_settings() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(shard_path()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(shard_body()))
        .mount(&server)
        .await;

    let store = ConfiguredShardStore::from_config(&ShardStoreConfig::Http {
        base_url: format!("{}/", server.uri()),
        timeout_ms: 2_000,
    })
    .unwrap();
    let outcome = LookupResolver::new(store, fast_retry_config(1))
        .resolve(&dataset(), IDENTITY)
        .await
        .unwrap();

    assert!(outcome.is_found());
}
