use config::shared::{RetryConfig, ShardStoreConfig};
use destek::destination::fs::FsDestination;
use destek::ingest::pipeline::run_ingestion;
use destek::lookup::{LookupOutcome, LookupResolver};
use destek::source::SourceFile;
use destek::store::ConfiguredShardStore;
use destek::store::fs::FsShardStore;
use destek::test_utils::fixtures::ingest_config;
use destek::types::{DatasetId, Scalar};
use telemetry::tracing::init_test_tracing;

#[tokio::test]
async fn published_directory_serves_lookups() {
    init_test_tracing();

    let root = tempfile::tempdir().unwrap();
    let sheet = root.path().join("Arı.json");
    std::fs::write(
        &sheet,
        r#"[["TC", "Kovan"], ["66724004144", 40], ["9876543210", 12]]"#,
    )
    .unwrap();
    let source = SourceFile::load(&sheet).await.unwrap();

    let output = root.path().join("data");
    let destination = FsDestination::new(&output);
    run_ingestion(ingest_config("ari"), &[source], &destination)
        .await
        .unwrap();

    let shards = std::fs::read_dir(output.join("ari")).unwrap().count();
    assert_eq!(shards, 100);
    let shard = std::fs::read_to_string(output.join("ari").join("27.json")).unwrap();
    assert!(shard.starts_with(r#"{"cols":["Kovan"],"data":{"#));

    let resolver = LookupResolver::new(FsShardStore::new(&output), RetryConfig::default());
    let dataset = DatasetId::new("ari").unwrap();

    let LookupOutcome::Single(record) = resolver.resolve(&dataset, "66724004144").await.unwrap()
    else {
        panic!("expected a single record");
    };
    assert_eq!(record.get("Kovan"), Some(&Scalar::from(40_i64)));

    let configured = ConfiguredShardStore::from_config(&ShardStoreConfig::Fs {
        root: output.clone(),
    })
    .unwrap();
    let resolver = LookupResolver::new(configured, RetryConfig::default());
    assert!(
        resolver
            .resolve(&dataset, "9876543210")
            .await
            .unwrap()
            .is_found()
    );
    assert_eq!(
        resolver
            .resolve(&DatasetId::new("yok").unwrap(), "9876543210")
            .await
            .unwrap(),
        LookupOutcome::NoRecord
    );
}
