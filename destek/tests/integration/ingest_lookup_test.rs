use config::shared::RetryConfig;
use destek::destination::memory::MemoryDestination;
use destek::error::ErrorKind;
use destek::ingest::pipeline::run_ingestion;
use destek::lookup::{LookupOutcome, LookupResolver};
use destek::routing::shard_for;
use destek::source::SourceFile;
use destek::store::memory::MemoryShardStore;
use destek::test_utils::fixtures::{column, fast_retry_config, ingest_config};
use destek::test_utils::grid::text_sheet;
use destek::test_utils::store::FlakyShardStore;
use destek::types::{Cell, DatasetId, HashKey, Record, Scalar};
use telemetry::tracing::init_test_tracing;

#[tokio::test]
async fn ingested_row_is_returned_by_lookup() {
    init_test_tracing();

    let source = SourceFile::new(
        "destek.json",
        vec![
            vec![Cell::from("TC"), Cell::from("A"), Cell::from("B")],
            vec![Cell::from(12345678901_i64), Cell::from("x"), Cell::from(5_i64)],
        ],
    );
    let destination = MemoryDestination::new();

    let report = run_ingestion(ingest_config("destek"), &[source], &destination)
        .await
        .unwrap();
    assert_eq!(report.accepted_rows(), 1);
    assert_eq!(report.schema, vec!["A".to_string(), "B".to_string()]);

    let resolver = LookupResolver::new(destination.shard_store().await, RetryConfig::default());
    let dataset = DatasetId::new("destek").unwrap();
    let outcome = resolver.resolve(&dataset, "12345678901").await.unwrap();

    let LookupOutcome::Single(record) = outcome else {
        panic!("expected a single record, got {outcome:?}");
    };
    assert_eq!(record.get("A"), Some(&Scalar::from("x")));
    assert_eq!(record.get("B"), Some(&Scalar::from(5_i64)));
    assert_eq!(record.fields().count(), 2);
}

#[tokio::test]
async fn transforms_are_applied_before_storage() {
    init_test_tracing();

    let mut config = ingest_config("buzagi");
    config.columns.masked = vec![column("B")];
    config.columns.currency = vec![column("C")];
    config.columns.title = Some(column("D"));
    let source = text_sheet(
        "buzagi.csv",
        &[
            &["TC", "Ad Soyad", "Tutar", "İl"],
            &["12345678901", "Mehmet Ata", "5600.5", " Konya "],
            &["12345678901", "Ay", "yok", ""],
        ],
    );
    let destination = MemoryDestination::new();

    run_ingestion(config, &[source], &destination).await.unwrap();

    let resolver = LookupResolver::new(destination.shard_store().await, RetryConfig::default());
    let outcome = resolver
        .resolve(&DatasetId::new("buzagi").unwrap(), "12345678901")
        .await
        .unwrap();

    let records = outcome.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("Ad Soyad"), Some(&Scalar::from("Me**** At*")));
    assert_eq!(records[0].get("Tutar"), Some(&Scalar::from("5.600,50 ₺")));
    assert_eq!(records[0].title(), Some("Konya".to_string()));
    assert_eq!(records[1].get("Ad Soyad"), Some(&Scalar::from("Ay")));
    assert_eq!(records[1].get("Tutar"), Some(&Scalar::from("yok")));
    assert_eq!(records[1].title(), None);
}

#[tokio::test]
async fn duplicates_across_files_form_one_group() {
    init_test_tracing();

    let first = text_sheet(
        "a.csv",
        &[
            &["TC", "İşletme"],
            &["22222222222", "1"],
            &["33333333333", "x"],
            &["22222222222", "2"],
        ],
    );
    let second = text_sheet("b.csv", &[&["TC", "İşletme"], &["22222222222", "3"]]);
    let destination = MemoryDestination::new();
    let dataset = DatasetId::new("keci").unwrap();

    let report = run_ingestion(ingest_config("keci"), &[first, second], &destination)
        .await
        .unwrap();
    assert_eq!(report.records, 2);
    assert_eq!(report.duplicate_rows(), 2);

    let documents = destination.documents(&dataset).await.unwrap().unwrap();
    let key = HashKey::digest("22222222222");
    let shard = shard_for(&key);
    assert_eq!(shard.index(), 92);

    let record = &documents[shard.index() as usize].data[&key];
    assert_eq!(
        record,
        &Record::Multiple(vec![
            vec![Scalar::from("1")],
            vec![Scalar::from("2")],
            vec![Scalar::from("3")],
        ])
    );
}

#[tokio::test]
async fn sheet_without_rows_still_produces_every_shard() {
    init_test_tracing();

    let source = text_sheet("bos.csv", &[&["TC", "Ad"], &["", ""], &["yo", "Ali"]]);
    let destination = MemoryDestination::new();
    let dataset = DatasetId::new("bos").unwrap();

    let report = run_ingestion(ingest_config("bos"), &[source], &destination)
        .await
        .unwrap();
    assert!(report.is_empty());
    assert_eq!(report.files[0].blank_rows, 1);
    assert_eq!(report.files[0].rows_without_identity, 1);

    let documents = destination.documents(&dataset).await.unwrap().unwrap();
    assert_eq!(documents.len(), 100);
    assert!(documents.iter().all(|document| document.data.is_empty()));
    assert!(documents.iter().all(|document| document.cols == ["Ad"]));
}

#[tokio::test]
async fn mismatching_file_is_reported_and_the_rest_is_written() {
    init_test_tracing();

    let sources = [
        text_sheet("a.csv", &[&["TC", "Ad"], &["12345678901", "Ali"]]),
        text_sheet("b.csv", &[&["TC", "Ad", "Soyad"], &["33333333333", "Veli", "Kaya"]]),
        text_sheet("c.csv", &[&["TC"]]),
    ];
    let destination = MemoryDestination::new();

    let mut config = ingest_config("koyun");
    config.columns.masked = vec![column("B")];
    let report = run_ingestion(config, &sources, &destination).await.unwrap();

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].file, "b.csv");
    let failure = report.failure().unwrap();
    assert_eq!(
        failure.kinds(),
        vec![ErrorKind::SchemaMismatch, ErrorKind::ColumnOutOfRange]
    );
    assert_eq!(destination.write_count().await, 1);
}

#[tokio::test]
async fn transport_failures_are_retried() {
    init_test_tracing();

    let dataset = DatasetId::new("destek").unwrap();
    let destination = MemoryDestination::new();
    run_ingestion(
        ingest_config("destek"),
        &[text_sheet("a.csv", &[&["TC", "Ad"], &["1234567890", "Ali"]])],
        &destination,
    )
    .await
    .unwrap();
    let memory: MemoryShardStore = destination.shard_store().await;

    let store = FlakyShardStore::new(memory.clone(), 2);
    let resolver = LookupResolver::new(store.clone(), fast_retry_config(3));
    let outcome = resolver.resolve(&dataset, "1234567890").await.unwrap();
    assert!(outcome.is_found());
    assert_eq!(store.calls(), 3);

    let store = FlakyShardStore::new(memory, 5);
    let resolver = LookupResolver::new(store.clone(), fast_retry_config(3));
    let err = resolver.resolve(&dataset, "1234567890").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShardFetchFailed);
    assert_eq!(store.calls(), 3);
}
