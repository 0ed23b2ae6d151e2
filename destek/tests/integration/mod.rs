mod fs_roundtrip_test;
mod http_store_test;
mod ingest_lookup_test;
