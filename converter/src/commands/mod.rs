pub(crate) mod datasets;
pub(crate) mod headers;
pub(crate) mod ingest;
pub(crate) mod lookup;
