//! Spreadsheet ingestion: header resolution, column classification, identity hashing and the
//! sequential merge of source rows into the 100-shard accumulator.

pub mod classify;
pub mod header;
pub mod identity;
pub mod merger;
pub mod pipeline;
pub mod report;
