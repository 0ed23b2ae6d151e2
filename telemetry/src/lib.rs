//! Tracing setup shared by the converter binary and the test suites.

pub mod tracing;
