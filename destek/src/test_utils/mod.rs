pub mod fixtures;
pub mod grid;
pub mod store;
