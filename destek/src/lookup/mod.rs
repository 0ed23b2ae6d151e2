//! Read path: resolving an identity number to its stored records.

mod outcome;
mod resolver;
pub mod retry;

pub use outcome::{LookupOutcome, NamedRecord};
pub use resolver::LookupResolver;
