//! Column value transforms applied at ingestion time.
//!
//! Transforms are baked into the stored rows; the read path never re-applies them.

pub mod mask;
pub mod numeric;
