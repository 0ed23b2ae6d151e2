use std::fmt;
use std::path::Path;

use crate::bail;
use crate::error::{DestekResult, ErrorKind};

/// Identifier of a published dataset, used as the path segment its shards live under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetId(String);

impl DatasetId {
    /// Validates a dataset id: ASCII letters, digits, `_` and `-` only.
    pub fn new(id: impl Into<String>) -> DestekResult<Self> {
        let id = id.into();

        if id.is_empty() {
            bail!(ErrorKind::InvalidDatasetId, "Dataset id cannot be empty");
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            bail!(
                ErrorKind::InvalidDatasetId,
                "Dataset id may only contain letters, digits, `_` and `-`",
                detail = id
            );
        }

        Ok(Self(id))
    }

    /// Suggests an id from a source file name.
    ///
    /// Takes the name up to the first `.`, lowercases it and drops everything outside
    /// `[a-z0-9_]`. Returns `None` when nothing usable is left.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let name = Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file_name);
        let stem = name.split('.').next().unwrap_or_default();

        let id: String = stem
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
            .collect();

        DatasetId::new(id).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
