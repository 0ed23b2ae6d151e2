use thiserror::Error;

use crate::shared::{ColumnRef, ColumnRole};

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The dataset id is empty.
    #[error("`dataset_id` cannot be empty")]
    EmptyDatasetId,
    /// Header rows are 1-based.
    #[error("`header.row` must be 1 or greater")]
    HeaderRowZero,
    /// Neither a primary nor an alternate identity column is configured.
    #[error("at least one of `identity.primary` or `identity.alternate` must be set")]
    MissingIdentityColumn,
    /// Primary and alternate identity columns point to the same column.
    #[error("`identity.primary` and `identity.alternate` both reference column {0}")]
    IdentityColumnsOverlap(ColumnRef),
    /// A column was assigned more than one role.
    #[error("column {column} cannot be both {first} and {second}")]
    ConflictingColumnRoles {
        column: ColumnRef,
        first: ColumnRole,
        second: ColumnRole,
    },
    /// An identity column was also assigned a role.
    #[error("identity column {column} cannot also be {role}")]
    RoleOnIdentityColumn { column: ColumnRef, role: ColumnRole },
    /// Generic constraint violation on a single field.
    #[error("invalid value for `{field}`: {constraint}")]
    InvalidFieldValue { field: String, constraint: String },
}
