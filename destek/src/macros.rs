//! Shorthand for reporting ingestion and lookup failures as [`crate::error::DestekError`].
//!
//! The description is a fixed phrase naming what went wrong ("Schema mismatch"); anything that
//! varies per sheet, shard or identity number goes into the detail.

/// Builds a [`crate::error::DestekError`] from a kind, a description and, optionally, detail
/// and a source error.
///
/// Detail given positionally is rendered with `to_string`, so paths and ids can be passed
/// directly. `detail = ...` moves an already formatted [`String`] in.
///
/// ```ignore
/// destek_error!(ErrorKind::MalformedShard, "Shard document is not valid JSON", shard, source: err)
/// ```
#[macro_export]
macro_rules! destek_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::DestekError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        $crate::error::DestekError::from(($kind, $desc)).with_source($source)
    };
    ($kind:expr, $desc:expr, detail = $detail:expr) => {
        $crate::error::DestekError::from(($kind, $desc, $detail))
    };
    ($kind:expr, $desc:expr, detail = $detail:expr, source: $source:expr) => {
        $crate::error::DestekError::from(($kind, $desc, $detail)).with_source($source)
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::DestekError::from(($kind, $desc, $detail.to_string()))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        $crate::error::DestekError::from(($kind, $desc, $detail.to_string())).with_source($source)
    };
}

/// Returns early with a [`crate::error::DestekError`] built by [`destek_error!`].
///
/// Used where a sheet, shard or identity number is rejected outright.
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return ::core::result::Result::Err($crate::destek_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::destek_error!($kind, $desc, source: $source))
    };
    ($kind:expr, $desc:expr, detail = $detail:expr) => {
        return ::core::result::Result::Err($crate::destek_error!($kind, $desc, detail = $detail))
    };
    ($kind:expr, $desc:expr, detail = $detail:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::destek_error!(
            $kind,
            $desc,
            detail = $detail,
            source: $source
        ))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return ::core::result::Result::Err($crate::destek_error!($kind, $desc, $detail))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::destek_error!(
            $kind,
            $desc,
            $detail,
            source: $source
        ))
    };
}
