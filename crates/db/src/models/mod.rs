//! Row structs for the persistence layer.
//!
//! Each submodule contains a `FromRow` struct matching the table columns and a
//! conversion into the matching `pvz-core` type. Enum columns are stored as
//! text and parsed on the way out.

use std::str::FromStr;

use pvz_core::error::CoreError;

pub mod listing;
pub mod product;
pub mod pvz;
pub mod reception;
pub mod user;

/// Parse a text enum column. A value the CHECK constraint should have rejected
/// is reported as an internal error rather than a client error.
pub(crate) fn decode_column<T>(column: &str, raw: &str) -> Result<T, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    raw.parse::<T>()
        .map_err(|_| CoreError::Internal(format!("unexpected {column} value in database: {raw}")))
}
