//! Domain types, errors and store traits for the pickup-point backend.
//!
//! Zero internal dependencies, so both the database adapter and the HTTP
//! layer build on it.

pub mod error;
pub mod listing;
pub mod memory;
pub mod product;
pub mod pvz;
pub mod reception;
pub mod roles;
pub mod store;
pub mod types;
pub mod user;
