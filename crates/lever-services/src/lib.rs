//! Reads and writes against the `user`, `position` and `telegram_user` tables.
//!
//! Each table gets a small `Service` wrapping a shared [`DatabaseConnection`].
//! Storage-level constraint violations come back as typed [`Error`] variants.
//!
//! [`DatabaseConnection`]: sea_orm::DatabaseConnection

pub mod database;
pub mod error;
pub mod position;
pub mod telegram_user;
pub mod user;

pub use error::{Error, Result};
