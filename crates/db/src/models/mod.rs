//! Typed row structs and input DTOs.
//!
//! Rows are decoded by column name via `FromRow`; a result set that does
//! not carry the expected columns fails to decode instead of producing a
//! half-filled record.

pub mod incident;
pub mod user;
