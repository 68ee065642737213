//! Domain primitives shared by the database and HTTP layers.
//!
//! Nothing here touches I/O: error types, id aliases, form-field
//! validation, and the per-value tallies used by the incident report.

pub mod error;
pub mod incident;
pub mod report;
pub mod types;
