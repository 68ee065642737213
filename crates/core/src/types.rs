/// Primary keys of `users` and `incidents` are PostgreSQL SERIAL (INT4).
pub type DbId = i32;

/// Incident dates are calendar dates with no time component.
pub type IncidentDate = chrono::NaiveDate;
