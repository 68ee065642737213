//! Aggregate counts for the incident report.

use indexmap::IndexMap;

/// Count of incidents per distinct value, keyed in first-seen order.
pub type Tally = IndexMap<String, i64>;

/// Count occurrences of each value.
///
/// Keys keep the order in which they first appear in `values`, so a
/// report sorted by date lists the most recent severity first instead of
/// the alphabetically smallest one.
pub fn tally<'a, I>(values: I) -> Tally
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = Tally::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}
