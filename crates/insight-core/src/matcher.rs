//! Response matching.
//!
//! A pure filter from one instrument's export rows down to the timestamps
//! belonging to one identity on one study date. Rows that lost their
//! timestamp at ingest can never match; their count is surfaced elsewhere.

use chrono::{NaiveDate, NaiveDateTime};

use insight_ingest::ResponseExport;
use insight_model::Identity;

/// All of one identity's response times in an export on one study date, in
/// export order. Zero matches is a valid outcome, not an error.
pub fn match_responses(
    export: &ResponseExport,
    date: NaiveDate,
    identity: &Identity,
) -> Vec<NaiveDateTime> {
    export
        .rows
        .iter()
        .filter(|row| row.local_date() == Some(date))
        .filter(|row| identity.matches(&row.name, row.age))
        .filter_map(|row| row.taken_at)
        .collect()
}
