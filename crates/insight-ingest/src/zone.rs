//! Time-zone normalization.
//!
//! Three zones are in play: the dispatch log stores epoch-ms UTC, the survey
//! tool exports wall-clock times in its own zone, and all compliance math
//! happens in the study's fixed local zone. Everything is normalized to the
//! study zone before any date or slot comparison.

use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Fixed local zone of the study site.
pub const STUDY_ZONE: Tz = chrono_tz::America::New_York;

/// Zone the survey tool stamps export rows in.
pub const EXPORT_ZONE: Tz = chrono_tz::America::Denver;

/// Converts a dispatch-log timestamp (epoch ms, UTC) to study wall-clock time.
pub fn utc_ms_to_study(ms: i64) -> Option<NaiveDateTime> {
    let utc = Utc.timestamp_millis_opt(ms).single()?;
    Some(utc.with_timezone(&STUDY_ZONE).naive_local())
}

/// Re-zones an export wall-clock timestamp into study wall-clock time.
///
/// Ambiguous local times (the fall-back DST hour) resolve to the earlier
/// instant; nonexistent local times (the spring-forward gap) yield `None`.
pub fn export_local_to_study(local: NaiveDateTime) -> Option<NaiveDateTime> {
    let zoned = EXPORT_ZONE.from_local_datetime(&local).earliest()?;
    Some(zoned.with_timezone(&STUDY_ZONE).naive_local())
}
