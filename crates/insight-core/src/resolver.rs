//! Send-time resolution.
//!
//! Turns raw dispatch-log events into a per-date, per-slot table of actual
//! send times in study wall-clock time. Scheduled clock windows say when a
//! send was supposed to happen; compliance is always measured against the
//! time it actually happened.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use insight_ingest::DispatchLog;
use insight_ingest::zone::utc_ms_to_study;
use insight_model::{Result, Schedule, Slot};

use crate::calendar::StudyDate;

/// Actual send times over a span of study dates, one optional timestamp per
/// slot per date. A `None` slot was either not yet dispatched or the log has
/// a gap; either way there is nothing to judge against.
#[derive(Debug, Clone, Default)]
pub struct SendTimes {
    per_date: BTreeMap<NaiveDate, [Option<NaiveDateTime>; 4]>,
}

impl SendTimes {
    /// Actual send time of one slot on one date, if on record.
    pub fn slot_time(&self, date: NaiveDate, slot: Slot) -> Option<NaiveDateTime> {
        self.per_date
            .get(&date)
            .and_then(|slots| slots[slot.index()])
    }

    /// All four slot times for one date.
    pub fn row(&self, date: NaiveDate) -> [Option<NaiveDateTime>; 4] {
        self.per_date.get(&date).copied().unwrap_or_default()
    }
}

/// Resolves actual send times for one schedule over the given study dates.
///
/// Each channel's events are converted from epoch-ms UTC to study
/// wall-clock time; events whose study date falls outside the span are
/// dropped. Where a channel logs more than one event on a date the first in
/// provider order wins; the gateway sends at most once per channel per day,
/// so later events are retries of the same send.
pub fn resolve_send_times(
    log: &dyn DispatchLog,
    schedule: Schedule,
    days: &[StudyDate],
) -> Result<SendTimes> {
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Ok(SendTimes::default());
    };

    let mut per_date: BTreeMap<NaiveDate, [Option<NaiveDateTime>; 4]> =
        days.iter().map(|d| (d.date, [None; 4])).collect();

    for (slot, channel) in Slot::ALL.iter().zip(schedule.channels()) {
        let events = log.events(channel)?;
        debug!(channel, events = events.len(), "dispatch events fetched");
        for event in events {
            let Some(sent_at) = utc_ms_to_study(event.first_event_ms) else {
                continue;
            };
            let date = sent_at.date();
            if date < first.date || date > last.date {
                continue;
            }
            if let Some(slots) = per_date.get_mut(&date) {
                let cell = &mut slots[slot.index()];
                if cell.is_none() {
                    *cell = Some(sent_at);
                }
            }
        }
    }

    Ok(SendTimes { per_date })
}
