//! Single-participant compliance computation.
//!
//! Pulls one enrollment, resolves the identity and actual send times, then
//! folds the classifier over every (study day, slot) cell. Every run works
//! on freshly loaded inputs; nothing is cached across invocations.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use insight_ingest::{DispatchLog, ExportSet, ParticipantDirectory, Roster};
use insight_model::{
    CellState, Identity, InsightError, ParticipantId, Result, Schedule, Slot, SurveyInstrument,
};

use crate::aggregate::{current_compliance_rate, total_compliance_rate};
use crate::calendar::{enumerate_days, has_occurred};
use crate::classifier::classify_cell;
use crate::matcher::match_responses;
use crate::resolver::resolve_send_times;

/// Standing caveat attached to every summary. Right around a send the log
/// already carries the dispatch while the matching response may still be in
/// flight, so a cell can read NR for up to an hour before settling.
pub const TIMING_CAVEAT: &str = "Cells whose send window is still open may show NR while a \
     response is in flight; re-check after the window closes.";

/// One classified study day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCells {
    pub day: u32,
    pub date: NaiveDate,
    pub slots: [CellState; 4],
}

/// Resolved send times for one study day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTimeRow {
    pub day: u32,
    pub date: NaiveDate,
    pub slots: [Option<NaiveDateTime>; 4],
}

/// The full compliance picture for one participant.
#[derive(Debug, Clone)]
pub struct ComplianceSummary {
    pub participant_id: ParticipantId,
    pub identity: Identity,
    /// Age on file in the roster. Distinct from `identity.age`, which is
    /// set only when the initials need disambiguating.
    pub age: u32,
    pub schedule: Schedule,
    pub days: Vec<DayCells>,
    pub send_times: Vec<SendTimeRow>,
    /// Compliant over due (non-blank) cells, percent.
    pub rate_current: f64,
    /// Compliant over every scheduled slot of the study, percent.
    pub rate_total: f64,
    /// Always present; degraded-data notes append to the standing caveat.
    pub diagnostic: String,
}

/// Computes the compliance summary for one participant as of `now` (study
/// local time).
///
/// Fails with `UnknownParticipant` when the directory or roster has no
/// record, and propagates source failures from the dispatch log. Malformed
/// data inside the grid degrades single cells to blank with a note; it
/// never aborts the computation.
pub fn compliance_for_participant(
    directory: &dyn ParticipantDirectory,
    log: &dyn DispatchLog,
    exports: &ExportSet,
    roster: &Roster,
    participant_id: ParticipantId,
    now: NaiveDateTime,
) -> Result<ComplianceSummary> {
    let enrollment = directory
        .get(participant_id)?
        .ok_or_else(|| InsightError::UnknownParticipant(participant_id.to_string()))?;
    let identity = roster.resolve_identity(participant_id)?;
    let age = roster
        .age_of(participant_id)
        .ok_or_else(|| InsightError::UnknownParticipant(participant_id.to_string()))?;
    let days = enumerate_days(&enrollment);
    let send_times = resolve_send_times(log, enrollment.schedule, &days)?;

    let mut notes = Vec::new();
    let unparseable = exports.unparseable_rows();
    if unparseable > 0 {
        notes.push(format!(
            "{unparseable} export row(s) had unparseable timestamps and were ignored."
        ));
    }

    let mut day_cells = Vec::with_capacity(days.len());
    let mut time_rows = Vec::with_capacity(days.len());
    for study_date in &days {
        let mut slots = [CellState::Blank; 4];
        // Days that have not started yet stay blank and are never matched
        // against the exports.
        if has_occurred(study_date.date, now) {
            for slot in Slot::ALL {
                let dispatch = send_times.slot_time(study_date.date, slot);
                slots[slot.index()] = match SurveyInstrument::for_slot(slot, study_date.day) {
                    Ok(instrument) => {
                        let responses = match_responses(
                            exports.for_instrument(instrument),
                            study_date.date,
                            &identity,
                        );
                        classify_cell(dispatch, &responses, now)
                    }
                    Err(InsightError::UnmappedStudyDay(day)) => {
                        notes.push(format!(
                            "day {day} has no slot-1 instrument mapping; cell left blank."
                        ));
                        CellState::Blank
                    }
                    Err(e) => return Err(e),
                };
            }
        }
        day_cells.push(DayCells {
            day: study_date.day,
            date: study_date.date,
            slots,
        });
        time_rows.push(SendTimeRow {
            day: study_date.day,
            date: study_date.date,
            slots: send_times.row(study_date.date),
        });
    }

    let all_cells: Vec<CellState> = day_cells.iter().flat_map(|d| d.slots).collect();
    let scheduled_slots = days.len() * Slot::ALL.len();
    let rate_current = current_compliance_rate(&all_cells);
    let rate_total = total_compliance_rate(&all_cells, scheduled_slots);
    debug!(
        participant_id,
        rate_current, rate_total, "compliance computed"
    );

    let mut diagnostic = TIMING_CAVEAT.to_string();
    for note in notes {
        diagnostic.push('\n');
        diagnostic.push_str(&note);
    }

    Ok(ComplianceSummary {
        participant_id,
        identity,
        age,
        schedule: enrollment.schedule,
        days: day_cells,
        send_times: time_rows,
        rate_current,
        rate_total,
        diagnostic,
    })
}
