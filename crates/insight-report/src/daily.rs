//! Daily bulk report generation.
//!
//! One pass over every enrollment: partition by recruitment status, resolve
//! the three schedule grids for the report date and the day before, then
//! classify a five-cell row per active participant spanning yesterday's
//! last slot and today's four.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use insight_core::{
    StudyDate, classify_cell, flag_missing_leaderboard, flag_two_consecutive_missed,
    match_responses, resolve_send_times,
};
use insight_ingest::{DispatchLog, ExportSet, ParticipantDirectory, Roster};
use insight_model::{
    CellState, InsightError, ParticipantId, Result, Schedule, Slot, SurveyInstrument,
};

use crate::recruitment::{Recruitment, partition};

/// Resolved send times for one schedule, for the report date and the day
/// before. Independent of any participant.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleSendTimes {
    pub schedule: Schedule,
    pub previous: [Option<NaiveDateTime>; 4],
    pub current: [Option<NaiveDateTime>; 4],
}

/// One active participant's classified row: yesterday's last slot followed
/// by today's four.
#[derive(Debug, Clone)]
pub struct ComplianceRow {
    pub participant_id: ParticipantId,
    pub initials: String,
    pub day_in_study: u32,
    pub cells: [CellState; 5],
}

/// The assembled daily report.
#[derive(Debug, Clone)]
pub struct DailyReport {
    pub report_date: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub recruitment: Recruitment,
    pub send_times: Vec<ScheduleSendTimes>,
    pub compliance: Vec<ComplianceRow>,
    /// Participants with two adjacent misses in their row.
    pub two_consecutive_missed: Vec<ParticipantId>,
    /// Participants who missed the leaderboard survey on a day it was served.
    pub missing_leaderboard: Vec<ParticipantId>,
    pub diagnostics: Vec<String>,
}

fn schedule_index(schedule: Schedule) -> usize {
    match schedule {
        Schedule::EarlyBird => 0,
        Schedule::Standard => 1,
        Schedule::NightOwl => 2,
    }
}

/// Generates the bulk report for one date as of `now` (study local time).
pub fn generate_report(
    directory: &dyn ParticipantDirectory,
    log: &dyn DispatchLog,
    exports: &ExportSet,
    roster: &Roster,
    report_date: NaiveDate,
    now: NaiveDateTime,
) -> Result<DailyReport> {
    let previous_date = report_date.pred_opt().ok_or_else(|| {
        InsightError::Configuration(format!("report date {report_date} has no previous day"))
    })?;

    let recruitment = partition(directory.scan()?, report_date);
    debug!(
        inactive = recruitment.inactive.len(),
        active = recruitment.active.len(),
        past = recruitment.past.len(),
        "enrollments partitioned"
    );

    let span = [
        StudyDate {
            day: 1,
            date: previous_date,
        },
        StudyDate {
            day: 2,
            date: report_date,
        },
    ];
    let mut send_times = Vec::with_capacity(Schedule::ALL.len());
    let mut resolved = Vec::with_capacity(Schedule::ALL.len());
    for schedule in Schedule::ALL {
        let times = resolve_send_times(log, schedule, &span)?;
        send_times.push(ScheduleSendTimes {
            schedule,
            previous: times.row(previous_date),
            current: times.row(report_date),
        });
        resolved.push(times);
    }

    let mut diagnostics = Vec::new();
    let unparseable = exports.unparseable_rows();
    if unparseable > 0 {
        diagnostics.push(format!(
            "{unparseable} export row(s) had unparseable timestamps and were ignored."
        ));
    }

    let mut compliance = Vec::with_capacity(recruitment.active.len());
    for active in &recruitment.active {
        let enrollment = &active.enrollment;
        let identity = match roster.resolve_identity(enrollment.participant_id) {
            Ok(identity) => identity,
            Err(InsightError::UnknownParticipant(_)) => {
                warn!(
                    participant_id = enrollment.participant_id,
                    "active participant missing from roster; row skipped"
                );
                diagnostics.push(format!(
                    "participant {} is missing from the roster; compliance row skipped.",
                    enrollment.participant_id
                ));
                continue;
            }
            Err(e) => return Err(e),
        };
        let times = &resolved[schedule_index(enrollment.schedule)];

        let mut cells = [CellState::Blank; 5];
        // Yesterday's last slot is always the slot-4 survey.
        let prev_responses = match_responses(
            exports.for_instrument(SurveyInstrument::Survey4),
            previous_date,
            &identity,
        );
        cells[0] = classify_cell(
            times.slot_time(previous_date, Slot::Fourth),
            &prev_responses,
            now,
        );

        for slot in Slot::ALL {
            let dispatch = times.slot_time(report_date, slot);
            cells[slot.index() + 1] =
                match SurveyInstrument::for_slot(slot, active.day_in_study) {
                    Ok(instrument) => {
                        let responses = match_responses(
                            exports.for_instrument(instrument),
                            report_date,
                            &identity,
                        );
                        classify_cell(dispatch, &responses, now)
                    }
                    Err(InsightError::UnmappedStudyDay(_)) => CellState::Blank,
                    Err(e) => return Err(e),
                };
        }

        compliance.push(ComplianceRow {
            participant_id: enrollment.participant_id,
            initials: identity.initials,
            day_in_study: active.day_in_study,
            cells,
        });
    }

    let two_consecutive_missed = compliance
        .iter()
        .filter(|row| flag_two_consecutive_missed(&row.cells))
        .map(|row| row.participant_id)
        .collect();
    let missing_leaderboard = compliance
        .iter()
        .filter(|row| flag_missing_leaderboard(row.day_in_study, row.cells[1]))
        .map(|row| row.participant_id)
        .collect();

    Ok(DailyReport {
        report_date,
        generated_at: now,
        recruitment,
        send_times,
        compliance,
        two_consecutive_missed,
        missing_leaderboard,
        diagnostics,
    })
}
