//! End-to-end compliance scenarios over in-memory sources.
//!
//! Each scenario wires a directory, dispatch log, roster, and export set by
//! hand, then checks the classified grid and rates for one participant.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::America::New_York;

use insight_core::{TIMING_CAVEAT, compliance_for_participant};
use insight_ingest::{
    ExportSet, MemoryDirectory, MemoryDispatchLog, ResponseExport, ResponseRow, Roster,
    RosterEntry,
};
use insight_model::{CellState, Enrollment, InsightError, Schedule, SurveyInstrument};

fn eastern_ms(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
    New_York
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
        .timestamp_millis()
}

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn directory() -> MemoryDirectory {
    MemoryDirectory::with_enrollments([Enrollment {
        participant_id: 1,
        study_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        study_end_date: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
        phone_number: "+15555550100".to_string(),
        schedule: Schedule::Standard,
        lb_link: String::new(),
    }])
}

fn roster() -> Roster {
    Roster::from_entries(vec![RosterEntry {
        participant_id: 1,
        initials: "AB".to_string(),
        age: 27,
    }])
}

fn empty_export(instrument: SurveyInstrument) -> ResponseExport {
    ResponseExport {
        instrument,
        rows: Vec::new(),
        unparseable_rows: 0,
    }
}

/// Export set with the given rows in one instrument, all others empty.
fn exports_with(instrument: SurveyInstrument, rows: Vec<ResponseRow>) -> ExportSet {
    let mut set = ExportSet {
        survey_1a: empty_export(SurveyInstrument::Survey1a),
        survey_1b: empty_export(SurveyInstrument::Survey1b),
        survey_2: empty_export(SurveyInstrument::Survey2),
        survey_3: empty_export(SurveyInstrument::Survey3),
        survey_4: empty_export(SurveyInstrument::Survey4),
    };
    match instrument {
        SurveyInstrument::Survey1a => set.survey_1a.rows = rows,
        SurveyInstrument::Survey1b => set.survey_1b.rows = rows,
        SurveyInstrument::Survey2 => set.survey_2.rows = rows,
        SurveyInstrument::Survey3 => set.survey_3.rows = rows,
        SurveyInstrument::Survey4 => set.survey_4.rows = rows,
    }
    set
}

fn row(taken_at: NaiveDateTime) -> ResponseRow {
    ResponseRow {
        name: "AB".to_string(),
        age: Some(27),
        taken_at: Some(taken_at),
    }
}

const NOW: fn() -> NaiveDateTime = || dt(2025, 1, 14, 23, 59);

#[test]
fn single_response_in_window_is_compliant() {
    let mut log = MemoryDispatchLog::new();
    // Slot 1 went out at 09:56 Eastern on study day 5, which is served by
    // the leaderboard survey.
    log.record("standard_schedule_message1", eastern_ms(2025, 1, 5, 9, 56));
    let exports = exports_with(SurveyInstrument::Survey1a, vec![row(dt(2025, 1, 5, 10, 20))]);

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    let day5 = &summary.days[4];
    assert_eq!(day5.day, 5);
    assert_eq!(day5.slots[0], CellState::SingleCompliant);
}

#[test]
fn single_response_past_the_window_is_late() {
    let mut log = MemoryDispatchLog::new();
    log.record("standard_schedule_message1", eastern_ms(2025, 1, 5, 9, 56));
    // 74 minutes after the send.
    let exports = exports_with(SurveyInstrument::Survey1a, vec![row(dt(2025, 1, 5, 11, 10))]);

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    assert_eq!(summary.days[4].slots[0], CellState::SingleLate);
}

#[test]
fn dispatched_slot_with_no_response_is_a_miss() {
    let mut log = MemoryDispatchLog::new();
    log.record("standard_schedule_message2", eastern_ms(2025, 1, 5, 14, 1));
    let exports = exports_with(SurveyInstrument::Survey2, Vec::new());

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    assert_eq!(summary.days[4].slots[1], CellState::NoResponse);
}

#[test]
fn undispatched_slot_stays_blank_despite_responses() {
    let log = MemoryDispatchLog::new();
    let exports = exports_with(SurveyInstrument::Survey2, vec![row(dt(2025, 1, 5, 14, 20))]);

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    for day in &summary.days {
        for cell in day.slots {
            assert_eq!(cell, CellState::Blank);
        }
    }
    assert_eq!(summary.rate_current, 0.0);
}

#[test]
fn multiple_responses_comply_when_one_is_in_window() {
    let mut log = MemoryDispatchLog::new();
    log.record("standard_schedule_message3", eastern_ms(2025, 1, 5, 18, 0));
    let exports = exports_with(
        SurveyInstrument::Survey3,
        vec![row(dt(2025, 1, 5, 18, 30)), row(dt(2025, 1, 5, 19, 30))],
    );

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    assert_eq!(summary.days[4].slots[2], CellState::MultiCompliant);
}

#[test]
fn rates_use_their_respective_denominators() {
    let mut log = MemoryDispatchLog::new();
    // Two dispatches over the study: one answered in window, one missed.
    log.record("standard_schedule_message2", eastern_ms(2025, 1, 3, 14, 0));
    log.record("standard_schedule_message3", eastern_ms(2025, 1, 3, 18, 0));
    let exports = exports_with(SurveyInstrument::Survey2, vec![row(dt(2025, 1, 3, 14, 30))]);

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    // Current: 1 compliant of 2 due. Total: 1 of 56 scheduled.
    assert_eq!(summary.rate_current, 50.0);
    assert_eq!(summary.rate_total, 1.79);
}

#[test]
fn send_time_table_carries_the_resolved_times() {
    let mut log = MemoryDispatchLog::new();
    log.record("standard_schedule_message1", eastern_ms(2025, 1, 5, 9, 56));

    let exports = exports_with(SurveyInstrument::Survey2, Vec::new());
    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    let row = &summary.send_times[4];
    assert_eq!(row.date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    assert_eq!(row.slots[0], Some(dt(2025, 1, 5, 9, 56)));
    assert_eq!(row.slots[1], None);
}

#[test]
fn summary_carries_the_roster_age_for_unique_initials() {
    let log = MemoryDispatchLog::new();
    let exports = exports_with(SurveyInstrument::Survey2, Vec::new());

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    // The initials are unique, so the identity needs no age discriminant,
    // but the age on file still surfaces in the summary.
    assert_eq!(summary.identity.age, None);
    assert_eq!(summary.age, 27);
}

#[test]
fn days_after_the_evaluation_time_stay_blank() {
    let mut log = MemoryDispatchLog::new();
    // A dispatch and a matching response dated three days past the
    // evaluation time; clock skew like this must not classify.
    log.record("standard_schedule_message2", eastern_ms(2025, 1, 10, 14, 0));
    let exports = exports_with(SurveyInstrument::Survey2, vec![row(dt(2025, 1, 10, 14, 20))]);

    let summary = compliance_for_participant(
        &directory(),
        &log,
        &exports,
        &roster(),
        1,
        dt(2025, 1, 7, 12, 0),
    )
    .unwrap();

    assert_eq!(summary.days[9].slots[1], CellState::Blank);
    assert_eq!(summary.rate_current, 0.0);
}

#[test]
fn diagnostic_always_carries_the_standing_caveat() {
    let log = MemoryDispatchLog::new();
    let exports = exports_with(SurveyInstrument::Survey2, Vec::new());

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    assert!(summary.diagnostic.contains(TIMING_CAVEAT));
}

#[test]
fn unparseable_rows_are_noted_in_the_diagnostic() {
    let log = MemoryDispatchLog::new();
    let mut exports = exports_with(SurveyInstrument::Survey2, Vec::new());
    exports.survey_2.unparseable_rows = 3;

    let summary =
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()).unwrap();

    assert!(summary.diagnostic.contains("3 export row(s)"));
}

#[test]
fn unknown_participant_is_an_error_not_a_panic() {
    let log = MemoryDispatchLog::new();
    let exports = exports_with(SurveyInstrument::Survey2, Vec::new());

    assert!(matches!(
        compliance_for_participant(&directory(), &log, &exports, &roster(), 99, NOW()),
        Err(InsightError::UnknownParticipant(_))
    ));
}

#[test]
fn unreachable_dispatch_channel_aborts_the_whole_computation() {
    let mut log = MemoryDispatchLog::new();
    log.mark_unreachable("standard_schedule_message1");
    let exports = exports_with(SurveyInstrument::Survey2, Vec::new());

    assert!(matches!(
        compliance_for_participant(&directory(), &log, &exports, &roster(), 1, NOW()),
        Err(InsightError::DispatchLogUnavailable { .. })
    ));
}
