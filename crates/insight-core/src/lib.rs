//! Compliance engine for the Insight SMS survey tracker.
//!
//! The pipeline for one participant: enumerate the study calendar, resolve
//! actual send times from the dispatch log, match the participant's export
//! rows per date, classify every (study day, slot) cell, and aggregate
//! rates and flags. Everything here is synchronous and pure over freshly
//! fetched inputs.

pub mod aggregate;
pub mod calendar;
pub mod classifier;
pub mod compliance;
pub mod matcher;
pub mod resolver;

pub use aggregate::{
    current_compliance_rate, flag_missing_leaderboard, flag_two_consecutive_missed,
    total_compliance_rate,
};
pub use calendar::{StudyDate, enumerate_days, has_occurred};
pub use classifier::classify_cell;
pub use compliance::{
    ComplianceSummary, DayCells, SendTimeRow, TIMING_CAVEAT, compliance_for_participant,
};
pub use matcher::match_responses;
pub use resolver::{SendTimes, resolve_send_times};
