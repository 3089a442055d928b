//! Enrollment records as stored in the participant directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InsightError;
use crate::schedule::Schedule;

/// Numeric participant key.
pub type ParticipantId = u32;

/// One participant's enrollment record.
///
/// Owned by the external directory; the compliance core only reads it.
/// Invariant: `study_end_date >= study_start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub participant_id: ParticipantId,
    pub study_start_date: NaiveDate,
    pub study_end_date: NaiveDate,
    pub phone_number: String,
    pub schedule: Schedule,
    /// Leaderboard link; possibly empty.
    #[serde(default)]
    pub lb_link: String,
}

impl Enrollment {
    /// Inclusive study length in days.
    pub fn study_length_days(&self) -> i64 {
        self.study_end_date
            .signed_duration_since(self.study_start_date)
            .num_days()
            + 1
    }

    /// One-based day in study as of `date`, if the study has started.
    pub fn day_in_study(&self, date: NaiveDate) -> Option<u32> {
        let offset = date.signed_duration_since(self.study_start_date).num_days();
        if offset < 0 {
            None
        } else {
            Some(offset as u32 + 1)
        }
    }
}

/// Mutable enrollment fields, for directory field-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentField {
    StudyStartDate,
    StudyEndDate,
    PhoneNumber,
    ScheduleType,
    LbLink,
}

impl EnrollmentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentField::StudyStartDate => "study_start_date",
            EnrollmentField::StudyEndDate => "study_end_date",
            EnrollmentField::PhoneNumber => "phone_number",
            EnrollmentField::ScheduleType => "schedule_type",
            EnrollmentField::LbLink => "lb_link",
        }
    }
}

impl fmt::Display for EnrollmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnrollmentField {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "study_start_date" => Ok(EnrollmentField::StudyStartDate),
            "study_end_date" => Ok(EnrollmentField::StudyEndDate),
            "phone_number" => Ok(EnrollmentField::PhoneNumber),
            "schedule_type" => Ok(EnrollmentField::ScheduleType),
            "lb_link" => Ok(EnrollmentField::LbLink),
            other => Err(InsightError::Configuration(format!(
                "unknown enrollment field: {other}"
            ))),
        }
    }
}
