//! Survey instruments.
//!
//! Five external exports back the four daily slots. Slot 1 is backed by one
//! of two mutually exclusive instruments depending on the study day; slots
//! 2-4 each map to a single instrument served every day.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{InsightError, Result};
use crate::schedule::Slot;

/// A survey instrument, each backed by one tabular response export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurveyInstrument {
    /// Leaderboard survey, served on study days 5-12 only.
    Survey1a,
    /// Slot-1 survey for study days 1-4 and 13-14.
    Survey1b,
    Survey2,
    Survey3,
    Survey4,
}

impl SurveyInstrument {
    pub const ALL: [SurveyInstrument; 5] = [
        SurveyInstrument::Survey1a,
        SurveyInstrument::Survey1b,
        SurveyInstrument::Survey2,
        SurveyInstrument::Survey3,
        SurveyInstrument::Survey4,
    ];

    /// Short code used in logs and diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            SurveyInstrument::Survey1a => "S1a",
            SurveyInstrument::Survey1b => "S1b",
            SurveyInstrument::Survey2 => "S2",
            SurveyInstrument::Survey3 => "S3",
            SurveyInstrument::Survey4 => "S4",
        }
    }

    /// Instrument backing slot 1 on the given study day.
    ///
    /// The rule is day-range based, not study-length based: 1b on days 1-4
    /// and 13-14, 1a on days 5-12. Days 9-12 are never reached in a 14-day
    /// study but remain mapped.
    pub fn for_study_day(study_day: u32) -> Result<SurveyInstrument> {
        match study_day {
            1..=4 | 13..=14 => Ok(SurveyInstrument::Survey1b),
            5..=12 => Ok(SurveyInstrument::Survey1a),
            other => Err(InsightError::UnmappedStudyDay(other)),
        }
    }

    /// Instrument backing the given slot on the given study day.
    pub fn for_slot(slot: Slot, study_day: u32) -> Result<SurveyInstrument> {
        match slot {
            Slot::First => Self::for_study_day(study_day),
            Slot::Second => Ok(SurveyInstrument::Survey2),
            Slot::Third => Ok(SurveyInstrument::Survey3),
            Slot::Fourth => Ok(SurveyInstrument::Survey4),
        }
    }
}

impl fmt::Display for SurveyInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
