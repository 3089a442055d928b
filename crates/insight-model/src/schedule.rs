//! Daily send schedules.
//!
//! Every participant is assigned one of three schedules. A schedule fixes
//! four daily send slots: a 60-minute clock window per slot and the dispatch
//! channel the SMS gateway logs that slot under. The catalog is a pure
//! lookup table with no I/O.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InsightError;

/// Width of a slot window and of the compliance window, in minutes.
pub const WINDOW_MINUTES: i64 = 60;

/// One of the four daily survey-send opportunities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    First,
    Second,
    Third,
    Fourth,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::First, Slot::Second, Slot::Third, Slot::Fourth];

    /// Zero-based index for array addressing.
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
            Slot::Third => 2,
            Slot::Fourth => 3,
        }
    }

    /// One-based slot number as shown in reports.
    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.number())
    }
}

/// Clock-time window for one slot on any study date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Participant send schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Schedule {
    EarlyBird,
    Standard,
    NightOwl,
}

impl Schedule {
    pub const ALL: [Schedule; 3] = [Schedule::EarlyBird, Schedule::Standard, Schedule::NightOwl];

    /// Canonical string as stored in the participant directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Schedule::EarlyBird => "Early Bird Schedule",
            Schedule::Standard => "Standard Schedule",
            Schedule::NightOwl => "Night Owl Schedule",
        }
    }

    /// Short label used in report headings.
    pub fn label(&self) -> &'static str {
        match self {
            Schedule::EarlyBird => "Early Bird",
            Schedule::Standard => "Standard",
            Schedule::NightOwl => "Night Owl",
        }
    }

    /// Scheduled send hours, one per slot.
    fn slot_hours(&self) -> [u32; 4] {
        match self {
            Schedule::EarlyBird => [8, 12, 16, 20],
            Schedule::Standard => [10, 14, 18, 21],
            Schedule::NightOwl => [11, 15, 19, 22],
        }
    }

    /// Clock windows for the four daily slots. Each window opens at the
    /// scheduled send time and closes `WINDOW_MINUTES` later.
    pub fn windows(&self) -> [SlotWindow; 4] {
        self.slot_hours().map(|hour| SlotWindow {
            start: clock(hour, 0),
            end: clock(hour, WINDOW_MINUTES as u32),
        })
    }

    /// Scheduled window start for one slot.
    pub fn window_start(&self, slot: Slot) -> NaiveTime {
        self.windows()[slot.index()].start
    }

    /// Dispatch-channel identifiers, one per slot, matching the names the
    /// SMS gateway logs each slot under.
    pub fn channels(&self) -> [&'static str; 4] {
        match self {
            Schedule::EarlyBird => [
                "early_bird_schedule_message1",
                "early_bird_schedule_message2",
                "early_bird_schedule_message3",
                "early_bird_schedule_message4",
            ],
            Schedule::Standard => [
                "standard_schedule_message1",
                "standard_schedule_message2",
                "standard_schedule_message3",
                "standard_schedule_message4",
            ],
            Schedule::NightOwl => [
                "night_owl_schedule_message1",
                "night_owl_schedule_message2",
                "night_owl_schedule_message3",
                "night_owl_schedule_message4",
            ],
        }
    }
}

fn clock(hour: u32, extra_minutes: u32) -> NaiveTime {
    let total = hour * 60 + extra_minutes;
    NaiveTime::from_hms_opt(total / 60 % 24, total % 60, 0).expect("valid clock time")
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Schedule {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Early Bird Schedule" | "Early Bird" | "early_bird" => Ok(Schedule::EarlyBird),
            "Standard Schedule" | "Standard" | "standard" => Ok(Schedule::Standard),
            "Night Owl Schedule" | "Night Owl" | "night_owl" => Ok(Schedule::NightOwl),
            other => Err(InsightError::InvalidSchedule(other.to_string())),
        }
    }
}
