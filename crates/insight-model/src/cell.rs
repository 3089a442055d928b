//! Per-slot compliance classification taxonomy.
//!
//! Exactly one internal enum backs both label sets: the `SR_C`-style codes
//! used in the bulk report and the check-mark grid used for interactive
//! single-participant display.

use serde::{Deserialize, Serialize};

/// Classification of one (study day, slot) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Not yet evaluable: the slot is not due, or dispatch data is
    /// unavailable. Excluded from all counts. Never conflated with a miss.
    Blank,
    /// No response recorded for a slot whose send time has passed.
    NoResponse,
    /// One response, within the compliance window of the send time.
    SingleCompliant,
    /// One response, outside the compliance window.
    SingleLate,
    /// Several responses, at least one within the window.
    MultiCompliant,
    /// Several responses, none within the window.
    MultiLate,
}

impl CellState {
    /// Code used in the bulk compliance report.
    pub fn report_code(&self) -> &'static str {
        match self {
            CellState::Blank => "",
            CellState::NoResponse => "NR",
            CellState::SingleCompliant => "SR_C",
            CellState::SingleLate => "SR_NC",
            CellState::MultiCompliant => "MR_C",
            CellState::MultiLate => "MR_NC",
        }
    }

    /// Mark used in the interactive per-participant grid.
    pub fn grid_mark(&self) -> &'static str {
        match self {
            CellState::Blank => "",
            CellState::NoResponse => "NR",
            CellState::SingleCompliant => "\u{2713} SR",
            CellState::SingleLate => "\u{2717} SR",
            CellState::MultiCompliant => "\u{2713} MR",
            CellState::MultiLate => "\u{2717} MR",
        }
    }

    /// True for the two states that count toward compliance rates.
    pub fn is_compliant(&self) -> bool {
        matches!(self, CellState::SingleCompliant | CellState::MultiCompliant)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellState::Blank)
    }

    pub fn is_missed(&self) -> bool {
        matches!(self, CellState::NoResponse)
    }
}
