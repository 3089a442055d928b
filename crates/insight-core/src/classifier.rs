//! Per-cell compliance classification.
//!
//! The heart of the pipeline, and deliberately a pure function: one actual
//! send time, the matched response times, and the current clock in, one
//! `CellState` out. The full grid is a fold of this over every
//! (study day, slot) pair.

use chrono::NaiveDateTime;

use insight_model::CellState;
use insight_model::schedule::WINDOW_MINUTES;

const WINDOW_SECONDS: i64 = WINDOW_MINUTES * 60;

/// Classifies one (study day, slot) cell.
///
/// With no dispatch on record the cell stays blank no matter what responses
/// exist: without a send time there is nothing to measure against, and a
/// log gap must never read as a miss. A dispatched slot with no responses
/// is a miss only once the send time has passed.
pub fn classify_cell(
    dispatch: Option<NaiveDateTime>,
    responses: &[NaiveDateTime],
    now: NaiveDateTime,
) -> CellState {
    let Some(sent_at) = dispatch else {
        return CellState::Blank;
    };
    match responses {
        [] => {
            if now >= sent_at {
                CellState::NoResponse
            } else {
                CellState::Blank
            }
        }
        [only] => {
            if in_window(sent_at, *only) {
                CellState::SingleCompliant
            } else {
                CellState::SingleLate
            }
        }
        many => {
            if many.iter().any(|r| in_window(sent_at, *r)) {
                CellState::MultiCompliant
            } else {
                CellState::MultiLate
            }
        }
    }
}

/// True when the response landed inside the compliance window: at or after
/// the send, at most `WINDOW_MINUTES` after it, both ends inclusive.
fn in_window(sent_at: NaiveDateTime, response: NaiveDateTime) -> bool {
    let delta = response.signed_duration_since(sent_at).num_seconds();
    (0..=WINDOW_SECONDS).contains(&delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 5)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    const LATER: fn() -> NaiveDateTime = || dt(23, 0, 0);

    #[test]
    fn no_dispatch_is_blank_even_with_responses() {
        assert_eq!(classify_cell(None, &[], LATER()), CellState::Blank);
        assert_eq!(classify_cell(None, &[dt(10, 20, 0)], LATER()), CellState::Blank);
    }

    #[test]
    fn no_response_is_a_miss_only_after_the_send() {
        let sent = dt(10, 0, 0);
        assert_eq!(
            classify_cell(Some(sent), &[], dt(9, 59, 59)),
            CellState::Blank
        );
        assert_eq!(
            classify_cell(Some(sent), &[], sent),
            CellState::NoResponse
        );
        assert_eq!(
            classify_cell(Some(sent), &[], LATER()),
            CellState::NoResponse
        );
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let sent = dt(10, 0, 0);
        // Exactly at the send and exactly sixty minutes after both comply.
        assert_eq!(
            classify_cell(Some(sent), &[sent], LATER()),
            CellState::SingleCompliant
        );
        assert_eq!(
            classify_cell(Some(sent), &[dt(11, 0, 0)], LATER()),
            CellState::SingleCompliant
        );
        // One second past the window is late.
        assert_eq!(
            classify_cell(Some(sent), &[dt(11, 0, 1)], LATER()),
            CellState::SingleLate
        );
        // A response before the send never complies.
        assert_eq!(
            classify_cell(Some(sent), &[dt(9, 59, 59)], LATER()),
            CellState::SingleLate
        );
    }

    #[test]
    fn multiple_responses_comply_if_any_is_in_window() {
        let sent = dt(10, 0, 0);
        assert_eq!(
            classify_cell(Some(sent), &[dt(10, 30, 0), dt(11, 30, 0)], LATER()),
            CellState::MultiCompliant
        );
        assert_eq!(
            classify_cell(Some(sent), &[dt(11, 30, 0), dt(12, 30, 0)], LATER()),
            CellState::MultiLate
        );
    }
}
