//! Rates and flags over classified cells.

use insight_model::CellState;

/// Compliance over due slots: compliant cells over non-blank cells, as a
/// percentage rounded to two decimals. No due slots yields zero.
pub fn current_compliance_rate(cells: &[CellState]) -> f64 {
    let due = cells.iter().filter(|c| !c.is_blank()).count();
    if due == 0 {
        return 0.0;
    }
    let compliant = cells.iter().filter(|c| c.is_compliant()).count();
    round2(compliant as f64 * 100.0 / due as f64)
}

/// Compliance over the whole study: compliant cells over every scheduled
/// slot, due or not. The denominator is fixed at enrollment (56 for a
/// 14-day study), so the rate undercounts until the study ends.
pub fn total_compliance_rate(cells: &[CellState], scheduled_slots: usize) -> f64 {
    if scheduled_slots == 0 {
        return 0.0;
    }
    let compliant = cells.iter().filter(|c| c.is_compliant()).count();
    round2(compliant as f64 * 100.0 / scheduled_slots as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// True when two adjacent slots in a report row are both missed.
///
/// The row spans five slots, yesterday's last then today's four, so a miss
/// yesterday evening followed by one this morning still trips the flag.
pub fn flag_two_consecutive_missed(row: &[CellState]) -> bool {
    row.windows(2)
        .any(|pair| pair[0].is_missed() && pair[1].is_missed())
}

/// True when the slot-1 leaderboard survey was missed on a day it was
/// served, study days 5 through 12.
pub fn flag_missing_leaderboard(day_in_study: u32, slot1: CellState) -> bool {
    (5..=12).contains(&day_in_study) && slot1.is_missed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::CellState::{
        Blank, MultiCompliant, MultiLate, NoResponse, SingleCompliant, SingleLate,
    };

    #[test]
    fn current_rate_ignores_blank_cells() {
        let cells = [SingleCompliant, NoResponse, Blank, Blank];
        assert_eq!(current_compliance_rate(&cells), 50.0);
    }

    #[test]
    fn current_rate_with_nothing_due_is_zero() {
        assert_eq!(current_compliance_rate(&[Blank, Blank]), 0.0);
        assert_eq!(current_compliance_rate(&[]), 0.0);
    }

    #[test]
    fn total_rate_uses_the_fixed_denominator() {
        // 7 compliant cells against a 14-day study's 56 scheduled slots.
        let mut cells = vec![SingleCompliant; 7];
        cells.extend([Blank; 49]);
        assert_eq!(total_compliance_rate(&cells, 56), 12.5);
    }

    #[test]
    fn rates_round_to_two_decimals() {
        let cells = [SingleCompliant, NoResponse, SingleLate];
        // 1/3 compliant.
        assert_eq!(current_compliance_rate(&cells), 33.33);
    }

    #[test]
    fn adjacent_misses_trip_the_flag() {
        assert!(flag_two_consecutive_missed(&[
            NoResponse,
            NoResponse,
            SingleCompliant,
            Blank,
            Blank
        ]));
        // The pair straddling yesterday's last slot and today's first.
        assert!(flag_two_consecutive_missed(&[
            NoResponse,
            NoResponse,
            MultiCompliant,
            MultiLate,
            SingleLate
        ]));
        // Misses separated by anything else do not.
        assert!(!flag_two_consecutive_missed(&[
            NoResponse,
            SingleLate,
            NoResponse,
            Blank,
            NoResponse
        ]));
    }

    #[test]
    fn leaderboard_flag_is_bounded_to_days_five_through_twelve() {
        assert!(flag_missing_leaderboard(5, NoResponse));
        assert!(flag_missing_leaderboard(12, NoResponse));
        assert!(!flag_missing_leaderboard(4, NoResponse));
        assert!(!flag_missing_leaderboard(13, NoResponse));
        assert!(!flag_missing_leaderboard(8, SingleLate));
        assert!(!flag_missing_leaderboard(8, Blank));
    }
}
