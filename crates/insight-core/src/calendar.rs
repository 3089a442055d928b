//! Study calendar enumeration.
//!
//! Every compliance computation walks the participant's enrollment span one
//! calendar day at a time; this module owns that walk and nothing else.

use chrono::{NaiveDate, NaiveDateTime};

use insight_model::Enrollment;

/// One day of a study calendar: the one-based day number and its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyDate {
    pub day: u32,
    pub date: NaiveDate,
}

/// Enumerates every study date from enrollment start to end, inclusive.
///
/// The result is ordered, strictly increasing by one day, and numbered from
/// day 1 at the start date.
pub fn enumerate_days(enrollment: &Enrollment) -> Vec<StudyDate> {
    enrollment
        .study_start_date
        .iter_days()
        .take_while(|date| *date <= enrollment.study_end_date)
        .enumerate()
        .map(|(i, date)| StudyDate {
            day: i as u32 + 1,
            date,
        })
        .collect()
}

/// True once the given date has started in study-local time. Today counts;
/// whether a slot on today is actually due is the classifier's call.
pub fn has_occurred(date: NaiveDate, as_of: NaiveDateTime) -> bool {
    date <= as_of.date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::Schedule;

    fn enrollment(start: (i32, u32, u32), end: (i32, u32, u32)) -> Enrollment {
        Enrollment {
            participant_id: 1,
            study_start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            study_end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            phone_number: "+15555550100".to_string(),
            schedule: Schedule::Standard,
            lb_link: String::new(),
        }
    }

    #[test]
    fn fourteen_day_study_has_fourteen_dates() {
        let days = enumerate_days(&enrollment((2025, 1, 1), (2025, 1, 14)));
        assert_eq!(days.len(), 14);
        assert_eq!(days[0].day, 1);
        assert_eq!(days[13].day, 14);
        assert_eq!(days[13].date, NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
    }

    #[test]
    fn enumeration_crosses_month_boundaries() {
        let days = enumerate_days(&enrollment((2025, 1, 28), (2025, 2, 3)));
        assert_eq!(days.len(), 7);
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }

    #[test]
    fn today_has_occurred_tomorrow_has_not() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 5)
            .unwrap()
            .and_hms_opt(0, 30, 0)
            .unwrap();
        assert!(has_occurred(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(), now));
        assert!(has_occurred(NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(), now));
        assert!(!has_occurred(
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            now
        ));
    }
}
