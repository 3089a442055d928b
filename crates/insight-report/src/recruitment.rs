//! Recruitment breakdown for the daily report.

use chrono::NaiveDate;

use insight_model::Enrollment;

/// An enrollment whose study window covers the report date.
#[derive(Debug, Clone)]
pub struct ActiveEnrollment {
    pub enrollment: Enrollment,
    /// One-based day in study on the report date.
    pub day_in_study: u32,
}

/// Enrollments partitioned by where the report date falls in each study
/// window. Every enrollment lands in exactly one bucket.
#[derive(Debug, Clone, Default)]
pub struct Recruitment {
    /// Study has not started yet.
    pub inactive: Vec<Enrollment>,
    pub active: Vec<ActiveEnrollment>,
    /// Study already ended.
    pub past: Vec<Enrollment>,
}

/// Partitions enrollments relative to the report date.
pub fn partition(enrollments: Vec<Enrollment>, report_date: NaiveDate) -> Recruitment {
    let mut recruitment = Recruitment::default();
    for enrollment in enrollments {
        if enrollment.study_start_date > report_date {
            recruitment.inactive.push(enrollment);
        } else if enrollment.study_end_date < report_date {
            recruitment.past.push(enrollment);
        } else if let Some(day_in_study) = enrollment.day_in_study(report_date) {
            recruitment.active.push(ActiveEnrollment {
                enrollment,
                day_in_study,
            });
        }
    }
    recruitment
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::Schedule;

    fn enrollment(id: u32, start: u32, end: u32) -> Enrollment {
        Enrollment {
            participant_id: id,
            study_start_date: NaiveDate::from_ymd_opt(2025, 1, start).unwrap(),
            study_end_date: NaiveDate::from_ymd_opt(2025, 1, end).unwrap(),
            phone_number: "+15555550100".to_string(),
            schedule: Schedule::Standard,
            lb_link: String::new(),
        }
    }

    #[test]
    fn each_enrollment_lands_in_exactly_one_bucket() {
        let report_date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let recruitment = partition(
            vec![
                enrollment(1, 12, 25), // not started
                enrollment(2, 3, 16),  // mid-study
                enrollment(3, 1, 9),   // ended yesterday
                enrollment(4, 10, 23), // starts today
            ],
            report_date,
        );

        assert_eq!(recruitment.inactive.len(), 1);
        assert_eq!(recruitment.past.len(), 1);
        assert_eq!(recruitment.active.len(), 2);
        assert_eq!(recruitment.active[0].day_in_study, 8);
        assert_eq!(recruitment.active[1].day_in_study, 1);
    }
}
