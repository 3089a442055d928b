//! Bulk daily reporting for the Insight compliance tracker.

pub mod daily;
pub mod recruitment;

pub use daily::{ComplianceRow, DailyReport, ScheduleSendTimes, generate_report};
pub use recruitment::{ActiveEnrollment, Recruitment, partition};
