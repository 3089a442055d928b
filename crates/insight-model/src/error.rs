use thiserror::Error;

/// Error taxonomy for the Insight workspace.
///
/// `AmbiguousIdentity` is deliberately absent: shared initials are resolved
/// by the age discriminant, and any residual multiplicity flows into the
/// multiple-responses classification path.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Missing or invalid settings. Fatal: aborts before any computation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An external tabular source could not be read. Aborts the single
    /// computation that needed it; the failing source is named verbatim.
    #[error("data source '{source_name}' unavailable: {reason}")]
    DataSourceUnavailable { source_name: String, reason: String },

    /// A dispatch log channel could not be queried. Callers skip
    /// classification for the whole participant rather than substituting
    /// partial or stale data.
    #[error("dispatch log channel '{channel}' unreachable: {reason}")]
    DispatchLogUnavailable { channel: String, reason: String },

    /// Directory lookup miss. Surfaced as "not found", never a crash.
    #[error("participant {0} not found")]
    UnknownParticipant(String),

    #[error("invalid schedule type: {0}")]
    InvalidSchedule(String),

    #[error("study day {0} is not mapped to a survey instrument")]
    UnmappedStudyDay(u32),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InsightError>;
