//! Participant directory: the external key-value store of enrollments.
//!
//! The compliance core only reads from the directory; enrollment mutation
//! happens through the CRUD operations here, driven by the front end. Two
//! implementations ship: an in-memory map for tests and a JSON file store
//! for the CLI.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::info;

use insight_model::{Enrollment, EnrollmentField, InsightError, ParticipantId, Result, Schedule};

/// Key-value store of enrollment records, keyed by participant id.
pub trait ParticipantDirectory {
    /// Looks up one enrollment. A miss is `Ok(None)`, not an error.
    fn get(&self, id: ParticipantId) -> Result<Option<Enrollment>>;

    /// Inserts or replaces an enrollment.
    fn put(&mut self, enrollment: Enrollment) -> Result<()>;

    /// Field-level update. Fails with `UnknownParticipant` on a miss.
    fn update(&mut self, id: ParticipantId, field: EnrollmentField, value: &str) -> Result<()>;

    /// Removes an enrollment (participant withdrawal).
    fn delete(&mut self, id: ParticipantId) -> Result<()>;

    /// All enrollments, ordered by participant id.
    fn scan(&self) -> Result<Vec<Enrollment>>;
}

fn apply_update(
    enrollment: &mut Enrollment,
    field: EnrollmentField,
    value: &str,
) -> Result<()> {
    match field {
        EnrollmentField::StudyStartDate => {
            enrollment.study_start_date = parse_date(value)?;
        }
        EnrollmentField::StudyEndDate => {
            enrollment.study_end_date = parse_date(value)?;
        }
        EnrollmentField::PhoneNumber => {
            enrollment.phone_number = value.trim().to_string();
        }
        EnrollmentField::ScheduleType => {
            enrollment.schedule = value.parse::<Schedule>()?;
        }
        EnrollmentField::LbLink => {
            enrollment.lb_link = value.trim().to_string();
        }
    }
    Ok(())
}

fn parse_date(value: &str) -> Result<chrono::NaiveDate> {
    value
        .trim()
        .parse()
        .map_err(|_| InsightError::Configuration(format!("invalid ISO date: {value}")))
}

/// In-memory directory for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    records: BTreeMap<ParticipantId, Enrollment>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enrollments(enrollments: impl IntoIterator<Item = Enrollment>) -> Self {
        let mut dir = Self::new();
        for e in enrollments {
            dir.records.insert(e.participant_id, e);
        }
        dir
    }
}

impl ParticipantDirectory for MemoryDirectory {
    fn get(&self, id: ParticipantId) -> Result<Option<Enrollment>> {
        Ok(self.records.get(&id).cloned())
    }

    fn put(&mut self, enrollment: Enrollment) -> Result<()> {
        self.records.insert(enrollment.participant_id, enrollment);
        Ok(())
    }

    fn update(&mut self, id: ParticipantId, field: EnrollmentField, value: &str) -> Result<()> {
        let enrollment = self
            .records
            .get_mut(&id)
            .ok_or_else(|| InsightError::UnknownParticipant(id.to_string()))?;
        apply_update(enrollment, field, value)
    }

    fn delete(&mut self, id: ParticipantId) -> Result<()> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| InsightError::UnknownParticipant(id.to_string()))
    }

    fn scan(&self) -> Result<Vec<Enrollment>> {
        Ok(self.records.values().cloned().collect())
    }
}

/// JSON-file-backed directory used by the CLI.
///
/// The whole store is read on open and rewritten on every mutation; the
/// record counts here are small (tens of participants).
#[derive(Debug)]
pub struct JsonFileDirectory {
    path: PathBuf,
    records: BTreeMap<ParticipantId, Enrollment>,
}

impl JsonFileDirectory {
    pub fn open(path: PathBuf) -> Result<Self> {
        let records = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let list: Vec<Enrollment> = serde_json::from_str(&contents).map_err(|e| {
                InsightError::DataSourceUnavailable {
                    source_name: format!("participant directory ({})", path.display()),
                    reason: e.to_string(),
                }
            })?;
            list.into_iter().map(|e| (e.participant_id, e)).collect()
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, records })
    }

    fn persist(&self) -> Result<()> {
        let list: Vec<&Enrollment> = self.records.values().collect();
        let contents = serde_json::to_string_pretty(&list).map_err(|e| {
            InsightError::DataSourceUnavailable {
                source_name: format!("participant directory ({})", self.path.display()),
                reason: e.to_string(),
            }
        })?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl ParticipantDirectory for JsonFileDirectory {
    fn get(&self, id: ParticipantId) -> Result<Option<Enrollment>> {
        Ok(self.records.get(&id).cloned())
    }

    fn put(&mut self, enrollment: Enrollment) -> Result<()> {
        info!(participant_id = enrollment.participant_id, "directory put");
        self.records.insert(enrollment.participant_id, enrollment);
        self.persist()
    }

    fn update(&mut self, id: ParticipantId, field: EnrollmentField, value: &str) -> Result<()> {
        let enrollment = self
            .records
            .get_mut(&id)
            .ok_or_else(|| InsightError::UnknownParticipant(id.to_string()))?;
        apply_update(enrollment, field, value)?;
        info!(participant_id = id, field = field.as_str(), "directory update");
        self.persist()
    }

    fn delete(&mut self, id: ParticipantId) -> Result<()> {
        self.records
            .remove(&id)
            .ok_or_else(|| InsightError::UnknownParticipant(id.to_string()))?;
        info!(participant_id = id, "directory delete");
        self.persist()
    }

    fn scan(&self) -> Result<Vec<Enrollment>> {
        Ok(self.records.values().cloned().collect())
    }
}
