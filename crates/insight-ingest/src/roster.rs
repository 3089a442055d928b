//! Participant roster loading and identity resolution.
//!
//! The roster is the tabular bridge between numeric directory keys and the
//! names participants type into the survey tool: columns
//! `Participant ID #`, `ID` (initials), and `Age`.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use insight_model::{Identity, InsightError, ParticipantId, Result};

/// One roster row.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub participant_id: ParticipantId,
    pub initials: String,
    pub age: u32,
}

/// The loaded roster.
#[derive(Debug, Clone)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| source_error(path, &e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| source_error(path, &e.to_string()))?
            .clone();
        let id_idx = position(&headers, "Participant ID #")
            .ok_or_else(|| source_error(path, "missing 'Participant ID #' column"))?;
        let initials_idx =
            position(&headers, "ID").ok_or_else(|| source_error(path, "missing 'ID' column"))?;
        let age_idx =
            position(&headers, "Age").ok_or_else(|| source_error(path, "missing 'Age' column"))?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| source_error(path, &e.to_string()))?;
            let Some(participant_id) = record.get(id_idx).and_then(|v| v.trim().parse().ok())
            else {
                continue;
            };
            let Some(age) = record.get(age_idx).and_then(|v| v.trim().parse().ok()) else {
                continue;
            };
            let initials = record.get(initials_idx).unwrap_or("").trim().to_string();
            if initials.is_empty() {
                continue;
            }
            entries.push(RosterEntry {
                participant_id,
                initials,
                age,
            });
        }
        debug!(entries = entries.len(), "roster loaded");
        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Resolves the matching identity for one participant.
    ///
    /// The age discriminant is attached only when another roster entry
    /// shares the initials (case-insensitive). Computed once per
    /// participant, before any classification.
    pub fn resolve_identity(&self, participant_id: ParticipantId) -> Result<Identity> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.participant_id == participant_id)
            .ok_or_else(|| InsightError::UnknownParticipant(participant_id.to_string()))?;

        let shared = self
            .entries
            .iter()
            .filter(|e| e.initials.eq_ignore_ascii_case(&entry.initials))
            .count()
            > 1;
        let age = shared.then_some(entry.age);
        Ok(Identity::new(&entry.initials, age))
    }

    /// Age on file for one participant, if present.
    pub fn age_of(&self, participant_id: ParticipantId) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.participant_id == participant_id)
            .map(|e| e.age)
    }
}

fn position(headers: &csv::StringRecord, wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().trim_matches('\u{feff}').eq_ignore_ascii_case(wanted))
}

fn source_error(path: &Path, reason: &str) -> InsightError {
    InsightError::DataSourceUnavailable {
        source_name: format!("participant roster ({})", path.display()),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn roster() -> Roster {
        Roster::from_entries(vec![
            RosterEntry {
                participant_id: 1,
                initials: "AB".to_string(),
                age: 27,
            },
            RosterEntry {
                participant_id: 2,
                initials: "ab".to_string(),
                age: 41,
            },
            RosterEntry {
                participant_id: 3,
                initials: "CD".to_string(),
                age: 30,
            },
        ])
    }

    #[test]
    fn shared_initials_gain_the_age_discriminant() {
        let identity = roster().resolve_identity(1).unwrap();
        assert_eq!(identity.initials, "ab");
        assert_eq!(identity.age, Some(27));
    }

    #[test]
    fn unique_initials_match_on_name_alone() {
        let identity = roster().resolve_identity(3).unwrap();
        assert_eq!(identity.initials, "cd");
        assert_eq!(identity.age, None);
    }

    #[test]
    fn unknown_participant_is_not_found() {
        assert!(matches!(
            roster().resolve_identity(99),
            Err(InsightError::UnknownParticipant(_))
        ));
    }

    #[test]
    fn loads_from_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Participant ID #,ID,Age\n1,AB,27\n2,CD,30\n")
            .unwrap();
        let roster = Roster::load(file.path()).unwrap();
        assert_eq!(roster.entries().len(), 2);
        assert_eq!(roster.age_of(2), Some(30));
    }
}
