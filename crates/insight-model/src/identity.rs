//! Participant identity for matching directory records against exports.

use serde::{Deserialize, Serialize};

/// Identity used to match a participant's rows in a response export.
///
/// Matching is a case-insensitive exact comparison on initials. `age` is
/// `Some` only when two or more roster entries share the initials, in which
/// case it becomes a second discriminant. Resolved once per participant,
/// before classification begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Initials, lowercased.
    pub initials: String,
    /// Age discriminant, present only when the initials are shared.
    pub age: Option<u32>,
}

impl Identity {
    pub fn new(initials: &str, age: Option<u32>) -> Self {
        Self {
            initials: initials.trim().to_lowercase(),
            age,
        }
    }

    /// True if an export row with this name (and age, when disambiguating)
    /// belongs to this identity.
    pub fn matches(&self, name: &str, row_age: Option<u32>) -> bool {
        if name.trim().to_lowercase() != self.initials {
            return false;
        }
        match self.age {
            Some(age) => row_age == Some(age),
            None => true,
        }
    }
}
