//! Data model for the Insight SMS survey compliance tracker.
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: daily send schedules, survey instruments, the per-slot
//! compliance cell taxonomy, enrollment records, participant identities,
//! and the error type.

pub mod cell;
pub mod enrollment;
pub mod error;
pub mod identity;
pub mod instrument;
pub mod schedule;

pub use cell::CellState;
pub use enrollment::{Enrollment, EnrollmentField, ParticipantId};
pub use error::{InsightError, Result};
pub use identity::Identity;
pub use instrument::SurveyInstrument;
pub use schedule::{Schedule, Slot, SlotWindow};
