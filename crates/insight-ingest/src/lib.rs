//! External data sources for the Insight compliance pipeline.
//!
//! Everything the core consumes from outside the process lives behind this
//! crate: survey response exports (CSV), the participant roster (CSV), the
//! participant directory (key-value store), the SMS dispatch log, and the
//! notification sender. Directory, log, and sender are traits so the core
//! stays testable without live services.

pub mod directory;
pub mod dispatch;
pub mod export;
pub mod notify;
pub mod roster;
pub mod zone;

pub use directory::{JsonFileDirectory, MemoryDirectory, ParticipantDirectory};
pub use dispatch::{DispatchEvent, DispatchLog, JsonFileDispatchLog, MemoryDispatchLog};
pub use export::{ExportSet, ResponseExport, ResponseRow};
pub use notify::{LoggingSender, NotificationSender};
pub use roster::{Roster, RosterEntry};
