//! SMS dispatch log access.
//!
//! The dispatch mechanism itself is out of scope; only its log is consumed.
//! Events are queried per channel and carry the first-seen timestamp in
//! epoch milliseconds UTC. Normalization to study time happens in the
//! resolver, not here.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use insight_model::{InsightError, Result};

/// One logged dispatch for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DispatchEvent {
    /// First-seen timestamp, epoch milliseconds, UTC.
    pub first_event_ms: i64,
}

/// Time-ordered event source, queryable per channel.
pub trait DispatchLog {
    /// All events for one channel, in provider order.
    ///
    /// An unreachable channel fails with `DispatchLogUnavailable`; callers
    /// skip classification for the whole participant rather than substitute
    /// partial data.
    fn events(&self, channel: &str) -> Result<Vec<DispatchEvent>>;
}

/// In-memory log for tests.
#[derive(Debug, Default)]
pub struct MemoryDispatchLog {
    channels: BTreeMap<String, Vec<DispatchEvent>>,
    unreachable: BTreeSet<String>,
}

impl MemoryDispatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one dispatch on a channel.
    pub fn record(&mut self, channel: &str, first_event_ms: i64) {
        self.channels
            .entry(channel.to_string())
            .or_default()
            .push(DispatchEvent { first_event_ms });
    }

    /// Marks a channel as unreachable, to exercise the failure path.
    pub fn mark_unreachable(&mut self, channel: &str) {
        self.unreachable.insert(channel.to_string());
    }
}

impl DispatchLog for MemoryDispatchLog {
    fn events(&self, channel: &str) -> Result<Vec<DispatchEvent>> {
        if self.unreachable.contains(channel) {
            return Err(InsightError::DispatchLogUnavailable {
                channel: channel.to_string(),
                reason: "channel marked unreachable".to_string(),
            });
        }
        Ok(self.channels.get(channel).cloned().unwrap_or_default())
    }
}

/// JSON-file-backed log used by the CLI: a map of channel name to a list
/// of epoch-ms timestamps, as exported from the gateway.
#[derive(Debug)]
pub struct JsonFileDispatchLog {
    channels: BTreeMap<String, Vec<i64>>,
}

impl JsonFileDispatchLog {
    pub fn open(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).map_err(|e| InsightError::DataSourceUnavailable {
                source_name: format!("dispatch log ({})", path.display()),
                reason: e.to_string(),
            })?;
        let channels: BTreeMap<String, Vec<i64>> =
            serde_json::from_str(&contents).map_err(|e| InsightError::DataSourceUnavailable {
                source_name: format!("dispatch log ({})", path.display()),
                reason: e.to_string(),
            })?;
        Ok(Self { channels })
    }
}

impl DispatchLog for JsonFileDispatchLog {
    fn events(&self, channel: &str) -> Result<Vec<DispatchEvent>> {
        // An absent channel means no dispatches were exported for it yet,
        // which is indistinguishable from an empty channel.
        Ok(self
            .channels
            .get(channel)
            .map(|stamps| {
                stamps
                    .iter()
                    .map(|&first_event_ms| DispatchEvent { first_event_ms })
                    .collect()
            })
            .unwrap_or_default())
    }
}
