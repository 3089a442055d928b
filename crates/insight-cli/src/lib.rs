//! CLI library components for the Insight compliance tracker.

pub mod logging;
