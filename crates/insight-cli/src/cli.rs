//! CLI argument definitions for the Insight compliance tracker.

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use insight_model::ParticipantId;

#[derive(Parser)]
#[command(
    name = "insight",
    version,
    about = "SMS survey compliance tracker",
    long_about = "Track SMS survey compliance for an enrolled study cohort.\n\n\
                  Classifies each participant's responses against the actual\n\
                  dispatch times logged by the SMS gateway and reports per-slot\n\
                  compliance, rates, and follow-up flags."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage enrollment records in the participant directory.
    Participant {
        #[command(subcommand)]
        action: ParticipantAction,
    },

    /// Compute and display one participant's full compliance grid.
    Compliance {
        /// Numeric participant id.
        participant_id: ParticipantId,

        /// Evaluate as of this study-local time instead of now
        /// (e.g. 2025-01-10T16:30:00).
        #[arg(long = "as-of", value_name = "DATETIME")]
        as_of: Option<NaiveDateTime>,
    },

    /// Generate the bulk daily report for one date.
    Report {
        /// Report date (ISO, e.g. 2025-01-10).
        date: NaiveDate,

        /// Evaluate as of this study-local time instead of now.
        #[arg(long = "as-of", value_name = "DATETIME")]
        as_of: Option<NaiveDateTime>,
    },

    /// Send an ad-hoc SMS to one participant.
    Send {
        /// Numeric participant id.
        participant_id: ParticipantId,

        /// Message body.
        message: String,
    },
}

#[derive(Subcommand)]
pub enum ParticipantAction {
    /// Enroll a participant or replace an existing record.
    Add(AddArgs),

    /// Show one enrollment record.
    Get { participant_id: ParticipantId },

    /// Update one field of an enrollment record.
    Update {
        participant_id: ParticipantId,

        /// Field name: study_start_date, study_end_date, phone_number,
        /// schedule_type, or lb_link.
        field: String,

        /// New value.
        value: String,
    },

    /// Remove an enrollment record (participant withdrawal).
    Delete { participant_id: ParticipantId },

    /// List every enrollment record.
    List,
}

#[derive(Parser)]
pub struct AddArgs {
    pub participant_id: ParticipantId,

    /// First study day (ISO date).
    pub study_start_date: NaiveDate,

    /// Last study day, inclusive (ISO date).
    pub study_end_date: NaiveDate,

    /// Phone number in E.164 form.
    pub phone_number: String,

    /// Schedule name, e.g. "Standard Schedule".
    pub schedule: String,

    /// Leaderboard link.
    #[arg(long = "lb-link", default_value = "")]
    pub lb_link: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
