//! Command implementations.

use anyhow::{Context, Result, anyhow, ensure};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use tracing::info;

use insight_core::compliance_for_participant;
use insight_ingest::zone::STUDY_ZONE;
use insight_ingest::{LoggingSender, NotificationSender, ParticipantDirectory};
use insight_model::{Enrollment, EnrollmentField, ParticipantId, Schedule};
use insight_report::generate_report;

use crate::cli::{AddArgs, ParticipantAction};
use crate::config::Config;
use crate::render;

/// Current wall-clock time in the study zone.
fn study_now() -> NaiveDateTime {
    Utc::now().with_timezone(&STUDY_ZONE).naive_local()
}

pub fn run_participant(action: &ParticipantAction) -> Result<()> {
    let config = Config::from_env()?;
    let mut directory = config.open_directory()?;
    match action {
        ParticipantAction::Add(args) => add_participant(&mut directory, args),
        ParticipantAction::Get { participant_id } => {
            let enrollment = directory
                .get(*participant_id)?
                .ok_or_else(|| anyhow!("participant {participant_id} not found"))?;
            render::print_enrollments(&[enrollment]);
            Ok(())
        }
        ParticipantAction::Update {
            participant_id,
            field,
            value,
        } => {
            let field: EnrollmentField = field.parse()?;
            directory.update(*participant_id, field, value)?;
            println!("participant {participant_id} updated");
            Ok(())
        }
        ParticipantAction::Delete { participant_id } => {
            directory.delete(*participant_id)?;
            println!("participant {participant_id} removed");
            Ok(())
        }
        ParticipantAction::List => {
            render::print_enrollments(&directory.scan()?);
            Ok(())
        }
    }
}

fn add_participant(directory: &mut dyn ParticipantDirectory, args: &AddArgs) -> Result<()> {
    ensure!(
        args.study_end_date >= args.study_start_date,
        "study end date {} precedes start date {}",
        args.study_end_date,
        args.study_start_date
    );
    let schedule: Schedule = args.schedule.parse()?;
    directory.put(Enrollment {
        participant_id: args.participant_id,
        study_start_date: args.study_start_date,
        study_end_date: args.study_end_date,
        phone_number: args.phone_number.clone(),
        schedule,
        lb_link: args.lb_link.clone(),
    })?;
    println!("participant {} enrolled", args.participant_id);
    Ok(())
}

pub fn run_compliance(participant_id: ParticipantId, as_of: Option<NaiveDateTime>) -> Result<()> {
    let config = Config::from_env()?;
    let directory = config.open_directory()?;
    let log = config.open_dispatch_log()?;
    let exports = config.load_exports().context("load response exports")?;
    let roster = config.load_roster().context("load roster")?;
    let now = as_of.unwrap_or_else(study_now);

    let summary =
        compliance_for_participant(&directory, &log, &exports, &roster, participant_id, now)?;
    render::print_compliance(&summary);
    Ok(())
}

pub fn run_report(date: NaiveDate, as_of: Option<NaiveDateTime>) -> Result<()> {
    let config = Config::from_env()?;
    let directory = config.open_directory()?;
    let log = config.open_dispatch_log()?;
    let exports = config.load_exports().context("load response exports")?;
    let roster = config.load_roster().context("load roster")?;
    let now = as_of.unwrap_or_else(study_now);

    let report = generate_report(&directory, &log, &exports, &roster, date, now)?;
    render::print_report(&report);
    Ok(())
}

pub fn run_send(participant_id: ParticipantId, message: &str) -> Result<()> {
    let config = Config::from_env()?;
    let directory = config.open_directory()?;
    let enrollment = directory
        .get(participant_id)?
        .ok_or_else(|| anyhow!("participant {participant_id} not found"))?;

    let sender = LoggingSender;
    sender.send(&enrollment.phone_number, message)?;
    info!(participant_id, "ad-hoc message sent");
    println!("message queued for participant {participant_id}");
    Ok(())
}
