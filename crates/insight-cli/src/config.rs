//! Environment-driven configuration.
//!
//! Every external source is located by an environment variable; all of them
//! are checked up front so a misconfigured run aborts before any
//! computation starts.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use insight_ingest::{
    ExportSet, JsonFileDirectory, JsonFileDispatchLog, ResponseExport, Roster,
};
use insight_model::{InsightError, Result, SurveyInstrument};

const ENV_SURVEY_1A: &str = "INSIGHT_SURVEY_1A";
const ENV_SURVEY_1B: &str = "INSIGHT_SURVEY_1B";
const ENV_SURVEY_2: &str = "INSIGHT_SURVEY_2";
const ENV_SURVEY_3: &str = "INSIGHT_SURVEY_3";
const ENV_SURVEY_4: &str = "INSIGHT_SURVEY_4";
const ENV_ROSTER: &str = "INSIGHT_ROSTER";
const ENV_DIRECTORY: &str = "INSIGHT_DIRECTORY";
const ENV_DISPATCH_LOG: &str = "INSIGHT_DISPATCH_LOG";

/// Resolved locations of every external source.
#[derive(Debug, Clone)]
pub struct Config {
    pub survey_1a: PathBuf,
    pub survey_1b: PathBuf,
    pub survey_2: PathBuf,
    pub survey_3: PathBuf,
    pub survey_4: PathBuf,
    pub roster: PathBuf,
    pub directory: PathBuf,
    pub dispatch_log: PathBuf,
}

impl Config {
    /// Reads every location from the process environment. All missing
    /// variables are reported together so one run surfaces the whole gap.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var_os(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut var = |name: &'static str| -> PathBuf {
            match lookup(name) {
                Some(value) if !value.is_empty() => PathBuf::from(value),
                _ => {
                    missing.push(name);
                    PathBuf::new()
                }
            }
        };

        let config = Self {
            survey_1a: var(ENV_SURVEY_1A),
            survey_1b: var(ENV_SURVEY_1B),
            survey_2: var(ENV_SURVEY_2),
            survey_3: var(ENV_SURVEY_3),
            survey_4: var(ENV_SURVEY_4),
            roster: var(ENV_ROSTER),
            directory: var(ENV_DIRECTORY),
            dispatch_log: var(ENV_DISPATCH_LOG),
        };
        if missing.is_empty() {
            Ok(config)
        } else {
            Err(InsightError::Configuration(format!(
                "missing environment variable(s): {}",
                missing.join(", ")
            )))
        }
    }

    /// Loads all five response exports.
    pub fn load_exports(&self) -> Result<ExportSet> {
        Ok(ExportSet {
            survey_1a: load_export(&self.survey_1a, SurveyInstrument::Survey1a)?,
            survey_1b: load_export(&self.survey_1b, SurveyInstrument::Survey1b)?,
            survey_2: load_export(&self.survey_2, SurveyInstrument::Survey2)?,
            survey_3: load_export(&self.survey_3, SurveyInstrument::Survey3)?,
            survey_4: load_export(&self.survey_4, SurveyInstrument::Survey4)?,
        })
    }

    pub fn load_roster(&self) -> Result<Roster> {
        Roster::load(&self.roster)
    }

    pub fn open_directory(&self) -> Result<JsonFileDirectory> {
        JsonFileDirectory::open(self.directory.clone())
    }

    pub fn open_dispatch_log(&self) -> Result<JsonFileDispatchLog> {
        JsonFileDispatchLog::open(&self.dispatch_log)
    }
}

fn load_export(path: &Path, instrument: SurveyInstrument) -> Result<ResponseExport> {
    ResponseExport::load(path, instrument)
}
