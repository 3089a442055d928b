//! Survey response export loading.
//!
//! One CSV file per instrument with at least the columns `Name`, `Age`, and
//! `Date/Time`. Timestamps are stamped in the survey tool's zone and are
//! re-zoned to study local time at load; rows whose timestamp cannot be
//! parsed are kept (so their count can be surfaced) but carry no datetime
//! and can never match a slot.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use tracing::{debug, warn};

use insight_model::{InsightError, Result, SurveyInstrument};

use crate::zone::export_local_to_study;

const EXPORT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of a response export, normalized to study local time.
#[derive(Debug, Clone)]
pub struct ResponseRow {
    /// Participant name as entered, trimmed.
    pub name: String,
    pub age: Option<u32>,
    /// Response timestamp in study local time; `None` if unparseable.
    pub taken_at: Option<NaiveDateTime>,
}

impl ResponseRow {
    /// Study-local calendar date of the response, when known.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.taken_at.map(|dt| dt.date())
    }
}

/// A fully loaded response export for one instrument.
#[derive(Debug, Clone)]
pub struct ResponseExport {
    pub instrument: SurveyInstrument,
    pub rows: Vec<ResponseRow>,
    /// Rows whose `Date/Time` failed to parse; surfaced as a diagnostic.
    pub unparseable_rows: usize,
}

impl ResponseExport {
    /// Loads and normalizes one export CSV.
    ///
    /// A missing or unreadable file is a `DataSourceUnavailable` naming the
    /// instrument, so bulk callers can abort with the failing source.
    pub fn load(path: &Path, instrument: SurveyInstrument) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| source_error(instrument, path, &e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| source_error(instrument, path, &e.to_string()))?
            .clone();
        let name_idx = column_index(&headers, "Name")
            .ok_or_else(|| source_error(instrument, path, "missing 'Name' column"))?;
        let age_idx = column_index(&headers, "Age")
            .ok_or_else(|| source_error(instrument, path, "missing 'Age' column"))?;
        let dt_idx = column_index(&headers, "Date/Time")
            .ok_or_else(|| source_error(instrument, path, "missing 'Date/Time' column"))?;

        let mut rows = Vec::new();
        let mut unparseable_rows = 0usize;
        for record in reader.records() {
            let record = record.map_err(|e| source_error(instrument, path, &e.to_string()))?;
            let name = record.get(name_idx).unwrap_or("").trim().to_string();
            if name.is_empty() {
                continue;
            }
            let age = record.get(age_idx).and_then(|v| v.trim().parse().ok());
            let taken_at = record.get(dt_idx).and_then(parse_export_datetime);
            if taken_at.is_none() {
                unparseable_rows += 1;
                warn!(
                    instrument = instrument.code(),
                    "export row with unparseable timestamp; row will never match a slot"
                );
            }
            rows.push(ResponseRow {
                name,
                age,
                taken_at,
            });
        }
        debug!(
            instrument = instrument.code(),
            rows = rows.len(),
            unparseable_rows,
            "response export loaded"
        );
        Ok(Self {
            instrument,
            rows,
            unparseable_rows,
        })
    }
}

/// The five instrument exports, loaded together for one computation.
#[derive(Debug, Clone)]
pub struct ExportSet {
    pub survey_1a: ResponseExport,
    pub survey_1b: ResponseExport,
    pub survey_2: ResponseExport,
    pub survey_3: ResponseExport,
    pub survey_4: ResponseExport,
}

impl ExportSet {
    pub fn for_instrument(&self, instrument: SurveyInstrument) -> &ResponseExport {
        match instrument {
            SurveyInstrument::Survey1a => &self.survey_1a,
            SurveyInstrument::Survey1b => &self.survey_1b,
            SurveyInstrument::Survey2 => &self.survey_2,
            SurveyInstrument::Survey3 => &self.survey_3,
            SurveyInstrument::Survey4 => &self.survey_4,
        }
    }

    /// Total unparseable rows across all five exports.
    pub fn unparseable_rows(&self) -> usize {
        SurveyInstrument::ALL
            .iter()
            .map(|i| self.for_instrument(*i).unparseable_rows)
            .sum()
    }
}

fn parse_export_datetime(raw: &str) -> Option<NaiveDateTime> {
    let local = NaiveDateTime::parse_from_str(raw.trim(), EXPORT_DATETIME_FORMAT).ok()?;
    export_local_to_study(local)
}

fn column_index(headers: &csv::StringRecord, wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().trim_matches('\u{feff}').eq_ignore_ascii_case(wanted))
}

fn source_error(instrument: SurveyInstrument, path: &Path, reason: &str) -> InsightError {
    InsightError::DataSourceUnavailable {
        source_name: format!("{} export ({})", instrument.code(), path.display()),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_export(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn rows_are_rezoned_to_study_time() {
        let file = write_export(
            "Name,Age,Date/Time\n\
             AB,27,2025-01-05 08:20:00\n",
        );
        let export = ResponseExport::load(file.path(), SurveyInstrument::Survey1a).unwrap();
        assert_eq!(export.rows.len(), 1);
        let taken = export.rows[0].taken_at.unwrap();
        // Denver 08:20 == New York 10:20.
        assert_eq!(taken.format("%Y-%m-%d %H:%M").to_string(), "2025-01-05 10:20");
    }

    #[test]
    fn unparseable_timestamps_are_counted_not_fatal() {
        let file = write_export(
            "Name,Age,Date/Time\n\
             AB,27,not a date\n\
             CD,30,2025-01-05 09:00:00\n",
        );
        let export = ResponseExport::load(file.path(), SurveyInstrument::Survey2).unwrap();
        assert_eq!(export.rows.len(), 2);
        assert_eq!(export.unparseable_rows, 1);
        assert!(export.rows[0].taken_at.is_none());
    }

    #[test]
    fn missing_file_names_the_source() {
        let err = ResponseExport::load(
            Path::new("/nonexistent/export.csv"),
            SurveyInstrument::Survey3,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("S3"), "{msg}");
    }

    #[test]
    fn names_are_trimmed() {
        let file = write_export(
            "Name,Age,Date/Time\n\
             \u{0020}AB ,27,2025-01-05 08:20:00\n",
        );
        let export = ResponseExport::load(file.path(), SurveyInstrument::Survey4).unwrap();
        assert_eq!(export.rows[0].name, "AB");
    }
}
