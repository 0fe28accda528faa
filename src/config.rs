use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analyzer::DEFAULT_SLA_THRESHOLD_HOURS;
use crate::error::AppError;
use crate::export::OutputFormat;
use crate::generator::{DEFAULT_TICKET_COUNT, MAX_TICKET_COUNT};

pub const DEFAULT_WORKBOOK_NAME: &str = "ticket_report.xlsx";
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Run settings. Any key missing from a config file keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub ticket_count: usize,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub sla_threshold_hours: u32,
    pub preview_rows: usize,
    pub workbook_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            ticket_count: DEFAULT_TICKET_COUNT,
            seed: None,
            output_dir: PathBuf::from("."),
            format: OutputFormat::Csv,
            sla_threshold_hours: DEFAULT_SLA_THRESHOLD_HOURS,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            workbook_name: DEFAULT_WORKBOOK_NAME.to_string(),
        }
    }
}

impl ReportConfig {
    /// Reads a JSON config file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let config: ReportConfig = serde_json::from_str(raw)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.ticket_count > MAX_TICKET_COUNT {
            return Err(AppError::InvalidConfig(format!(
                "ticketCount must be at most {}",
                MAX_TICKET_COUNT
            )));
        }
        if self.sla_threshold_hours == 0 {
            return Err(AppError::InvalidConfig(
                "slaThresholdHours must be greater than 0".into(),
            ));
        }
        if self.workbook_name.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "workbookName must not be empty".into(),
            ));
        }
        Ok(())
    }
}
