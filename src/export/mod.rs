pub mod csv_files;
pub mod workbook;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use rust_xlsxwriter::{Format, FormatBorder};
use serde::Deserialize;

use crate::analyzer::{DailyTrendRow, Distribution, KpiRow, ReportTables, SlaFlag};
use crate::error::AppError;
use crate::model::{Ticket, DATETIME_FORMAT};

pub const TICKETS_FILE: &str = "tickets.csv";
pub const KPI_FILE: &str = "kpi_summary.csv";
pub const DAILY_TREND_FILE: &str = "daily_ticket_trends.csv";
pub const ISSUE_TYPE_FILE: &str = "issue_type_distribution.csv";
pub const PRIORITY_FILE: &str = "priority_distribution.csv";

pub const TICKET_HEADERS: [&str; 9] = [
    "ticket_id",
    "client",
    "issue_type",
    "priority",
    "date_opened",
    "resolution_time",
    "date_closed",
    "status",
    "within_sla",
];

pub const KPI_HEADERS: [&str; 2] = ["Metric", "Value"];

pub const DAILY_TREND_HEADERS: [&str; 8] = [
    "date",
    "tickets_opened",
    "tickets_closed",
    "year",
    "month",
    "month_name",
    "week",
    "day",
];

pub fn distribution_headers(dist: &Distribution) -> [&'static str; 3] {
    [dist.field, "count", "percentage"]
}

/// Where the report tables go: five flat files, one workbook, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
    Both,
}

impl OutputFormat {
    pub fn writes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }

    pub fn writes_xlsx(self) -> bool {
        matches!(self, OutputFormat::Xlsx | OutputFormat::Both)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            "both" => Ok(OutputFormat::Both),
            other => Err(format!("unknown output format '{}' (expected csv, xlsx or both)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Both => "both",
        })
    }
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub files: Vec<ExportedFile>,
    /// File the completion prompt offers to open.
    pub primary: PathBuf,
    pub duration_ms: u64,
}

/// Writes the report in `format` under `dir`, creating it if needed.
/// `on_saved` is called after each file lands on disk.
pub fn export_report(
    tickets: &[Ticket],
    tables: &ReportTables,
    dir: &Path,
    format: OutputFormat,
    workbook_name: &str,
    mut on_saved: impl FnMut(&ExportedFile),
) -> Result<ExportResult, AppError> {
    let start = Instant::now();
    std::fs::create_dir_all(dir)?;

    let mut files = Vec::new();
    let mut record = |file: ExportedFile| {
        log::info!("wrote {} ({} bytes)", file.path.display(), file.size_bytes);
        on_saved(&file);
        files.push(file);
    };

    if format.writes_csv() {
        csv_files::write_csv_files(tickets, tables, dir, &mut record)?;
    }
    if format.writes_xlsx() {
        let path = dir.join(workbook_name);
        let bytes = workbook::generate_workbook(tickets, tables)?;
        std::fs::write(&path, &bytes)?;
        record(ExportedFile {
            path,
            size_bytes: bytes.len() as u64,
        });
    }

    let primary = if format.writes_csv() {
        dir.join(TICKETS_FILE)
    } else {
        dir.join(workbook_name)
    };

    Ok(ExportResult {
        files,
        primary,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

// ── Text records shared by the CSV writer and the console preview ────────────

pub fn ticket_record(ticket: &Ticket, flag: &SlaFlag) -> Vec<String> {
    vec![
        ticket.ticket_id.to_string(),
        ticket.client.clone(),
        ticket.issue_type.to_string(),
        ticket.priority().to_string(),
        ticket.date_opened.format(DATETIME_FORMAT).to_string(),
        ticket
            .resolution_time_hours()
            .map(|h| h.to_string())
            .unwrap_or_default(),
        ticket
            .date_closed()
            .map(|d| d.format(DATETIME_FORMAT).to_string())
            .unwrap_or_default(),
        ticket.status().to_string(),
        u8::from(flag.within_sla).to_string(),
    ]
}

pub fn kpi_record(row: &KpiRow) -> Vec<String> {
    vec![row.metric.to_string(), row.value.to_string()]
}

pub fn daily_trend_record(row: &DailyTrendRow) -> Vec<String> {
    vec![
        row.date.format("%Y-%m-%d").to_string(),
        row.tickets_opened.to_string(),
        row.tickets_closed.to_string(),
        row.year.to_string(),
        row.month.to_string(),
        row.month_name.to_string(),
        row.week.to_string(),
        row.day.to_string(),
    ]
}

pub fn distribution_records(dist: &Distribution) -> Vec<Vec<String>> {
    dist.rows
        .iter()
        .map(|r| {
            vec![
                r.label.to_string(),
                r.count.to_string(),
                r.percentage.to_string(),
            ]
        })
        .collect()
}

/// First `limit` ticket rows, as printed by the console preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn ticket_preview(tickets: &[Ticket], tables: &ReportTables, limit: usize) -> PreviewTable {
    PreviewTable {
        headers: TICKET_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: tickets
            .iter()
            .zip(&tables.sla_flags)
            .take(limit)
            .map(|(t, f)| ticket_record(t, f))
            .collect(),
    }
}

// ── XLSX formats ──────────────────────────────────────────────────────────────

/// Header row: blue background, white bold text, thin border.
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

pub fn create_number_format() -> Format {
    Format::new().set_num_format("#,##0.00")
}

pub fn create_integer_format() -> Format {
    Format::new().set_num_format("#,##0")
}
