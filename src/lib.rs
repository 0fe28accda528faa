pub mod analyzer;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod model;
pub mod viewer;

use analyzer::ReportTables;
use config::ReportConfig;
use error::AppError;
use export::{ExportResult, ExportedFile};
use generator::{ValueProvider, YearWindow};
use model::Ticket;

/// Pipeline milestones, in the order they are emitted.
#[derive(Debug)]
pub enum Progress<'a> {
    Generating { count: usize },
    Aggregating,
    Saving,
    Saved(&'a ExportedFile),
}

/// Everything one run produced.
#[derive(Debug)]
pub struct Report {
    pub tickets: Vec<Ticket>,
    pub tables: ReportTables,
    pub export: ExportResult,
}

/// Generate → aggregate → export.
pub fn run(
    config: &ReportConfig,
    window: YearWindow,
    provider: &mut impl ValueProvider,
    mut progress: impl FnMut(Progress<'_>),
) -> Result<Report, AppError> {
    config.validate()?;

    progress(Progress::Generating {
        count: config.ticket_count,
    });
    let tickets = generator::generate_tickets(config.ticket_count, window, provider);

    progress(Progress::Aggregating);
    let tables = analyzer::aggregate(&tickets, config.sla_threshold_hours);

    progress(Progress::Saving);
    let export = export::export_report(
        &tickets,
        &tables,
        &config.output_dir,
        config.format,
        &config.workbook_name,
        |file| progress(Progress::Saved(file)),
    )?;

    log::info!(
        "report complete: {} tickets, {} files in {} ms",
        tickets.len(),
        export.files.len(),
        export.duration_ms
    );

    Ok(Report {
        tickets,
        tables,
        export,
    })
}

// ─── E2E Integration Tests ──────────────────────────────────────────────────
