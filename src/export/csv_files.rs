use std::path::Path;

use crate::analyzer::ReportTables;
use crate::error::AppError;
use crate::export::{
    daily_trend_record, distribution_headers, distribution_records, kpi_record, ticket_record,
    ExportedFile, DAILY_TREND_FILE, DAILY_TREND_HEADERS, ISSUE_TYPE_FILE, KPI_FILE, KPI_HEADERS,
    PRIORITY_FILE, TICKETS_FILE, TICKET_HEADERS,
};
use crate::model::Ticket;

/// Writes the five report tables as independent CSV files under `dir`.
/// Each file is complete on its own; an earlier file is left in place if a later write fails.
pub fn write_csv_files(
    tickets: &[Ticket],
    tables: &ReportTables,
    dir: &Path,
    on_saved: &mut impl FnMut(ExportedFile),
) -> Result<(), AppError> {
    let ticket_rows = tickets
        .iter()
        .zip(&tables.sla_flags)
        .map(|(t, flag)| ticket_record(t, flag));
    on_saved(write_table(&dir.join(TICKETS_FILE), &TICKET_HEADERS, ticket_rows)?);

    let kpi_rows = tables.kpis.rows();
    on_saved(write_table(
        &dir.join(KPI_FILE),
        &KPI_HEADERS,
        kpi_rows.iter().map(kpi_record),
    )?);

    on_saved(write_table(
        &dir.join(DAILY_TREND_FILE),
        &DAILY_TREND_HEADERS,
        tables.daily_trend.iter().map(daily_trend_record),
    )?);

    on_saved(write_table(
        &dir.join(ISSUE_TYPE_FILE),
        &distribution_headers(&tables.issue_types),
        distribution_records(&tables.issue_types),
    )?);

    on_saved(write_table(
        &dir.join(PRIORITY_FILE),
        &distribution_headers(&tables.priorities),
        distribution_records(&tables.priorities),
    )?);

    Ok(())
}

fn write_table<I>(path: &Path, headers: &[&str], records: I) -> Result<ExportedFile, AppError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(headers)?;
    let mut rows = 0usize;
    for record in records {
        wtr.write_record(&record)?;
        rows += 1;
    }
    wtr.flush()?;

    log::debug!("{}: {} data rows", path.display(), rows);
    Ok(ExportedFile {
        path: path.to_path_buf(),
        size_bytes: std::fs::metadata(path)?.len(),
    })
}
