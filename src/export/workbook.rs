use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::analyzer::{DailyTrendRow, Distribution, KpiSummary, KpiValue, ReportTables};
use crate::error::AppError;
use crate::export::{
    create_header_format, create_integer_format, create_number_format, distribution_headers,
    DAILY_TREND_HEADERS, KPI_HEADERS, TICKET_HEADERS,
};
use crate::model::{Ticket, DATETIME_FORMAT};

pub const SHEET_TICKETS: &str = "Tickets";
pub const SHEET_KPI: &str = "KPI Summary";
pub const SHEET_DAILY_TREND: &str = "Daily Trends";
pub const SHEET_ISSUE_TYPES: &str = "Issue Types";
pub const SHEET_PRIORITIES: &str = "Priorities";

/// Builds the five-sheet report workbook and returns the XLSX bytes.
pub fn generate_workbook(tickets: &[Ticket], tables: &ReportTables) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_tickets(&mut wb, tickets, tables)?;
    write_kpis(&mut wb, &tables.kpis)?;
    write_daily_trend(&mut wb, &tables.daily_trend)?;
    write_distribution(&mut wb, SHEET_ISSUE_TYPES, &tables.issue_types)?;
    write_distribution(&mut wb, SHEET_PRIORITIES, &tables.priorities)?;
    Ok(wb.save_to_buffer()?)
}

fn write_headers(ws: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    let hdr = create_header_format();
    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &hdr)?;
    }
    Ok(())
}

fn freeze_and_filter(ws: &mut Worksheet, rows: usize, cols: usize) -> Result<(), XlsxError> {
    ws.set_freeze_panes(1, 0)?;
    if rows > 0 {
        ws.autofilter(0, 0, rows as u32, (cols - 1) as u16)?;
    }
    Ok(())
}

// ── Sheet 1: Tickets ─────────────────────────────────────────────────────────

fn write_tickets(
    wb: &mut Workbook,
    tickets: &[Ticket],
    tables: &ReportTables,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_TICKETS)?;
    write_headers(ws, &TICKET_HEADERS)?;

    let int = create_integer_format();

    for (i, (t, flag)) in tickets.iter().zip(&tables.sla_flags).enumerate() {
        let row = (i + 1) as u32;
        ws.write_with_format(row, 0, t.ticket_id as f64, &int)?;
        ws.write(row, 1, t.client.as_str())?;
        ws.write(row, 2, t.issue_type.label())?;
        ws.write(row, 3, t.priority().label())?;
        ws.write(row, 4, t.date_opened.format(DATETIME_FORMAT).to_string())?;
        if let Some(h) = t.resolution_time_hours() {
            ws.write_with_format(row, 5, h as f64, &int)?;
        }
        if let Some(closed_at) = t.date_closed() {
            ws.write(row, 6, closed_at.format(DATETIME_FORMAT).to_string())?;
        }
        ws.write(row, 7, t.status().label())?;
        ws.write_with_format(row, 8, u8::from(flag.within_sla) as f64, &int)?;
    }

    freeze_and_filter(ws, tickets.len(), TICKET_HEADERS.len())?;

    ws.set_column_width(0, 10)?;
    ws.set_column_width(1, 32)?;
    ws.set_column_width(2, 12)?;
    ws.set_column_width(3, 10)?;
    ws.set_column_width(4, 20)?;
    ws.set_column_width(5, 16)?;
    ws.set_column_width(6, 20)?;
    ws.set_column_width(7, 12)?;
    ws.set_column_width(8, 10)?;

    Ok(())
}

// ── Sheet 2: KPI summary ─────────────────────────────────────────────────────

fn write_kpis(wb: &mut Workbook, kpis: &KpiSummary) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_KPI)?;
    write_headers(ws, &KPI_HEADERS)?;

    let int = create_integer_format();
    let num = create_number_format();

    for (i, kpi) in kpis.rows().iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, kpi.metric)?;
        match kpi.value {
            KpiValue::Count(n) => ws.write_with_format(row, 1, n as f64, &int)?,
            KpiValue::Decimal(v) => ws.write_with_format(row, 1, v, &num)?,
        };
    }

    ws.set_freeze_panes(1, 0)?;

    ws.set_column_width(0, 32)?;
    ws.set_column_width(1, 14)?;

    Ok(())
}

// ── Sheet 3: Daily trend ─────────────────────────────────────────────────────

fn write_daily_trend(wb: &mut Workbook, days: &[DailyTrendRow]) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_DAILY_TREND)?;
    write_headers(ws, &DAILY_TREND_HEADERS)?;

    let int = create_integer_format();

    for (i, d) in days.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, d.date.format("%Y-%m-%d").to_string())?;
        ws.write_with_format(row, 1, d.tickets_opened as f64, &int)?;
        ws.write_with_format(row, 2, d.tickets_closed as f64, &int)?;
        ws.write(row, 3, d.year as f64)?;
        ws.write(row, 4, d.month as f64)?;
        ws.write(row, 5, d.month_name)?;
        ws.write(row, 6, d.week as f64)?;
        ws.write(row, 7, d.day as f64)?;
    }

    freeze_and_filter(ws, days.len(), DAILY_TREND_HEADERS.len())?;

    ws.set_column_width(0, 12)?;
    for col in 1u16..=7 {
        ws.set_column_width(col, 14)?;
    }

    Ok(())
}

// ── Sheets 4-5: Distributions ────────────────────────────────────────────────

fn write_distribution(
    wb: &mut Workbook,
    sheet: &str,
    dist: &Distribution,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(sheet)?;
    write_headers(ws, &distribution_headers(dist))?;

    let int = create_integer_format();
    let num = create_number_format();

    for (i, r) in dist.rows.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, r.label)?;
        ws.write_with_format(row, 1, r.count as f64, &int)?;
        ws.write_with_format(row, 2, r.percentage, &num)?;
    }

    freeze_and_filter(ws, dist.rows.len(), 3)?;

    ws.set_column_width(0, 16)?;
    ws.set_column_width(1, 10)?;
    ws.set_column_width(2, 12)?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::aggregate;
    use crate::generator::{generate_tickets, FakerProvider, YearWindow};
    use chrono::NaiveDate;
    use std::io::{Cursor, Read};

    fn xlsx_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    /// Text between `open` and the next `close`, for every occurrence of `open`.
    fn between<'a>(xml: &'a str, open: &str, close: &str) -> Vec<&'a str> {
        xml.split(open)
            .skip(1)
            .filter_map(|rest| rest.split(close).next())
            .collect()
    }

    fn sheet_names(bytes: &[u8]) -> Vec<String> {
        let xml = xlsx_part(bytes, "xl/workbook.xml");
        between(&xml, "<sheet name=\"", "\"")
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// First-row cell texts of the `index`-th sheet (1-based), resolved through
    /// the shared string table.
    fn header_row(bytes: &[u8], index: usize) -> Vec<String> {
        let sst = xlsx_part(bytes, "xl/sharedStrings.xml");
        let strings: Vec<&str> = between(&sst, "<si>", "</si>")
            .into_iter()
            .filter_map(|si| si.split_once('>').and_then(|(_, t)| t.split("</t>").next()))
            .collect();

        let sheet = xlsx_part(bytes, &format!("xl/worksheets/sheet{}.xml", index));
        let first_row = between(&sheet, "<row r=\"1\"", "</row>")[0];
        between(first_row, "<v>", "</v>")
            .into_iter()
            .map(|v| strings[v.parse::<usize>().unwrap()].to_string())
            .collect()
    }

    fn sample_workbook() -> Vec<u8> {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut p = FakerProvider::seeded(8);
        let tickets = generate_tickets(40, YearWindow::this_year(now), &mut p);
        generate_workbook(&tickets, &aggregate(&tickets, 24)).unwrap()
    }

    #[test]
    fn test_generate_workbook_xlsx_signature() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut p = FakerProvider::seeded(8);
        let tickets = generate_tickets(40, YearWindow::this_year(now), &mut p);
        let tables = aggregate(&tickets, 24);

        let result = generate_workbook(&tickets, &tables);
        assert!(result.is_ok(), "generate_workbook failed: {:?}", result.err());
        let bytes = result.unwrap();
        assert!(bytes.len() > 4, "XLSX too small");
        // ZIP magic bytes PK (0x50 0x4B)
        assert_eq!(bytes[0], 0x50, "Expected PK signature byte 0");
        assert_eq!(bytes[1], 0x4B, "Expected PK signature byte 1");
    }

    #[test]
    fn test_generate_workbook_empty_snapshot() {
        let tables = aggregate(&[], 24);
        let bytes = generate_workbook(&[], &tables).unwrap();
        assert_eq!(bytes[0], 0x50);
        assert_eq!(bytes[1], 0x4B);
    }

    #[test]
    fn test_workbook_sheet_names_in_order() {
        assert_eq!(
            sheet_names(&sample_workbook()),
            vec![
                SHEET_TICKETS,
                SHEET_KPI,
                SHEET_DAILY_TREND,
                SHEET_ISSUE_TYPES,
                SHEET_PRIORITIES
            ]
        );
    }

    #[test]
    fn test_workbook_header_rows() {
        let bytes = sample_workbook();
        assert_eq!(header_row(&bytes, 1), TICKET_HEADERS);
        assert_eq!(header_row(&bytes, 2), KPI_HEADERS);
        assert_eq!(header_row(&bytes, 3), DAILY_TREND_HEADERS);
        assert_eq!(header_row(&bytes, 4), ["issue_type", "count", "percentage"]);
        assert_eq!(header_row(&bytes, 5), ["priority", "count", "percentage"]);
    }

    #[test]
    fn test_header_frozen_on_every_sheet_even_when_empty() {
        let tables = aggregate(&[], 24);
        let bytes = generate_workbook(&[], &tables).unwrap();
        assert_eq!(sheet_names(&bytes).len(), 5);
        for index in 1..=5 {
            let sheet = xlsx_part(&bytes, &format!("xl/worksheets/sheet{}.xml", index));
            assert!(sheet.contains("state=\"frozen\""), "sheet{} not frozen", index);
        }
        assert_eq!(header_row(&bytes, 1), TICKET_HEADERS);
    }
}
