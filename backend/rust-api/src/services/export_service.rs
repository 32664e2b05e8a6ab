use std::cmp::Ordering;
use std::io::Cursor;

use anyhow::Result;
use rust_xlsxwriter::{Format, Workbook};

use crate::models::Officer;

/// Escapes a CSV field to prevent formula injection attacks.
/// Prefixes dangerous characters (=, +, @, -, tab, newline) with a tab to neutralize them.
/// Also wraps fields containing special characters in quotes.
fn escape_csv_field(value: &str) -> String {
    let sanitized = if value.starts_with(['=', '+', '@', '-', '\t', '\r', '\n']) {
        format!("\t{}", value)
    } else {
        value.to_string()
    };

    if sanitized.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", sanitized.replace('"', "\"\""))
    } else {
        sanitized
    }
}

/// Officers sorted by aggregate score, best first. The sort is stable, so
/// ties keep roster order.
fn ranked(officers: &[Officer]) -> Vec<&Officer> {
    let mut ranked: Vec<&Officer> = officers.iter().collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

const HEADERS: [&str; 7] = ["Place", "Name", "Unit", "Rank", "Position", "Submissions", "Score"];

/// Renders the officer standings as an XLSX workbook in memory.
pub fn build_standings_xlsx(officers: &[Officer]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_column_width(0, 8.0)?;
    worksheet.set_column_width(1, 28.0)?;
    worksheet.set_column_width(2, 20.0)?;
    worksheet.set_column_width(3, 16.0)?;
    worksheet.set_column_width(4, 22.0)?;
    worksheet.set_column_width(5, 12.0)?;
    worksheet.set_column_width(6, 10.0)?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, officer) in ranked(officers).iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_number(row, 0, index as f64 + 1.0)?;
        worksheet.write_string(row, 1, &officer.name)?;
        worksheet.write_string(row, 2, &officer.unit)?;
        worksheet.write_string(row, 3, &officer.rank)?;
        worksheet.write_string(row, 4, &officer.position)?;
        worksheet.write_number(row, 5, officer.submissions.len() as f64)?;
        worksheet.write_number(row, 6, officer.score as f64)?;
    }

    let mut cursor = Cursor::new(Vec::new());
    workbook.save_to_writer(&mut cursor)?;
    Ok(cursor.into_inner())
}

/// Renders the officer standings as CSV text.
pub fn build_standings_csv(officers: &[Officer]) -> Vec<u8> {
    let mut lines = vec![HEADERS.join(",")];
    for (index, officer) in ranked(officers).iter().enumerate() {
        lines.push(format!(
            "{},{},{},{},{},{},{:.1}",
            index + 1,
            escape_csv_field(&officer.name),
            escape_csv_field(&officer.unit),
            escape_csv_field(&officer.rank),
            escape_csv_field(&officer.position),
            officer.submissions.len(),
            officer.score
        ));
    }
    lines.join("\n").into_bytes()
}
