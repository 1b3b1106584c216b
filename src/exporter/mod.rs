//! # Export layer
//!
//! Writes normalized financial records and sentiment signals to disk, and
//! reads company lists back in for batch runs. All files are plain CSV or
//! JSON in the working directory (or wherever the caller points).

pub mod csv;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::logging;
use crate::normalizer::NormalizedRecord;
use crate::sentiment::SentimentSignal;

/// Column order of the financial-data export.
pub const RECORD_HEADER: [&str; 9] = [
    "Company",
    "Symbol",
    "Statement",
    "Section",
    "Metric",
    "Year",
    "Value",
    "Unit",
    "Source",
];

const SENTIMENT_HEADER: [&str; 3] = ["source", "text", "sentiment"];

/// Writes normalized records as CSV, sorted for stable diffs. Returns the
/// number of records written.
///
/// An empty record set writes nothing at all; a header-only file would
/// read as "ran fine, found nothing", which it is not.
pub fn write_records(path: &Path, records: &[NormalizedRecord]) -> Result<usize> {
    if records.is_empty() {
        logging::warn_file_async(format!(
            "No records to export, {} was not written",
            path.display()
        ));
        return Ok(0);
    }

    let mut sorted: Vec<&NormalizedRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        (
            &a.company,
            a.statement.as_ref(),
            &a.section,
            &a.metric,
            &a.year,
        )
            .cmp(&(
                &b.company,
                b.statement.as_ref(),
                &b.section,
                &b.metric,
                &b.year,
            ))
    });

    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let header: Vec<String> = RECORD_HEADER.iter().map(|s| s.to_string()).collect();
    csv::write_row(&mut writer, &header)?;
    for record in &sorted {
        csv::write_row(&mut writer, &record.csv_row())?;
    }
    writer.flush()?;

    Ok(sorted.len())
}

/// Writes sentiment signals as CSV.
pub fn write_sentiment_csv(path: &str, signals: &[SentimentSignal]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path))?;
    let mut writer = BufWriter::new(file);

    let header: Vec<String> = SENTIMENT_HEADER.iter().map(|s| s.to_string()).collect();
    csv::write_row(&mut writer, &header)?;
    for signal in signals {
        csv::write_row(
            &mut writer,
            &[
                signal.source.clone(),
                signal.text.clone(),
                format!("{:.4}", signal.score),
            ],
        )?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes sentiment signals as pretty-printed JSON.
pub fn write_sentiment_json(path: &str, signals: &[SentimentSignal]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, signals)
        .map_err(|why| anyhow!("Failed to write {} because {:?}", path, why))
}

/// Reads the company column from a batch-input CSV.
pub fn read_company_column(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_company_column(&text)
        .ok_or_else(|| anyhow!("No 'Company' column found in {}", path.display()))
}

/// Pulls the values under a case-insensitive "Company" header, de-duplicated
/// in order. `None` when the header row has no such column.
fn parse_company_column(text: &str) -> Option<Vec<String>> {
    let rows = csv::parse_rows(text);
    let header = rows.first()?;
    let column = header
        .iter()
        .position(|cell| cell.trim().eq_ignore_ascii_case("company"))?;

    let mut companies = Vec::new();
    for row in rows.iter().skip(1) {
        if let Some(value) = row.get(column) {
            let value = value.trim();
            if !value.is_empty() && !companies.iter().any(|existing| existing == value) {
                companies.push(value.to_string());
            }
        }
    }

    Some(companies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::{Statement, Unit, SOURCE};

    fn record(company: &str, metric: &str, year: i32) -> NormalizedRecord {
        NormalizedRecord {
            company: company.to_string(),
            symbol: "TEST".to_string(),
            statement: Statement::ProfitAndLoss,
            section: "Summary".to_string(),
            metric: metric.to_string(),
            year,
            value: "100".to_string(),
            unit: Unit::InrCrores,
            source: SOURCE.to_string(),
        }
    }

    #[test]
    fn test_write_records_empty_writes_nothing() {
        let path = std::env::temp_dir().join("screener_export_empty_test.csv");
        let _ = std::fs::remove_file(&path);

        let written = write_records(&path, &[]).unwrap();
        assert_eq!(written, 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_records_sorted() {
        let path = std::env::temp_dir().join("screener_export_sorted_test.csv");
        let records = vec![
            record("Beta", "Sales", 2024),
            record("Alpha", "Sales", 2024),
            record("Alpha", "Sales", 2023),
        ];

        let written = write_records(&path, &records).unwrap();
        assert_eq!(written, 3);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], RECORD_HEADER.join(","));
        assert!(lines[1].starts_with("Alpha,TEST,Profit & Loss,Summary,Sales,2023"));
        assert!(lines[2].starts_with("Alpha,TEST,Profit & Loss,Summary,Sales,2024"));
        assert!(lines[3].starts_with("Beta"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_parse_company_column() {
        let text = "Symbol,Company\nTCS,Tata Consultancy\nINFY,Infosys\nINFY,Infosys\n,,\n";
        assert_eq!(
            parse_company_column(text),
            Some(vec![
                "Tata Consultancy".to_string(),
                "Infosys".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_company_column_missing_header() {
        assert_eq!(parse_company_column("Name,Symbol\nfoo,BAR\n"), None);
        assert_eq!(parse_company_column(""), None);
    }
}
