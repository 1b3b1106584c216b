//! # Table normalizer
//!
//! Flattens the raw statement tables scraped from a company page into
//! long-format records, one per (metric, year) cell. Missing cells are
//! skipped rather than zero-filled, and every metric gets a unit bucket
//! inferred from its label.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::crawler::screener::financials::CompanyFinancials;
use crate::declare::{Statement, Unit, SOURCE};
use crate::util::text;

static REG_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"20\d{2}").expect("Failed to compile year regex"));

/// Named ratios whose labels would otherwise land in a broader bucket
/// ("Debt to Equity" contains "equity", "Current Ratio" contains "ratio").
const RATIO_PHRASES: &[&str] = &[
    "debt to equity",
    "current ratio",
    "quick ratio",
    "interest coverage",
    "p/e",
    "p/b",
    "ev/ebitda",
];

/// Monetary aggregates reported in crores of rupees.
const INR_CRORES_KEYWORDS: &[&str] = &[
    "sales",
    "revenue",
    "profit",
    "income",
    "expense",
    "asset",
    "liabilit",
    "equity",
    "cash",
    "borrowing",
    "investment",
    "market cap",
    "reserves",
];

/// Per-share figures reported in plain rupees.
const INR_KEYWORDS: &[&str] = &["eps", "dividend", "book value", "face value", "price"];

const PERCENTAGE_KEYWORDS: &[&str] = &[
    "margin", "roe", "roce", "roa", "ratio", "yield", "coverage", "payout", "growth", "tax %",
    "opm", "%",
];

const DAYS_KEYWORDS: &[&str] = &["days", "turnover", "cycle"];

/// One flattened (metric, year) observation. Field names match the CSV
/// header and the JSON keys of the export verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Statement")]
    pub statement: Statement,
    #[serde(rename = "Section")]
    pub section: String,
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Unit")]
    pub unit: Unit,
    #[serde(rename = "Source")]
    pub source: String,
}

impl NormalizedRecord {
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.company.clone(),
            self.symbol.clone(),
            self.statement.to_string(),
            self.section.clone(),
            self.metric.clone(),
            self.year.to_string(),
            self.value.clone(),
            self.unit.to_string(),
            self.source.clone(),
        ]
    }
}

/// Flattens every scraped table into normalized records.
///
/// The year axis comes from each table's own header, truncated to the most
/// recent `max_years` columns. Cells whose cleaned value is empty produce no
/// record.
pub fn normalize(financials: &CompanyFinancials, max_years: usize) -> Vec<NormalizedRecord> {
    let mut records = Vec::new();

    for (statement, sections) in &financials.statements {
        for section in sections {
            let header = match section.table.header() {
                Some(header) => header,
                None => continue,
            };

            let columns = year_columns(header, max_years);
            if columns.is_empty() {
                continue;
            }

            for row in section.table.body() {
                let metric = match row.first() {
                    Some(label) => text::clean_metric_name(label),
                    None => continue,
                };
                if metric.is_empty() {
                    continue;
                }

                let unit = infer_unit(&metric);

                for (cell_index, year) in &columns {
                    let value = match row.get(*cell_index) {
                        Some(cell) => text::clean_numeric_value(cell),
                        None => continue,
                    };
                    if value.is_empty() {
                        continue;
                    }

                    records.push(NormalizedRecord {
                        company: financials.company_name.clone(),
                        symbol: financials.symbol.clone(),
                        statement: *statement,
                        section: section.name.clone(),
                        metric: metric.clone(),
                        year: *year,
                        value,
                        unit,
                        source: SOURCE.to_string(),
                    });
                }
            }
        }
    }

    records
}

/// Extracts `(cell index, year)` pairs from a table header.
///
/// The first header cell is the metric-label column and is never a year.
/// Columns whose label carries no four-digit year (e.g. "TTM") are skipped.
/// When more than `max_years` year columns exist, the oldest are dropped.
pub(crate) fn year_columns(header: &[String], max_years: usize) -> Vec<(usize, i32)> {
    let mut columns: Vec<(usize, i32)> = header
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, label)| {
            let year = REG_YEAR.find(label)?.as_str().parse().ok()?;
            Some((index, year))
        })
        .collect();

    while columns.len() > max_years {
        columns.remove(0);
    }

    columns
}

/// Buckets a metric label into a unit.
///
/// Named ratios are checked before the keyword buckets; after that the first
/// matching bucket wins, in order: crores, rupees, percentages, day counts.
/// Unrecognized labels default to `Number`.
pub fn infer_unit(metric: &str) -> Unit {
    let lowered = metric.to_lowercase();

    if RATIO_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return Unit::Ratio;
    }
    if INR_CRORES_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Unit::InrCrores;
    }
    if INR_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Unit::Inr;
    }
    if PERCENTAGE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Unit::Percentage;
    }
    if DAYS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Unit::Days;
    }

    Unit::Number
}
