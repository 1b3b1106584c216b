//! Scrapes Screener.in financial statements for NSE-listed companies,
//! flattens them into long-format records, and optionally collects scored
//! news/social sentiment alongside.

pub mod config;
pub mod crawler;
pub mod declare;
pub mod exporter;
pub mod logging;
pub mod normalizer;
pub mod resolver;
pub mod sentiment;
pub mod util;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::config::SETTINGS;
use crate::crawler::screener::financials;
use crate::normalizer::NormalizedRecord;

#[derive(Parser, Debug)]
#[command(
    name = "screener_crawler",
    about = "Scrapes and normalizes company financials from Screener.in"
)]
struct Cli {
    /// Company name, NSE symbol, comma-separated list, or path to a CSV
    /// with a Company column. Prompts on stdin when omitted.
    input: Option<String>,

    /// Also collect news and social sentiment for each company.
    #[arg(long)]
    sentiment: bool,

    /// Where to write the normalized record CSV. Defaults to the
    /// configured output file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    match run(Cli::parse()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(why) => {
            logging::error_file_async(format!("{:?}", why));
            logging::error_console(format!("{:?}", why));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    let inputs = gather_inputs(cli.input.as_deref())?;
    let batch = inputs.len() > 1;

    let mut records: Vec<NormalizedRecord> = Vec::new();
    let mut failed = 0;

    for input in &inputs {
        match process_company(input, cli.sentiment).await {
            Ok(mut company_records) => {
                logging::info_console(format!(
                    "{}: {} records",
                    input,
                    company_records.len()
                ));
                records.append(&mut company_records);
            }
            Err(why) => {
                // One bad name must not sink the rest of a batch.
                if batch {
                    failed += 1;
                    logging::error_file_async(format!(
                        "Failed to process {} because {:?}",
                        input, why
                    ));
                    logging::error_console(format!("{}: failed, skipping", input));
                } else {
                    return Err(why);
                }
            }
        }
    }

    if failed == inputs.len() {
        return Err(anyhow!("All {} inputs failed to process", failed));
    }

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&SETTINGS.system.output_file));
    let written = exporter::write_records(&output, &records)?;

    if written > 0 {
        logging::info_console(format!(
            "Wrote {} records to {} in {:?}",
            written,
            output.display(),
            started.elapsed()
        ));
    } else {
        logging::info_console("No records were produced, nothing written".to_string());
    }

    Ok(())
}

/// Resolves one input to its records: symbol, scrape, normalize, and
/// optionally sentiment.
async fn process_company(input: &str, with_sentiment: bool) -> Result<Vec<NormalizedRecord>> {
    let symbol = resolver::resolve(input).await?;
    logging::info_console(format!("Resolved '{}' to {}", input, symbol));

    let company = financials::visit(&symbol).await?;
    let records = normalizer::normalize(&company, SETTINGS.system.max_years);

    if with_sentiment {
        sentiment::run(&company.company_name, &symbol).await?;
    }

    Ok(records)
}

/// Expands the CLI input into a list of company queries.
///
/// An argument ending in `.csv` is read as a batch via its Company column
/// and must exist; anything else splits on commas. No argument prompts on
/// stdin.
fn gather_inputs(input: Option<&str>) -> Result<Vec<String>> {
    let raw = match input {
        Some(value) => value.to_string(),
        None => prompt()?,
    };
    let trimmed = raw.trim();

    if trimmed.to_lowercase().ends_with(".csv") {
        let path = Path::new(trimmed);
        if !path.exists() {
            return Err(anyhow!("Batch file {} does not exist", trimmed));
        }
        let companies = exporter::read_company_column(path)?;
        if companies.is_empty() {
            return Err(anyhow!("No companies found in {}", trimmed));
        }
        return Ok(companies);
    }

    let inputs: Vec<String> = trimmed
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if inputs.is_empty() {
        return Err(anyhow!("Input cannot be empty"));
    }

    Ok(inputs)
}

fn prompt() -> Result<String> {
    print!("Enter company names or NSE symbols (comma-separated): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
