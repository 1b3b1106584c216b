//! # Consolidated company page scraper
//!
//! Fetches `https://www.screener.in/company/<SYMBOL>/consolidated/` and
//! extracts the four financial statement tables as raw cell grids. No value
//! cleaning happens here; the normalizer owns that.

use anyhow::{anyhow, Result};
use concat_string::concat_string;
use once_cell::sync::Lazy;
use reqwest::header;
use scraper::{ElementRef, Html, Selector};

use crate::config::SETTINGS;
use crate::crawler::screener::HOST;
use crate::declare::Statement;
use crate::{logging, util};

static HEADER_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("thead th").expect("Failed to parse header cell selector"));

static BODY_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody tr").expect("Failed to parse body row selector"));

static ROW_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("Failed to parse row cell selector"));

/// A table exactly as scraped: ordered rows of cell strings.
///
/// The first row is the header (year labels); the first cell of every
/// subsequent row is the metric label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn body(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }
}

/// A named section of a statement holding one raw table.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub table: RawTable,
}

/// Everything scraped from one company page.
#[derive(Debug, Clone)]
pub struct CompanyFinancials {
    pub company_name: String,
    pub symbol: String,
    /// Statement order follows the page; a statement whose table was missing
    /// carries no sections and contributes zero records downstream.
    pub statements: Vec<(Statement, Vec<Section>)>,
}

/// Fetches and parses the consolidated page for a stock symbol.
///
/// HTTP failures are distinguishable errors carrying the attempted symbol;
/// individual missing tables are not errors.
pub async fn visit(stock_symbol: &str) -> Result<CompanyFinancials> {
    let url = concat_string!("https://", HOST, "/company/", stock_symbol, "/consolidated/");

    let response = util::http::get_response(&url, cookie_headers())
        .await
        .and_then(|response| {
            response
                .error_for_status()
                .map_err(|why| anyhow!("{:?}", why))
        })
        .map_err(|why| {
            anyhow!(
                "Failed to fetch Screener data for {} because {:?}",
                stock_symbol,
                why
            )
        })?;

    let text = response.text().await.map_err(|why| {
        anyhow!(
            "Failed to read Screener page for {} because {:?}",
            stock_symbol,
            why
        )
    })?;

    let document = Html::parse_document(&text);

    Ok(parse_document(&document, stock_symbol))
}

/// Builds the optional static-cookie header from configuration.
fn cookie_headers() -> Option<header::HeaderMap> {
    let screener = &SETTINGS.screener;
    if screener.csrf_token.is_empty() && screener.session_id.is_empty() {
        return None;
    }

    let cookie = format!(
        "csrftoken={}; sessionid={}",
        screener.csrf_token, screener.session_id
    );
    let value = header::HeaderValue::from_str(&cookie).ok()?;

    let mut headers = header::HeaderMap::new();
    headers.insert(header::COOKIE, value);
    Some(headers)
}

pub(crate) fn parse_document(document: &Html, stock_symbol: &str) -> CompanyFinancials {
    let company_name = util::http::element::parse_value(&document.root_element(), "h1")
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| stock_symbol.to_string());

    let mut statements = Vec::with_capacity(4);
    let mut parsed_tables = 0;

    for statement in Statement::iterator() {
        let sections = match parse_statement_table(document, statement) {
            Some(table) => {
                parsed_tables += 1;
                vec![Section {
                    name: "Summary".to_string(),
                    table,
                }]
            }
            None => Vec::new(),
        };
        statements.push((statement, sections));
    }

    if parsed_tables == 0 {
        logging::warn_file_async(format!(
            "No financial tables found for {}. Site structure might have changed.",
            stock_symbol
        ));
    }

    CompanyFinancials {
        company_name,
        symbol: stock_symbol.to_string(),
        statements,
    }
}

fn parse_statement_table(document: &Html, statement: Statement) -> Option<RawTable> {
    let selector = Selector::parse(&format!("section#{} table", section_id(statement))).ok()?;
    let table = document.select(&selector).next()?;

    let header: Vec<String> = table.select(&HEADER_CELL_SELECTOR).map(cell_text).collect();
    if header.is_empty() {
        return None;
    }

    let mut rows = vec![header];
    for row in table.select(&BODY_ROW_SELECTOR) {
        let cells: Vec<String> = row.select(&ROW_CELL_SELECTOR).map(cell_text).collect();
        if cells.iter().any(|cell| !cell.is_empty()) {
            rows.push(cells);
        }
    }

    // Header-only tables carry no data.
    if rows.len() < 2 {
        return None;
    }

    Some(RawTable { rows })
}

/// HTML section id of a statement on the consolidated page.
fn section_id(statement: Statement) -> &'static str {
    match statement {
        Statement::ProfitAndLoss => "profit-loss",
        Statement::BalanceSheet => "balance-sheet",
        Statement::CashFlow => "cash-flow",
        Statement::Ratios => "ratios",
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    const PAGE: &str = r#"
    <html><body>
      <h1>Tata Consultancy Services Ltd</h1>
      <section id="profit-loss">
        <table>
          <thead><tr><th></th><th>Mar 2023</th><th>Mar 2024</th></tr></thead>
          <tbody>
            <tr><th>Sales +</th><td>1,200</td><td>1,350</td></tr>
            <tr><th>Net Profit</th><td>300</td><td>-</td></tr>
          </tbody>
        </table>
      </section>
      <section id="ratios">
        <table>
          <thead><tr><th></th><th>Mar 2024</th></tr></thead>
          <tbody><tr><th>ROE %</th><td>44</td></tr></tbody>
        </table>
      </section>
    </body></html>"#;

    #[test]
    fn test_parse_document() {
        let document = Html::parse_document(PAGE);
        let financials = parse_document(&document, "TCS");

        assert_eq!(financials.company_name, "Tata Consultancy Services Ltd");
        assert_eq!(financials.symbol, "TCS");
        assert_eq!(financials.statements.len(), 4);

        let (statement, sections) = &financials.statements[0];
        assert_eq!(*statement, Statement::ProfitAndLoss);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Summary");

        let table = &sections[0].table;
        assert_eq!(
            table.header().unwrap(),
            &["".to_string(), "Mar 2023".to_string(), "Mar 2024".to_string()]
        );
        assert_eq!(
            table.body()[0],
            vec!["Sales +".to_string(), "1,200".to_string(), "1,350".to_string()]
        );

        // Balance sheet and cash flow are absent from the fixture.
        assert!(financials.statements[1].1.is_empty());
        assert!(financials.statements[2].1.is_empty());
        assert_eq!(financials.statements[3].1.len(), 1);
    }

    #[test]
    fn test_parse_document_without_tables() {
        let document = Html::parse_document("<html><body><h1>Empty Co</h1></body></html>");
        let financials = parse_document(&document, "EMPTY");

        assert_eq!(financials.company_name, "Empty Co");
        assert!(financials.statements.iter().all(|(_, s)| s.is_empty()));
    }

    #[tokio::test]
    #[ignore]
    async fn test_visit() {
        dotenv::dotenv().ok();
        logging::debug_file_async("start visit".to_string());

        match visit("TCS").await {
            Ok(financials) => {
                dbg!(&financials.company_name);
                logging::debug_file_async(format!("{:#?}", financials.company_name));
            }
            Err(why) => {
                logging::debug_file_async(format!("Failed to visit because {:?}", why));
            }
        }

        logging::debug_file_async("end visit".to_string());
    }
}
