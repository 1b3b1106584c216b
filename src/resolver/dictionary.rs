//! Built-in company dictionary for offline symbol resolution.

use crate::util::text;

/// One known company with its NSE symbol and informal aliases.
pub struct CompanyAlias {
    pub name: &'static str,
    pub symbol: &'static str,
    /// Lowercase informal names users actually type.
    pub aliases: &'static [&'static str],
}

/// Large-cap NSE names that cover the common interactive queries. Anything
/// outside this list falls through to the remote search chain.
pub const COMPANIES: [CompanyAlias; 11] = [
    CompanyAlias {
        name: "Tata Consultancy Services",
        symbol: "TCS",
        aliases: &["tcs", "tata consultancy"],
    },
    CompanyAlias {
        name: "Infosys",
        symbol: "INFY",
        aliases: &["infy"],
    },
    CompanyAlias {
        name: "Reliance Industries",
        symbol: "RELIANCE",
        aliases: &["reliance", "ril"],
    },
    CompanyAlias {
        name: "HDFC Bank",
        symbol: "HDFCBANK",
        aliases: &["hdfc", "hdfc bank"],
    },
    CompanyAlias {
        name: "ICICI Bank",
        symbol: "ICICIBANK",
        aliases: &["icici", "icici bank"],
    },
    CompanyAlias {
        name: "Wipro",
        symbol: "WIPRO",
        aliases: &["wipro"],
    },
    CompanyAlias {
        name: "HCL Technologies",
        symbol: "HCLTECH",
        aliases: &["hcl", "hcl tech"],
    },
    CompanyAlias {
        name: "Tech Mahindra",
        symbol: "TECHM",
        aliases: &["tech mahindra", "techm"],
    },
    CompanyAlias {
        name: "Axis Bank",
        symbol: "AXISBANK",
        aliases: &["axis", "axis bank"],
    },
    CompanyAlias {
        name: "Kotak Mahindra Bank",
        symbol: "KOTAKBANK",
        aliases: &["kotak", "kotak bank"],
    },
    CompanyAlias {
        name: "Ambuja Cements",
        symbol: "AMBUJACEM",
        aliases: &["ambuja", "ambuja cement", "ambuja cements"],
    },
];

/// Exact lookup against names and aliases, case-insensitive.
pub fn exact(query: &str) -> Option<&'static str> {
    let lowered = query.trim().to_lowercase();

    COMPANIES
        .iter()
        .find(|company| {
            company.name.to_lowercase() == lowered
                || company.aliases.iter().any(|alias| *alias == lowered)
        })
        .map(|company| company.symbol)
}

/// True when the query already is a known symbol.
pub fn by_symbol(query: &str) -> Option<&'static str> {
    let upper = query.trim().to_uppercase();

    COMPANIES
        .iter()
        .find(|company| company.symbol == upper)
        .map(|company| company.symbol)
}

/// Fuzzy lookup over names and aliases, used for misspelled queries.
pub fn closest(query: &str) -> Option<&'static str> {
    let upper = query.trim().to_uppercase();

    let mut best: Option<(&'static str, f64)> = None;
    for company in &COMPANIES {
        let mut candidates = vec![company.name.to_uppercase(), company.symbol.to_string()];
        candidates.extend(company.aliases.iter().map(|alias| alias.to_uppercase()));

        for candidate in candidates {
            let score = text::similarity_ratio(&upper, &candidate);
            if score >= text::FUZZY_CUTOFF
                && best.map_or(true, |(_, best_score)| score > best_score)
            {
                best = Some((company.symbol, score));
            }
        }
    }

    best.map(|(symbol, _)| symbol)
}

/// Relevance terms for a symbol: the company name plus its aliases,
/// lowercased. Empty when the symbol is unknown.
pub fn relevance_terms(symbol: &str) -> Vec<String> {
    COMPANIES
        .iter()
        .find(|company| company.symbol == symbol)
        .map(|company| {
            let mut terms = vec![company.name.to_lowercase()];
            terms.extend(company.aliases.iter().map(|alias| alias.to_string()));
            terms
        })
        .unwrap_or_default()
}
