use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Constant source tag written into every exported record.
pub const SOURCE: &str = "Screener.in";

/// Financial statement types published on a Screener company page.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, Serialize, Deserialize, Display, AsRefStr)]
pub enum Statement {
    #[serde(rename = "Profit & Loss")]
    #[strum(serialize = "Profit & Loss")]
    ProfitAndLoss,
    #[serde(rename = "Balance Sheet")]
    #[strum(serialize = "Balance Sheet")]
    BalanceSheet,
    #[serde(rename = "Cash Flow")]
    #[strum(serialize = "Cash Flow")]
    CashFlow,
    Ratios,
}

impl Statement {
    pub fn iterator() -> impl Iterator<Item = Self> {
        [
            Self::ProfitAndLoss,
            Self::BalanceSheet,
            Self::CashFlow,
            Self::Ratios,
        ]
        .iter()
        .copied()
    }
}

/// Unit bucket a metric is classified into during normalization.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, Serialize, Deserialize, Display, AsRefStr)]
pub enum Unit {
    #[serde(rename = "INR Crores")]
    #[strum(serialize = "INR Crores")]
    InrCrores,
    #[serde(rename = "INR")]
    #[strum(serialize = "INR")]
    Inr,
    Percentage,
    Ratio,
    Days,
    Number,
}
