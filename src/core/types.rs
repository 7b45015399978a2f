use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    pub gross_salary: f64,
    pub paye_tax: f64,
    pub health_deduction: f64,
    pub pension_deduction: f64,
    pub total_statutory_deductions: f64,
    pub net_salary_after_tax: f64,
    pub total_fixed_expenses: f64,
    pub remaining_for_savings_investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub target_amount: f64,
    pub timeframe_months: u32,
}

impl SavingsGoal {
    pub fn new(target_amount: f64, timeframe_months: u32) -> Self {
        Self {
            target_amount,
            timeframe_months,
        }
    }

    /// Months used for projections; an unset (zero) timeframe counts as one month.
    pub fn effective_months(&self) -> u32 {
        self.timeframe_months.max(1)
    }

    pub fn required_monthly_deposit(&self) -> f64 {
        self.target_amount / f64::from(self.effective_months())
    }
}

impl Default for SavingsGoal {
    fn default() -> Self {
        Self::new(0.0, 1)
    }
}

/// Rate as delivered by a feed: free text such as `"12.25%"`, or a bare number.
/// Both forms are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuoteRate {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub name: String,
    pub rate: QuoteRate,
}

impl RateQuote {
    pub fn text(name: impl Into<String>, rate: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate: QuoteRate::Text(rate.into()),
        }
    }

    pub fn percent(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate: QuoteRate::Number(rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateOffer {
    pub name: String,
    /// Annual rate as a fraction, e.g. 0.1225.
    pub annual_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedReturn {
    pub total_deposits: f64,
    pub interest_earned: f64,
    pub future_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOffer {
    pub name: String,
    pub annual_rate: f64,
    pub total_deposits: f64,
    pub interest_earned: f64,
    pub projected_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Suggestion {
    Info { message: String },
    Warning { message: String },
    Error { message: String },
    Header { message: String },
    BestPick { message: String, offer: RankedOffer },
    RankedOffer(RankedOffer),
}

impl Suggestion {
    pub fn kind(&self) -> &'static str {
        match self {
            Suggestion::Info { .. } => "info",
            Suggestion::Warning { .. } => "warning",
            Suggestion::Error { .. } => "error",
            Suggestion::Header { .. } => "header",
            Suggestion::BestPick { .. } => "best-pick",
            Suggestion::RankedOffer(_) => "ranked-offer",
        }
    }
}
