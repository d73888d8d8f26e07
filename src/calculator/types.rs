//! Data model for profit-sharing calculations
//!
//! Field names serialize as camelCase so the JSON shape matches what the
//! calculator front end sends and reads back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single named cost line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique within the list the expense belongs to
    pub id: String,
    pub name: String,
    pub amount: f64,
}

impl Expense {
    /// Create an expense with a freshly generated id
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, amount)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
        }
    }
}

/// A profit-sharing participant other than the company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Share of net profit, in percent (0..=100)
    pub percentage: f64,
}

impl Member {
    /// Create a member with a freshly generated id
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, percentage)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            percentage,
        }
    }
}

/// Everything needed to run one calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub total_revenue: f64,
    /// Unpaid recurring costs, subtracted from revenue
    #[serde(default)]
    pub monthly_expenses: Vec<Expense>,
    /// Costs already paid out of revenue, added back
    #[serde(default)]
    pub non_monthly_expenses: Vec<Expense>,
    pub frames_cost: f64,
    pub company_percentage: f64,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// The company's portion of the distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyShare {
    pub profit_share: f64,
    pub tax_refund: f64,
    pub frames_refund: f64,
    pub total: f64,
}

/// One member's portion of net profit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberShare {
    pub id: String,
    pub name: String,
    pub percentage: f64,
    pub share: f64,
}

/// Output of [`crate::calculator::compute`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub net_profit: f64,
    pub total_monthly_expenses: f64,
    pub total_non_monthly_expenses: f64,
    pub company_share: CompanyShare,
    pub member_shares: Vec<MemberShare>,
    pub total_distributed: f64,
}

impl CalculationResult {
    /// False when any amount overflowed; JSON has no encoding for those
    pub fn is_finite(&self) -> bool {
        let company = &self.company_share;
        [
            self.net_profit,
            self.total_monthly_expenses,
            self.total_non_monthly_expenses,
            company.profit_share,
            company.tax_refund,
            company.frames_refund,
            company.total,
            self.total_distributed,
        ]
        .iter()
        .chain(self.member_shares.iter().map(|m| &m.share))
        .all(|value| value.is_finite())
    }
}

/// A calculation as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCalculation {
    pub id: String,
    pub input: CalculationInput,
    pub result: CalculationResult,
    pub timestamp: DateTime<Utc>,
}

impl SavedCalculation {
    pub fn summary(&self) -> CalculationSummary {
        CalculationSummary {
            id: self.id.clone(),
            timestamp: self.timestamp,
            result: self.result.clone(),
        }
    }

    pub fn into_record(self) -> CalculationRecord {
        CalculationRecord {
            input: self.input,
            result: self.result,
        }
    }
}

/// Input and result of a stored calculation, as returned by lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub input: CalculationInput,
    pub result: CalculationResult,
}

/// Row of the recent-history listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSummary {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub result: CalculationResult,
}

/// Returned from a successful save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub id: String,
    pub result: CalculationResult,
}
