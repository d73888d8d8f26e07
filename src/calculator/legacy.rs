//! Fixed-field input format
//!
//! Older clients send monthly and non-monthly costs as named fields
//! instead of open expense lists. [`LegacyCalculationInput`] converts into
//! the canonical [`CalculationInput`] so the same engine serves both.

use serde::{Deserialize, Serialize};

use super::types::{CalculationInput, Expense, Member};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCalculationInput {
    pub total_revenue: f64,
    pub utilities: f64,
    pub tax: f64,
    pub mortgage: f64,
    pub other_monthly: f64,
    pub merchandise: f64,
    pub labor: f64,
    pub loans: f64,
    pub other_non_monthly: f64,
    pub frames_cost: f64,
    pub company_percentage: f64,
    #[serde(default)]
    pub members: Vec<Member>,
}

fn fixed_expense(list: &str, slug: &str, name: &str, amount: f64) -> Expense {
    Expense::with_id(format!("{}-{}", list, slug), name, amount)
}

impl From<LegacyCalculationInput> for CalculationInput {
    /// Zero-valued fields are kept, so the "Tax" line is always present and
    /// the company's tax refund equals the legacy `tax` field.
    fn from(legacy: LegacyCalculationInput) -> Self {
        let monthly_expenses = vec![
            fixed_expense("monthly", "utilities", "Utilities", legacy.utilities),
            fixed_expense("monthly", "tax", "Tax", legacy.tax),
            fixed_expense("monthly", "mortgage", "Mortgage", legacy.mortgage),
            fixed_expense("monthly", "other", "Other Monthly", legacy.other_monthly),
        ];
        let non_monthly_expenses = vec![
            fixed_expense("non-monthly", "merchandise", "Merchandise", legacy.merchandise),
            fixed_expense("non-monthly", "labor", "Labor", legacy.labor),
            fixed_expense("non-monthly", "loans", "Loans", legacy.loans),
            fixed_expense(
                "non-monthly",
                "other",
                "Other Non-Monthly",
                legacy.other_non_monthly,
            ),
        ];

        CalculationInput {
            total_revenue: legacy.total_revenue,
            monthly_expenses,
            non_monthly_expenses,
            frames_cost: legacy.frames_cost,
            company_percentage: legacy.company_percentage,
            members: legacy.members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{compute, validate};
    use serde_json::json;

    fn legacy() -> LegacyCalculationInput {
        serde_json::from_value(json!({
            "totalRevenue": 5000.0,
            "utilities": 150.0,
            "tax": 300.0,
            "mortgage": 1200.0,
            "otherMonthly": 50.0,
            "merchandise": 400.0,
            "labor": 600.0,
            "loans": 0.0,
            "otherNonMonthly": 0.0,
            "framesCost": 250.0,
            "companyPercentage": 40.0,
            "members": [{"id": "m1", "name": "Jo", "percentage": 60.0}]
        }))
        .unwrap()
    }

    #[test]
    fn test_fields_map_onto_expense_lists() {
        let input: CalculationInput = legacy().into();

        let names: Vec<_> = input.monthly_expenses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Utilities", "Tax", "Mortgage", "Other Monthly"]);
        let names: Vec<_> = input
            .non_monthly_expenses
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Merchandise", "Labor", "Loans", "Other Non-Monthly"]);
        assert_eq!(input.monthly_expenses[1].id, "monthly-tax");
        assert_eq!(input.members.len(), 1);
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_tax_field_becomes_refund() {
        let result = compute(&legacy().into());

        assert_eq!(result.total_monthly_expenses, 1700.0);
        assert_eq!(result.total_non_monthly_expenses, 1000.0);
        assert_eq!(result.net_profit, 5000.0 - 1700.0 + 1000.0 - 250.0);
        assert_eq!(result.company_share.tax_refund, 300.0);
        assert_eq!(result.company_share.frames_refund, 250.0);
    }

    #[test]
    fn test_zero_tax_still_produces_tax_line() {
        let mut legacy = legacy();
        legacy.tax = 0.0;
        let input: CalculationInput = legacy.into();

        assert!(input.monthly_expenses.iter().any(|e| e.name == "Tax"));
        assert_eq!(compute(&input).company_share.tax_refund, 0.0);
    }
}
