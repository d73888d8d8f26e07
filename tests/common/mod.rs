//! Common test utilities and fixtures

#![allow(dead_code)]

use profitshare::calculator::{CalculationInput, Expense, Member};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

/// Tax scenario: one tax-named monthly expense and frames cost, company takes all
pub fn tax_input() -> CalculationInput {
    CalculationInput {
        total_revenue: 1000.0,
        monthly_expenses: vec![
            Expense::with_id("rent", "Rent", 100.0),
            Expense::with_id("sales-tax", "Sales Tax", 25.0),
        ],
        non_monthly_expenses: vec![],
        frames_cost: 50.0,
        company_percentage: 100.0,
        members: vec![],
    }
}

/// Member split scenario: company half, two members sharing the other half
pub fn member_split_input() -> CalculationInput {
    CalculationInput {
        total_revenue: 6000.0,
        monthly_expenses: vec![
            Expense::with_id("rent", "Rent", 450.0),
            Expense::with_id("utilities", "Utilities", 150.0),
        ],
        non_monthly_expenses: vec![Expense::with_id("labor", "Labor", 200.0)],
        frames_cost: 500.0,
        company_percentage: 50.0,
        members: vec![
            Member::with_id("a", "A", 30.0),
            Member::with_id("b", "B", 20.0),
        ],
    }
}

/// The member split scenario as request JSON
pub fn member_split_json() -> Value {
    json!({
        "totalRevenue": 6000,
        "monthlyExpenses": [
            {"id": "rent", "name": "Rent", "amount": 450},
            {"id": "utilities", "name": "Utilities", "amount": 150}
        ],
        "nonMonthlyExpenses": [
            {"id": "labor", "name": "Labor", "amount": 200}
        ],
        "framesCost": 500,
        "companyPercentage": 50,
        "members": [
            {"id": "a", "name": "A", "percentage": 30},
            {"id": "b", "name": "B", "percentage": 20}
        ]
    })
}

/// Temporary directory holding a calculations file
pub struct StoreFixture {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl StoreFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("calculations.json");
        Self { temp_dir, path }
    }

    /// Write `value` as JSON into the fixture directory and return its path
    pub fn write_input(&self, name: &str, value: &Value) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
