//! Boundary validation for calculation input
//!
//! The engine assumes validated input. Everything that reaches
//! [`crate::calculator::compute`] through the store or the HTTP API goes
//! through [`validate`] first. Values are never coerced here.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::engine::compute;
use super::types::{CalculationInput, Expense, Member};

/// Tolerance used by the advisory percentage check
const PERCENTAGE_TOLERANCE: f64 = 0.01;

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path of the offending field, e.g. `members[1].percentage`
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input rejected before computation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Field paths of every violation, in the order they were found
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.field.as_str()).collect()
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Default)]
struct IssueCollector {
    issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    fn push(&mut self, field: String, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field,
            message: message.into(),
        });
    }

    fn amount(&mut self, field: String, value: f64) {
        if !value.is_finite() {
            self.push(field, "must be a finite number");
        } else if value < 0.0 {
            self.push(field, format!("must not be negative (got {})", value));
        }
    }

    fn percentage(&mut self, field: String, value: f64) {
        if !value.is_finite() {
            self.push(field, "must be a finite number");
        } else if !(0.0..=100.0).contains(&value) {
            self.push(field, format!("must be between 0 and 100 (got {})", value));
        }
    }

    fn name(&mut self, field: String, value: &str) {
        if value.is_empty() {
            self.push(field, "is required");
        }
    }

    fn unique_ids<'a>(&mut self, list: &str, ids: impl Iterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for (index, id) in ids.enumerate() {
            if !seen.insert(id) {
                self.push(
                    format!("{}[{}].id", list, index),
                    format!("duplicate id '{}'", id),
                );
            }
        }
    }

    fn expenses(&mut self, list: &str, expenses: &[Expense]) {
        for (index, expense) in expenses.iter().enumerate() {
            self.name(format!("{}[{}].name", list, index), &expense.name);
            self.amount(format!("{}[{}].amount", list, index), expense.amount);
        }
        self.unique_ids(list, expenses.iter().map(|e| e.id.as_str()));
    }

    fn members(&mut self, members: &[Member]) {
        for (index, member) in members.iter().enumerate() {
            self.name(format!("members[{}].name", index), &member.name);
            self.percentage(format!("members[{}].percentage", index), member.percentage);
        }
        self.unique_ids("members", members.iter().map(|m| m.id.as_str()));
    }

    /// Individually valid amounts can still overflow once summed or scaled
    fn finite_result(&mut self, input: &CalculationInput) {
        if self.issues.is_empty() && !compute(input).is_finite() {
            self.push(
                "result".to_string(),
                "amounts are too large to compute a finite result",
            );
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }
}

/// Check every input constraint, reporting all violations at once
pub fn validate(input: &CalculationInput) -> Result<(), ValidationError> {
    let mut collector = IssueCollector::default();

    collector.amount("totalRevenue".to_string(), input.total_revenue);
    collector.expenses("monthlyExpenses", &input.monthly_expenses);
    collector.expenses("nonMonthlyExpenses", &input.non_monthly_expenses);
    collector.amount("framesCost".to_string(), input.frames_cost);
    collector.percentage("companyPercentage".to_string(), input.company_percentage);
    collector.members(&input.members);
    collector.finite_result(input);

    collector.finish()
}

/// Result of the advisory percentage check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentageCheck {
    pub total: f64,
    pub is_valid: bool,
}

/// Sum the company and member percentages and flag totals away from 100
///
/// Advisory only: a calculation whose percentages do not add up is still
/// computed and saved.
pub fn check_percentages(company_percentage: f64, members: &[Member]) -> PercentageCheck {
    let total = company_percentage + members.iter().map(|m| m.percentage).sum::<f64>();
    PercentageCheck {
        total,
        is_valid: (total - 100.0).abs() < PERCENTAGE_TOLERANCE,
    }
}
