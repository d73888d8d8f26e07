//! Pure profit-sharing computation
//!
//! No I/O and no shared state; safe to call from any number of tasks.

use tracing::trace;

use super::types::{CalculationInput, CalculationResult, CompanyShare, Expense, MemberShare};

/// Substring that marks a monthly expense as the tax line
const TAX_MARKER: &str = "tax";

/// Whether an expense counts as the refundable tax line
///
/// Matches any name containing "tax", ignoring case. "Tax Advisor Fee"
/// matches as well; an explicit per-expense flag would replace this.
pub fn is_tax_expense(expense: &Expense) -> bool {
    expense.name.to_lowercase().contains(TAX_MARKER)
}

/// Amount of the first monthly expense recognised as tax, or zero
pub fn tax_refund_amount(monthly_expenses: &[Expense]) -> f64 {
    monthly_expenses
        .iter()
        .find(|expense| is_tax_expense(expense))
        .map(|expense| expense.amount)
        .unwrap_or(0.0)
}

fn sum_amounts(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

fn percent_of(amount: f64, percentage: f64) -> f64 {
    amount * percentage / 100.0
}

/// Compute net profit and its distribution
///
/// # Arguments
///
/// * `input` - A calculation input that has already passed validation
///
/// # Returns
///
/// The full distribution. Percentages are not required to add up to 100,
/// in which case `total_distributed` differs from net profit plus refunds.
pub fn compute(input: &CalculationInput) -> CalculationResult {
    let total_monthly_expenses = sum_amounts(&input.monthly_expenses);
    let total_non_monthly_expenses = sum_amounts(&input.non_monthly_expenses);

    // Non-monthly costs were already paid out of revenue, so they come back in.
    let net_profit = input.total_revenue - total_monthly_expenses + total_non_monthly_expenses
        - input.frames_cost;

    let profit_share = percent_of(net_profit, input.company_percentage);
    let tax_refund = tax_refund_amount(&input.monthly_expenses);
    let frames_refund = input.frames_cost;
    let company_share = CompanyShare {
        profit_share,
        tax_refund,
        frames_refund,
        total: profit_share + tax_refund + frames_refund,
    };

    let member_shares: Vec<MemberShare> = input
        .members
        .iter()
        .map(|member| MemberShare {
            id: member.id.clone(),
            name: member.name.clone(),
            percentage: member.percentage,
            share: percent_of(net_profit, member.percentage),
        })
        .collect();

    let total_distributed =
        company_share.total + member_shares.iter().map(|m| m.share).sum::<f64>();

    trace!(
        net_profit,
        company_total = company_share.total,
        members = member_shares.len(),
        total_distributed,
        "Computed profit distribution"
    );

    CalculationResult {
        net_profit,
        total_monthly_expenses,
        total_non_monthly_expenses,
        company_share,
        member_shares,
        total_distributed,
    }
}
