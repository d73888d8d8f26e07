//! Profit-sharing calculation engine
//!
//! - `types` - Input, result and saved-calculation records
//! - `engine` - The pure [`compute`] function and the tax-line predicate
//! - `validation` - Boundary checks run before anything is computed or stored
//! - `legacy` - Adapter for the fixed-field input format

pub mod engine;
pub mod legacy;
pub mod types;
pub mod validation;

pub use engine::{compute, is_tax_expense, tax_refund_amount};
pub use legacy::LegacyCalculationInput;
pub use types::{
    CalculationInput, CalculationRecord, CalculationResult, CalculationSummary, CompanyShare,
    Expense, Member, MemberShare, SaveOutcome, SavedCalculation,
};
pub use validation::{check_percentages, validate, PercentageCheck, ValidationError, ValidationIssue};
