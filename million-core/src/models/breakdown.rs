use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ExpenseCategory, FilingStatus};

/// Everything derived from one set of inputs.
///
/// Money values are rounded to cents. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialBreakdown {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub annual_gross: Decimal,
    pub monthly_gross: Decimal,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub payroll_tax: Decimal,
    pub total_taxes: Decimal,
    pub monthly_tax: Decimal,
    pub monthly_expenses: Decimal,
    /// Monthly expenses per category, in [`ExpenseCategory::all`] order.
    pub expense_totals: Vec<(ExpenseCategory, Decimal)>,
    /// Present for renters who gave their years renting.
    pub rent_history: Option<RentHistory>,
    pub monthly_net_income: Decimal,
    pub yearly_net_income: Decimal,
    pub marginal_rate: Decimal,
    pub effective_federal_rate: Decimal,
    pub effective_total_rate: Decimal,
}

/// Rent paid so far, assuming the current payment held for every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentHistory {
    pub years_renting: u32,
    pub total_rent_paid: Decimal,
    /// Monthly rent as a percentage of monthly gross income.
    pub share_of_monthly_gross: Decimal,
}
