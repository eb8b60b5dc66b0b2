//! Income, payroll tax and net savings aggregation.
//!
//! Turns an income descriptor and monthly expenses into a
//! [`FinancialBreakdown`]:
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Annual gross (hourly: rate × hours/day × 5 × 52, salary: as entered) |
//! | 2    | Federal tax from [`TaxCalculator`] |
//! | 3    | Social Security: smaller of Line 1 or the wage base × 6.2% |
//! | 4    | Medicare: Line 1 × 1.45% |
//! | 5    | Total taxes (Line 2 + Line 3 + Line 4) |
//! | 6    | Monthly net (Line 1 / 12 - monthly expenses - Line 5 / 12, minimum 0) |
//! | 7    | Yearly net (Line 6 × 12) |
//!
//! Every step uses checked arithmetic: amounts typed at the console can be
//! as large as [`Decimal::MAX`], and a result that does not fit is reported
//! as [`FinanceError::Overflow`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::TaxCalculator;
use crate::calculations::common::{non_negative, percent_of, round_half_up};
use crate::models::{
    ExpenseItem, ExpenseRecord, FilingStatus, FinancialBreakdown, HousingStatus, Income,
    RentHistory, TaxYearConfig,
};
use crate::tables::TaxTable;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Errors that can occur while aggregating finances.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinanceError {
    /// An income or expense amount was negative.
    #[error("{field} cannot be negative, got {value}")]
    NegativeAmount { field: String, value: Decimal },

    /// A derived figure does not fit in a [`Decimal`].
    #[error("{0} is too large to calculate")]
    Overflow(&'static str),
}

/// Employee share of Social Security and Medicare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxes {
    pub social_security: Decimal,
    pub medicare: Decimal,
}

impl PayrollTaxes {
    pub fn total(&self) -> Decimal {
        self.social_security + self.medicare
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FinanceAggregator<'a> {
    calculator: TaxCalculator<'a>,
    config: &'a TaxYearConfig,
}

impl<'a> FinanceAggregator<'a> {
    pub fn new(
        table: &'a TaxTable,
        config: &'a TaxYearConfig,
    ) -> Self {
        Self {
            calculator: TaxCalculator::new(table),
            config,
        }
    }

    /// Social Security is capped at the wage base; Medicare is not.
    pub fn payroll_taxes(
        &self,
        annual_gross: Decimal,
    ) -> PayrollTaxes {
        let ss_wages = annual_gross.min(self.config.ss_wage_max);
        PayrollTaxes {
            social_security: round_half_up(ss_wages * self.config.ss_tax_rate),
            medicare: round_half_up(annual_gross * self.config.medicare_tax_rate),
        }
    }

    /// Builds the full breakdown for one set of inputs.
    ///
    /// # Errors
    ///
    /// - [`FinanceError::NegativeAmount`] if any income figure or expense
    ///   amount is negative
    /// - [`FinanceError::Overflow`] if a derived figure does not fit
    pub fn aggregate(
        &self,
        income: &Income,
        expenses: &ExpenseRecord,
        filing_status: FilingStatus,
    ) -> Result<FinancialBreakdown, FinanceError> {
        validate_income(income)?;
        validate_expenses(expenses)?;

        let annual_gross = income
            .annual_gross(self.config)
            .map(round_half_up)
            .ok_or(FinanceError::Overflow("annual gross income"))?;
        let tax = self.calculator.calculate(annual_gross, filing_status);
        let payroll = self.payroll_taxes(annual_gross);
        let total_taxes = tax
            .federal_tax
            .checked_add(payroll.total())
            .ok_or(FinanceError::Overflow("total taxes"))?;

        let expense_totals = expenses
            .category_totals()
            .ok_or(FinanceError::Overflow("the monthly expense total"))?;
        let monthly_expenses = expenses
            .monthly_total()
            .ok_or(FinanceError::Overflow("the monthly expense total"))?;

        let monthly_gross = annual_gross / MONTHS_PER_YEAR;
        let monthly_tax = total_taxes / MONTHS_PER_YEAR;
        let monthly_net = monthly_gross
            .checked_sub(monthly_expenses)
            .and_then(|left| left.checked_sub(monthly_tax))
            .map(non_negative)
            .ok_or(FinanceError::Overflow("monthly net income"))?;
        let yearly_net = monthly_net
            .checked_mul(MONTHS_PER_YEAR)
            .map(round_half_up)
            .ok_or(FinanceError::Overflow("yearly net income"))?;

        let monthly_gross = round_half_up(monthly_gross);
        let rent_history = rent_history(expenses, monthly_gross)?;

        debug!(
            income = income.kind(),
            %annual_gross,
            federal_tax = %tax.federal_tax,
            payroll_tax = %payroll.total(),
            %yearly_net,
            "aggregated finances"
        );

        Ok(FinancialBreakdown {
            tax_year: self.config.tax_year,
            filing_status,
            annual_gross,
            monthly_gross,
            taxable_income: tax.taxable_income,
            federal_tax: tax.federal_tax,
            social_security_tax: payroll.social_security,
            medicare_tax: payroll.medicare,
            payroll_tax: payroll.total(),
            total_taxes,
            monthly_tax: round_half_up(monthly_tax),
            monthly_expenses: round_half_up(monthly_expenses),
            expense_totals,
            rent_history,
            monthly_net_income: round_half_up(monthly_net),
            yearly_net_income: yearly_net,
            marginal_rate: tax.marginal_rate,
            effective_federal_rate: tax.effective_rate,
            effective_total_rate: percent_of(total_taxes, annual_gross),
        })
    }
}

/// Rent analysis for renters who gave their years renting.
fn rent_history(
    expenses: &ExpenseRecord,
    monthly_gross: Decimal,
) -> Result<Option<RentHistory>, FinanceError> {
    let years_renting = match (expenses.housing_status(), expenses.years_renting()) {
        (HousingStatus::Rent, Some(years)) => years,
        _ => return Ok(None),
    };

    let monthly_rent = expenses.amount(ExpenseItem::HousingPayment);
    let total_rent_paid = monthly_rent
        .checked_mul(MONTHS_PER_YEAR)
        .and_then(|yearly| yearly.checked_mul(Decimal::from(years_renting)))
        .map(round_half_up)
        .ok_or(FinanceError::Overflow("total rent paid"))?;
    let share_of_monthly_gross = if monthly_gross > Decimal::ZERO {
        monthly_rent
            .checked_div(monthly_gross)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .map(round_half_up)
            .ok_or(FinanceError::Overflow("the rent share of income"))?
    } else {
        Decimal::ZERO
    };

    Ok(Some(RentHistory {
        years_renting,
        total_rent_paid,
        share_of_monthly_gross,
    }))
}

fn ensure_non_negative(
    field: &str,
    value: Decimal,
) -> Result<(), FinanceError> {
    if value < Decimal::ZERO {
        return Err(FinanceError::NegativeAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_income(income: &Income) -> Result<(), FinanceError> {
    match income {
        Income::Hourly {
            rate,
            hours_per_day,
        } => {
            ensure_non_negative("hourly rate", *rate)?;
            ensure_non_negative("hours per day", *hours_per_day)
        }
        Income::Salary { annual } => ensure_non_negative("annual salary", *annual),
    }
}

fn validate_expenses(expenses: &ExpenseRecord) -> Result<(), FinanceError> {
    expenses
        .items()
        .try_for_each(|(item, amount)| ensure_non_negative(item.label(), amount))
}
