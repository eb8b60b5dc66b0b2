//! Federal income tax from the bracket table.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross income |
//! | 2    | Standard deduction for the filing status |
//! | 3    | Taxable income (Line 1 - Line 2, minimum 0) |
//! | 4    | Tax: each bracket taxes the part of Line 3 inside `[lower, upper)` |
//! | 5    | Effective rate (Line 4 / Line 1 × 100, 0 when Line 1 is 0) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use million_core::calculations::TaxCalculator;
//! use million_core::{FilingStatus, TaxTable};
//!
//! let table = TaxTable::embedded_2024().unwrap();
//! let calculator = TaxCalculator::new(&table);
//!
//! let result = calculator.calculate(dec!(120000), FilingStatus::Single);
//!
//! assert_eq!(result.taxable_income, dec!(105400));
//! assert_eq!(result.federal_tax, dec!(18338.50));
//! assert_eq!(result.effective_rate, dec!(15.28));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;
use crate::calculations::common::{non_negative, percent_of, round_half_up};
use crate::diagnostics::WarningSink;
use crate::models::FilingStatus;
use crate::tables::TaxTable;

/// Result of a federal tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    pub filing_status: FilingStatus,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    /// Percentage of gross income.
    pub effective_rate: Decimal,
    /// Rate of the highest bracket the taxable income reaches.
    pub marginal_rate: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator<'a> {
    table: &'a TaxTable,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(table: &'a TaxTable) -> Self {
        Self { table }
    }

    /// Calculates federal tax on `gross_income` for `filing_status`.
    pub fn calculate(
        &self,
        gross_income: Decimal,
        filing_status: FilingStatus,
    ) -> TaxComputation {
        let taxable_income =
            self.taxable_income(gross_income, self.table.standard_deduction(filing_status));
        let (federal_tax, marginal_rate) =
            self.bracket_tax(taxable_income, self.table.brackets(filing_status));

        TaxComputation {
            filing_status,
            taxable_income,
            federal_tax,
            effective_rate: percent_of(federal_tax, gross_income),
            marginal_rate,
        }
    }

    /// Same as [`calculate`](Self::calculate) but takes a filing status code.
    ///
    /// Unrecognized codes are taxed as single and reported to `warnings`.
    pub fn calculate_for_code(
        &self,
        gross_income: Decimal,
        filing_status_code: &str,
        warnings: &dyn WarningSink,
    ) -> TaxComputation {
        let filing_status = FilingStatus::parse_or_default(filing_status_code, warnings);
        self.calculate(gross_income, filing_status)
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        standard_deduction: Decimal,
    ) -> Decimal {
        non_negative(round_half_up(gross_income - standard_deduction))
    }

    /// Walks the brackets in ascending order, taxing each slice of income at
    /// its bracket's rate. An amount equal to a bracket's upper bound is
    /// taxed entirely in that bracket.
    fn bracket_tax(
        &self,
        taxable_income: Decimal,
        brackets: &[TaxBracket],
    ) -> (Decimal, Decimal) {
        let mut remaining = taxable_income;
        let mut tax = Decimal::ZERO;
        let mut marginal_rate = Decimal::ZERO;

        for bracket in brackets {
            if remaining <= Decimal::ZERO {
                break;
            }

            let portion = match bracket.width() {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            tax += portion * bracket.tax_rate;
            remaining -= portion;
            marginal_rate = bracket.tax_rate;
        }

        (round_half_up(tax), marginal_rate)
    }
}
