//! Federal tax table loading and validation.
//!
//! The 2024 bracket and standard deduction tables ship as CSV files inside
//! the crate and are parsed on demand. Bracket rows use IRS schedule codes:
//!
//! - Schedule X → Single
//! - Schedule Y-1 → Married Filing Jointly
//! - Schedule Z → Head of Household
//!
//! Every schedule is validated on load so the calculators can rely on the
//! brackets partitioning `[0, ∞)` in ascending order.

use std::collections::HashMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{FilingStatus, StandardDeduction, TaxBracket};

const BRACKETS_2024_CSV: &str = include_str!("../data/tax_brackets_2024.csv");
const STANDARD_DEDUCTIONS_2024_CSV: &str = include_str!("../data/standard_deductions_2024.csv");

/// Errors that can occur when loading a tax table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("invalid filing status: {0}")]
    InvalidFilingStatus(String),

    #[error("table mixes tax years {0} and {1}")]
    MixedTaxYears(i32, i32),

    #[error("no brackets for {0:?}")]
    MissingBrackets(FilingStatus),

    #[error("no standard deduction for {0:?}")]
    MissingDeduction(FilingStatus),

    #[error("first bracket for {status:?} starts at {min_income}, expected 0")]
    DoesNotStartAtZero {
        status: FilingStatus,
        min_income: Decimal,
    },

    #[error("brackets for {status:?} leave a gap or overlap at {at}")]
    NotContiguous {
        status: FilingStatus,
        at: Decimal,
    },

    #[error("only the top bracket for {0:?} may be unbounded")]
    UnboundedBeforeTop(FilingStatus),

    #[error("top bracket for {0:?} must be unbounded")]
    BoundedTop(FilingStatus),

    #[error(
        "base tax for {status:?} bracket starting at {min_income} is {found}, expected {expected}"
    )]
    InconsistentBaseTax {
        status: FilingStatus,
        min_income: Decimal,
        found: Decimal,
        expected: Decimal,
    },
}

impl From<csv::Error> for TaxTableError {
    fn from(err: csv::Error) -> Self {
        TaxTableError::CsvParse(err.to_string())
    }
}

/// A single row from the brackets CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

/// A single row from the standard deductions CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StandardDeductionRecord {
    pub tax_year: i32,
    pub filing_status: String,
    pub amount: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Brackets and standard deduction for one filing status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingSchedule {
    pub standard_deduction: StandardDeduction,
    pub brackets: Vec<TaxBracket>,
}

/// Validated federal tax table for one tax year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTable {
    tax_year: i32,
    single: FilingSchedule,
    married_filing_jointly: FilingSchedule,
    head_of_household: FilingSchedule,
}

impl TaxTable {
    /// Loads the 2024 table compiled into the crate.
    pub fn embedded_2024() -> Result<Self, TaxTableError> {
        Self::from_csv(
            BRACKETS_2024_CSV.as_bytes(),
            STANDARD_DEDUCTIONS_2024_CSV.as_bytes(),
        )
    }

    /// Parses and validates a table from bracket and deduction CSV readers.
    pub fn from_csv<B: Read, D: Read>(
        brackets: B,
        deductions: D,
    ) -> Result<Self, TaxTableError> {
        let bracket_records = parse_records::<TaxBracketRecord, _>(brackets)?;
        let deduction_records = parse_records::<StandardDeductionRecord, _>(deductions)?;
        Self::from_records(&bracket_records, &deduction_records)
    }

    pub fn from_records(
        bracket_records: &[TaxBracketRecord],
        deduction_records: &[StandardDeductionRecord],
    ) -> Result<Self, TaxTableError> {
        let tax_year = single_tax_year(
            bracket_records
                .iter()
                .map(|r| r.tax_year)
                .chain(deduction_records.iter().map(|r| r.tax_year)),
        )?;

        let mut brackets: HashMap<FilingStatus, Vec<TaxBracket>> = HashMap::new();
        for record in bracket_records {
            let status = FilingStatus::from_schedule(record.schedule.trim())
                .ok_or_else(|| TaxTableError::InvalidSchedule(record.schedule.clone()))?;
            brackets.entry(status).or_default().push(TaxBracket {
                tax_year: record.tax_year,
                filing_status: status,
                min_income: record.min_income,
                max_income: record.max_income,
                tax_rate: record.rate,
                base_tax: record.base_tax,
            });
        }

        let mut deductions: HashMap<FilingStatus, StandardDeduction> = HashMap::new();
        for record in deduction_records {
            let status = FilingStatus::parse(&record.filing_status)
                .ok_or_else(|| TaxTableError::InvalidFilingStatus(record.filing_status.clone()))?;
            deductions.insert(
                status,
                StandardDeduction {
                    tax_year: record.tax_year,
                    filing_status: status,
                    amount: record.amount,
                },
            );
        }

        let mut take = |status: FilingStatus| -> Result<FilingSchedule, TaxTableError> {
            let mut schedule_brackets = brackets
                .remove(&status)
                .ok_or(TaxTableError::MissingBrackets(status))?;
            schedule_brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
            validate_brackets(status, &schedule_brackets)?;

            let standard_deduction = deductions
                .remove(&status)
                .ok_or(TaxTableError::MissingDeduction(status))?;

            debug!(
                filing_status = status.as_str(),
                brackets = schedule_brackets.len(),
                deduction = %standard_deduction.amount,
                "loaded tax schedule"
            );

            Ok(FilingSchedule {
                standard_deduction,
                brackets: schedule_brackets,
            })
        };

        Ok(Self {
            tax_year,
            single: take(FilingStatus::Single)?,
            married_filing_jointly: take(FilingStatus::MarriedFilingJointly)?,
            head_of_household: take(FilingStatus::HeadOfHousehold)?,
        })
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn schedule(
        &self,
        status: FilingStatus,
    ) -> &FilingSchedule {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn brackets(
        &self,
        status: FilingStatus,
    ) -> &[TaxBracket] {
        &self.schedule(status).brackets
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        self.schedule(status).standard_deduction.amount
    }
}

fn parse_records<T, R>(reader: R) -> Result<Vec<T>, TaxTableError>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

fn single_tax_year(mut years: impl Iterator<Item = i32>) -> Result<i32, TaxTableError> {
    let first = years.next().unwrap_or_default();
    match years.find(|year| *year != first) {
        Some(other) => Err(TaxTableError::MixedTaxYears(first, other)),
        None => Ok(first),
    }
}

/// Checks that sorted brackets partition `[0, ∞)` and that each base tax
/// matches the tax owed on every bracket below it.
fn validate_brackets(
    status: FilingStatus,
    brackets: &[TaxBracket],
) -> Result<(), TaxTableError> {
    let Some(first) = brackets.first() else {
        return Err(TaxTableError::MissingBrackets(status));
    };
    if first.min_income != Decimal::ZERO {
        return Err(TaxTableError::DoesNotStartAtZero {
            status,
            min_income: first.min_income,
        });
    }

    let mut expected_base_tax = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.base_tax != expected_base_tax {
            return Err(TaxTableError::InconsistentBaseTax {
                status,
                min_income: bracket.min_income,
                found: bracket.base_tax,
                expected: expected_base_tax,
            });
        }

        let next = brackets.get(index + 1);
        match (bracket.max_income, next) {
            (Some(max), Some(next)) => {
                if max != next.min_income || max <= bracket.min_income {
                    return Err(TaxTableError::NotContiguous { status, at: max });
                }
            }
            (Some(_), None) => return Err(TaxTableError::BoundedTop(status)),
            (None, Some(_)) => return Err(TaxTableError::UnboundedBeforeTop(status)),
            (None, None) => {}
        }

        if let Some(width) = bracket.width() {
            expected_base_tax += width * bracket.tax_rate;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const DEDUCTIONS_CSV: &str = "tax_year,filing_status,amount
2024,single,14600
2024,married,29200
2024,head_of_household,21900
";

    fn brackets_csv(single_rows: &str) -> String {
        format!(
            "tax_year,schedule,min_income,max_income,base_tax,rate
{single_rows}
2024,Y-1,0,23200,0,0.10
2024,Y-1,23200,,2320.00,0.12
2024,Z,0,16550,0,0.10
2024,Z,16550,,1655.00,0.12
"
        )
    }

    fn load(single_rows: &str) -> Result<TaxTable, TaxTableError> {
        TaxTable::from_csv(
            brackets_csv(single_rows).as_bytes(),
            DEDUCTIONS_CSV.as_bytes(),
        )
    }

    // =========================================================================
    // embedded table tests
    // =========================================================================

    #[test]
    fn embedded_2024_table_loads() {
        let table = TaxTable::embedded_2024().expect("embedded table should be valid");

        assert_eq!(table.tax_year(), 2024);
        for status in FilingStatus::all() {
            assert_eq!(table.brackets(*status).len(), 7);
        }
    }

    #[test]
    fn embedded_2024_standard_deductions() {
        let table = TaxTable::embedded_2024().unwrap();

        assert_eq!(table.standard_deduction(FilingStatus::Single), dec!(14600));
        assert_eq!(
            table.standard_deduction(FilingStatus::MarriedFilingJointly),
            dec!(29200)
        );
        assert_eq!(
            table.standard_deduction(FilingStatus::HeadOfHousehold),
            dec!(21900)
        );
    }

    #[test]
    fn embedded_2024_single_thresholds() {
        let table = TaxTable::embedded_2024().unwrap();
        let brackets = table.brackets(FilingStatus::Single);

        assert_eq!(brackets[0].max_income, Some(dec!(11600)));
        assert_eq!(brackets[1].max_income, Some(dec!(47150)));
        assert_eq!(brackets[6].min_income, dec!(609350));
        assert_eq!(brackets[6].max_income, None);
        assert_eq!(brackets[6].tax_rate, dec!(0.37));
    }

    // =========================================================================
    // parsing tests
    // =========================================================================

    #[test]
    fn parse_bracket_record_with_unlimited_max() {
        let csv = "tax_year,schedule,min_income,max_income,base_tax,rate\n\
                   2024,X,609350,,183647.25,0.37";

        let records = parse_records::<TaxBracketRecord, _>(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![TaxBracketRecord {
                tax_year: 2024,
                schedule: "X".to_string(),
                min_income: dec!(609350),
                max_income: None,
                base_tax: dec!(183647.25),
                rate: dec!(0.37),
            }]
        );
    }

    #[test]
    fn parse_rejects_malformed_number() {
        let csv = "tax_year,schedule,min_income,max_income,base_tax,rate\n2024,X,abc,100,0,0.10";

        let result = parse_records::<TaxBracketRecord, _>(csv.as_bytes());

        assert!(matches!(result, Err(TaxTableError::CsvParse(_))));
    }

    #[test]
    fn rows_are_sorted_before_validation() {
        let table = load("2024,X,11600,,1160.00,0.12\n2024,X,0,11600,0,0.10").unwrap();

        let brackets = table.brackets(FilingStatus::Single);
        assert_eq!(brackets[0].min_income, dec!(0));
        assert_eq!(brackets[1].min_income, dec!(11600));
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn rejects_unknown_schedule() {
        let result = load("2024,Y-2,0,,0,0.10");

        assert_eq!(result, Err(TaxTableError::InvalidSchedule("Y-2".to_string())));
    }

    #[test]
    fn rejects_missing_schedule() {
        let result = TaxTable::from_csv(
            "tax_year,schedule,min_income,max_income,base_tax,rate\n2024,X,0,,0,0.10".as_bytes(),
            DEDUCTIONS_CSV.as_bytes(),
        );

        assert_eq!(
            result,
            Err(TaxTableError::MissingBrackets(FilingStatus::MarriedFilingJointly))
        );
    }

    #[test]
    fn rejects_missing_deduction() {
        let result = TaxTable::from_csv(
            brackets_csv("2024,X,0,,0,0.10").as_bytes(),
            "tax_year,filing_status,amount\n2024,single,14600\n2024,married,29200".as_bytes(),
        );

        assert_eq!(
            result,
            Err(TaxTableError::MissingDeduction(FilingStatus::HeadOfHousehold))
        );
    }

    #[test]
    fn rejects_gap_between_brackets() {
        let result = load("2024,X,0,11600,0,0.10\n2024,X,12000,,1160.00,0.12");

        assert_eq!(
            result,
            Err(TaxTableError::NotContiguous {
                status: FilingStatus::Single,
                at: dec!(11600),
            })
        );
    }

    #[test]
    fn rejects_table_not_starting_at_zero() {
        let result = load("2024,X,100,,0,0.10");

        assert_eq!(
            result,
            Err(TaxTableError::DoesNotStartAtZero {
                status: FilingStatus::Single,
                min_income: dec!(100),
            })
        );
    }

    #[test]
    fn rejects_bounded_top_bracket() {
        let result = load("2024,X,0,11600,0,0.10");

        assert_eq!(result, Err(TaxTableError::BoundedTop(FilingStatus::Single)));
    }

    #[test]
    fn rejects_unbounded_bracket_below_top() {
        let result = load("2024,X,0,,0,0.10\n2024,X,11600,,1160.00,0.12");

        assert_eq!(
            result,
            Err(TaxTableError::UnboundedBeforeTop(FilingStatus::Single))
        );
    }

    #[test]
    fn rejects_wrong_base_tax() {
        let result = load("2024,X,0,11600,0,0.10\n2024,X,11600,,1000.00,0.12");

        assert_eq!(
            result,
            Err(TaxTableError::InconsistentBaseTax {
                status: FilingStatus::Single,
                min_income: dec!(11600),
                found: dec!(1000.00),
                expected: dec!(1160.00),
            })
        );
    }

    #[test]
    fn rejects_mixed_tax_years() {
        let result = load("2025,X,0,,0,0.10");

        assert!(matches!(result, Err(TaxTableError::MixedTaxYears(_, _))));
    }
}
