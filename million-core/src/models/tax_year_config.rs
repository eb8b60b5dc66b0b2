use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-year constants used alongside the bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    /// Maximum wages subject to Social Security tax.
    pub ss_wage_max: Decimal,
    pub ss_tax_rate: Decimal,
    /// Medicare applies to all wages, no cap.
    pub medicare_tax_rate: Decimal,
    pub work_days_per_week: Decimal,
    pub work_weeks_per_year: Decimal,
    pub savings_goal: Decimal,
}

impl TaxYearConfig {
    pub fn year_2024() -> Self {
        Self {
            tax_year: 2024,
            ss_wage_max: Decimal::new(160_200, 0),
            ss_tax_rate: Decimal::new(62, 3),
            medicare_tax_rate: Decimal::new(145, 4),
            work_days_per_week: Decimal::new(5, 0),
            work_weeks_per_year: Decimal::new(52, 0),
            savings_goal: Decimal::new(1_000_000, 0),
        }
    }
}

impl Default for TaxYearConfig {
    fn default() -> Self {
        Self::year_2024()
    }
}
