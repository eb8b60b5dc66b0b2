use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxYearConfig;

/// How the user is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Income {
    Hourly {
        rate: Decimal,
        hours_per_day: Decimal,
    },
    Salary {
        annual: Decimal,
    },
}

impl Income {
    /// Annual gross pay before taxes and expenses, `None` if it does not
    /// fit in a [`Decimal`].
    ///
    /// Hourly pay assumes a full work year: `rate × hours/day × days/week ×
    /// weeks/year` from the given config.
    pub fn annual_gross(
        &self,
        config: &TaxYearConfig,
    ) -> Option<Decimal> {
        match self {
            Self::Hourly {
                rate,
                hours_per_day,
            } => rate
                .checked_mul(*hours_per_day)?
                .checked_mul(config.work_days_per_week)?
                .checked_mul(config.work_weeks_per_year),
            Self::Salary { annual } => Some(*annual),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hourly { .. } => "hourly",
            Self::Salary { .. } => "salary",
        }
    }
}
