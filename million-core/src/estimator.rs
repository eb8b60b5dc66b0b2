//! Pipeline entry point: inputs in, breakdown and projection out.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::{
    FinanceAggregator, FinanceError, FreedomProjector, Projection, ProjectionError,
};
use crate::models::{ExpenseRecord, FilingStatus, FinancialBreakdown, Income, TaxYearConfig};
use crate::tables::{TaxTable, TaxTableError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimatorError {
    #[error("tax table error: {0}")]
    TaxTable(#[from] TaxTableError),

    #[error(transparent)]
    Finance(#[from] FinanceError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Everything collected from the user for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub age: u32,
    pub income: Income,
    pub expenses: ExpenseRecord,
    pub filing_status: FilingStatus,
}

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    pub request: EstimateRequest,
    pub breakdown: FinancialBreakdown,
    pub years_to_goal: u32,
    projection: Projection,
}

impl Estimate {
    /// One step per projected year, ending on the year the goal is reached.
    /// Steps are produced on demand.
    pub fn timeline(&self) -> Projection {
        self.projection.clone()
    }
}

#[derive(Debug, Clone)]
pub struct Estimator {
    table: TaxTable,
    config: TaxYearConfig,
}

impl Estimator {
    pub fn new(
        table: TaxTable,
        config: TaxYearConfig,
    ) -> Self {
        Self { table, config }
    }

    /// Estimator backed by the embedded 2024 tables.
    pub fn for_2024() -> Result<Self, EstimatorError> {
        Ok(Self::new(
            TaxTable::embedded_2024()?,
            TaxYearConfig::year_2024(),
        ))
    }

    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    ///
    /// - [`EstimatorError::Finance`] for negative income or expense amounts
    /// - [`EstimatorError::Projection`] when nothing is left to save each
    ///   year, so the goal can never be reached
    pub fn run(
        &self,
        request: &EstimateRequest,
    ) -> Result<Estimate, EstimatorError> {
        let breakdown = FinanceAggregator::new(&self.table, &self.config).aggregate(
            &request.income,
            &request.expenses,
            request.filing_status,
        )?;

        let projector = FreedomProjector::new(self.config.savings_goal);
        let projection = projector.projection(request.age, breakdown.yearly_net_income)?;
        let years_to_goal = projector.years_to_goal(breakdown.yearly_net_income)?;

        debug!(age = request.age, years_to_goal, "projection ready");

        Ok(Estimate {
            request: request.clone(),
            breakdown,
            years_to_goal,
            projection,
        })
    }
}
