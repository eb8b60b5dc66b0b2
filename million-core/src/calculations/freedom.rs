//! Year-by-year projection of accumulated savings toward a goal.
//!
//! The projection is a lazy iterator: each step is one more year of saving
//! the yearly net income. It ends on the first year the running total
//! reaches the goal, so the number of steps is the smallest `Y` with
//! `Y × savings ≥ goal`. [`FreedomProjector::years_to_goal`] computes that
//! count directly, without stepping through the years.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use million_core::calculations::FreedomProjector;
//!
//! let projector = FreedomProjector::new(dec!(1000000));
//! let mut projection = projector.projection(30, dec!(250000)).unwrap();
//!
//! let first = projection.next().unwrap();
//! assert_eq!((first.year, first.age, first.total), (1, 31, dec!(250000)));
//! assert_eq!(projection.count(), 3);
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// Savings that never grow would never reach the goal.
    #[error("yearly net savings must be positive to reach the goal, got {0}")]
    NoSavings(Decimal),

    /// Savings so small the year count does not fit in a `u32`.
    #[error("yearly net savings of {0} would take too many years to reach the goal")]
    TooManyYears(Decimal),
}

/// One year of the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearProgress {
    /// 1-based year count since the projection started.
    pub year: u32,
    pub age: u32,
    /// Savings collected by the end of this year.
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreedomProjector {
    goal: Decimal,
}

impl FreedomProjector {
    pub fn new(goal: Decimal) -> Self {
        Self { goal }
    }

    /// Starts a projection for someone `start_age` years old.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::NoSavings`] when `yearly_savings` is zero or
    /// negative, before any year is projected.
    pub fn projection(
        &self,
        start_age: u32,
        yearly_savings: Decimal,
    ) -> Result<Projection, ProjectionError> {
        if yearly_savings <= Decimal::ZERO {
            return Err(ProjectionError::NoSavings(yearly_savings));
        }

        Ok(Projection {
            goal: self.goal,
            yearly_savings,
            year: 0,
            age: start_age,
            total: Decimal::ZERO,
        })
    }

    /// Number of years of saving `yearly_savings` needed to reach the goal:
    /// `ceil(goal / yearly_savings)`.
    ///
    /// # Errors
    ///
    /// - [`ProjectionError::NoSavings`] when `yearly_savings` is zero or
    ///   negative
    /// - [`ProjectionError::TooManyYears`] when the count exceeds `u32::MAX`
    pub fn years_to_goal(
        &self,
        yearly_savings: Decimal,
    ) -> Result<u32, ProjectionError> {
        if yearly_savings <= Decimal::ZERO {
            return Err(ProjectionError::NoSavings(yearly_savings));
        }
        if self.goal <= Decimal::ZERO {
            return Ok(0);
        }

        self.goal
            .checked_div(yearly_savings)
            .and_then(|years| years.ceil().to_u32())
            .ok_or(ProjectionError::TooManyYears(yearly_savings))
    }
}

/// Lazy sequence of [`YearProgress`] steps, see [`FreedomProjector::projection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    goal: Decimal,
    yearly_savings: Decimal,
    year: u32,
    age: u32,
    total: Decimal,
}

impl Iterator for Projection {
    type Item = YearProgress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.total >= self.goal {
            return None;
        }

        self.year = self.year.saturating_add(1);
        self.age = self.age.saturating_add(1);
        self.total = self.total.saturating_add(self.yearly_savings);

        Some(YearProgress {
            year: self.year,
            age: self.age,
            total: self.total,
        })
    }
}
