//! The calculation pipeline: federal tax, income aggregation and the
//! year-by-year savings projection.

pub mod common;
pub mod finance;
pub mod freedom;
pub mod tax;

pub use finance::{FinanceAggregator, FinanceError, PayrollTaxes};
pub use freedom::{FreedomProjector, Projection, ProjectionError, YearProgress};
pub use tax::{TaxCalculator, TaxComputation};
