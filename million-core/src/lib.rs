pub mod calculations;
pub mod diagnostics;
pub mod estimator;
pub mod models;
pub mod tables;

pub use diagnostics::{CollectedWarnings, TracingWarnings, WarningSink};
pub use estimator::{Estimate, EstimateRequest, Estimator, EstimatorError};
pub use models::*;
pub use tables::{TaxTable, TaxTableError};
