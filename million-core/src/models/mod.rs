mod breakdown;
mod expenses;
mod filing_status;
mod income;
mod standard_deduction;
mod tax_bracket;
mod tax_year_config;

pub use breakdown::{FinancialBreakdown, RentHistory};
pub use expenses::{ExpenseCategory, ExpenseItem, ExpenseRecord, HousingStatus};
pub use filing_status::FilingStatus;
pub use income::Income;
pub use standard_deduction::StandardDeduction;
pub use tax_bracket::TaxBracket;
pub use tax_year_config::TaxYearConfig;
