//! Console input collection.
//!
//! [`Prompter`] is generic over its reader and writer so whole sessions can
//! be scripted in tests. Bad answers are handled here by asking again; only
//! end of input and I/O failures are returned to the caller.

use std::io::{self, BufRead, Write};

use million_core::{
    EstimateRequest, ExpenseItem, ExpenseRecord, FilingStatus, HousingStatus, Income, WarningSink,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::menu::{IncomeKind, MenuOption, YesNo};
use crate::utils::{parse_amount, parse_whole_number};

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed")]
    EndOfInput,

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `question`, then reads one trimmed line.
    pub fn ask(
        &mut self,
        question: &str,
    ) -> Result<String, PromptError> {
        write!(self.output, "{question} -- ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Asks until the answer is a whole number.
    pub fn ask_whole_number(
        &mut self,
        question: &str,
    ) -> Result<u32, PromptError> {
        loop {
            let answer = self.ask(question)?;
            match parse_whole_number(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    debug!(%err, "re-prompting");
                    writeln!(self.output, "Please enter a whole number, like 27.")?;
                }
            }
        }
    }

    /// Asks until the answer is a dollar amount of zero or more.
    /// An empty answer counts as zero.
    pub fn ask_amount(
        &mut self,
        question: &str,
    ) -> Result<Decimal, PromptError> {
        loop {
            let answer = self.ask(question)?;
            match parse_amount(&answer) {
                Ok(value) if value >= Decimal::ZERO => return Ok(value),
                Ok(_) => writeln!(self.output, "Please enter an amount of zero or more.")?,
                Err(err) => {
                    debug!(%err, "re-prompting");
                    writeln!(self.output, "Please enter a number, like 1250 or 18.50.")?;
                }
            }
        }
    }

    /// Reads one menu answer, `None` when it matches no option.
    pub fn ask_choice<T: MenuOption>(&mut self) -> Result<Option<T>, PromptError> {
        let answer = self.ask(&T::prompt())?;
        Ok(T::from_answer(&answer))
    }

    /// Asks until the answer matches a menu option.
    pub fn ask_menu<T: MenuOption>(&mut self) -> Result<T, PromptError> {
        loop {
            if let Some(choice) = self.ask_choice::<T>()? {
                return Ok(choice);
            }
            writeln!(self.output, "Please choose one of: {}.", T::choices())?;
        }
    }

    /// Filing status never re-prompts: an unrecognized answer is filed as
    /// single and reported to `warnings`.
    pub fn ask_filing_status(
        &mut self,
        warnings: &dyn WarningSink,
    ) -> Result<FilingStatus, PromptError> {
        let question = format!(
            "{} {}",
            <FilingStatus as MenuOption>::QUESTION,
            FilingStatus::choices()
        );
        let answer = self.ask(&question)?;
        Ok(FilingStatus::parse_or_default(&answer, warnings))
    }

    pub fn collect_income(&mut self) -> Result<Income, PromptError> {
        match self.ask_menu::<IncomeKind>()? {
            IncomeKind::Hourly => Ok(Income::Hourly {
                rate: self.ask_amount("What is your hourly rate?")?,
                hours_per_day: self.ask_amount("How many hours a day do you work?")?,
            }),
            IncomeKind::Salary => Ok(Income::Salary {
                annual: self.ask_amount("What is your annual salary?")?,
            }),
        }
    }

    /// Asks for every monthly expense, or none if the user skips them, then
    /// for housing status and rent history.
    pub fn collect_expenses(&mut self) -> Result<ExpenseRecord, PromptError> {
        let mut amounts = Vec::with_capacity(ExpenseItem::all().len());
        if self.ask_menu::<YesNo>()? == YesNo::Yes {
            for item in ExpenseItem::all() {
                let question = format!("How much is your monthly {}?", item.label());
                amounts.push((*item, self.ask_amount(&question)?));
            }
        }

        let housing_status = self.ask_menu::<HousingStatus>()?;
        let years_renting = match housing_status {
            HousingStatus::Rent => {
                Some(self.ask_whole_number("How many years have you been renting?")?)
            }
            HousingStatus::Own => None,
        };

        Ok(ExpenseRecord::new(amounts, housing_status, years_renting))
    }

    /// Runs every prompt in order and assembles the request.
    pub fn collect_request(
        &mut self,
        warnings: &dyn WarningSink,
    ) -> Result<EstimateRequest, PromptError> {
        let age = self.ask_whole_number("How old are you?")?;
        let income = self.collect_income()?;
        let expenses = self.collect_expenses()?;
        let filing_status = self.ask_filing_status(warnings)?;

        debug!(
            age,
            income = income.kind(),
            filing_status = filing_status.as_str(),
            "collected inputs"
        );

        Ok(EstimateRequest {
            age,
            income,
            expenses,
            filing_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use million_core::CollectedWarnings;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::menu::RetryChoice;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    // =========================================================================
    // primitive prompt tests
    // =========================================================================

    #[test]
    fn ask_writes_question_and_trims_answer() {
        let mut prompter = prompter("  hello  \n");

        let answer = prompter.ask("Say hi").unwrap();

        assert_eq!(answer, "hello");
        assert_eq!(output_of(prompter), "Say hi -- ");
    }

    #[test]
    fn ask_reports_end_of_input() {
        let mut prompter = prompter("");

        let result = prompter.ask("Anyone there?");

        assert!(matches!(result, Err(PromptError::EndOfInput)));
    }

    #[test]
    fn ask_whole_number_reprompts_until_valid() {
        let mut prompter = prompter("twenty\n27.5\n27\n");

        let age = prompter.ask_whole_number("How old are you?").unwrap();

        assert_eq!(age, 27);
        let output = output_of(prompter);
        assert_eq!(output.matches("How old are you? -- ").count(), 3);
        assert_eq!(output.matches("Please enter a whole number").count(), 2);
    }

    #[test]
    fn ask_amount_rejects_negative_and_garbage() {
        let mut prompter = prompter("-5\nabc\n$1,250.50\n");

        let amount = prompter.ask_amount("Rent?").unwrap();

        assert_eq!(amount, dec!(1250.50));
        let output = output_of(prompter);
        assert!(output.contains("Please enter an amount of zero or more."));
        assert!(output.contains("Please enter a number"));
    }

    #[test]
    fn ask_amount_empty_is_zero() {
        let mut prompter = prompter("\n");

        assert_eq!(prompter.ask_amount("Fuel?").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn ask_menu_reprompts_on_unknown_letter() {
        let mut prompter = prompter("x\nS\n");

        let kind = prompter.ask_menu::<IncomeKind>().unwrap();

        assert_eq!(kind, IncomeKind::Salary);
        assert!(output_of(prompter).contains("Please choose one of: h (hourly), s (salary)."));
    }

    #[test]
    fn ask_choice_returns_none_for_unknown_answer() {
        let mut prompter = prompter("maybe\n");

        let choice = prompter.ask_choice::<RetryChoice>().unwrap();

        assert_eq!(choice, None);
    }

    #[test]
    fn ask_filing_status_falls_back_without_reprompt() {
        let mut prompter = prompter("foo\n");
        let warnings = CollectedWarnings::default();

        let status = prompter.ask_filing_status(&warnings).unwrap();

        assert_eq!(status, FilingStatus::Single);
        assert_eq!(warnings.messages().len(), 1);
    }

    // =========================================================================
    // collection tests
    // =========================================================================

    #[test]
    fn collect_income_hourly() {
        let mut prompter = prompter("h\n20\n8\n");

        let income = prompter.collect_income().unwrap();

        assert_eq!(
            income,
            Income::Hourly {
                rate: dec!(20),
                hours_per_day: dec!(8),
            }
        );
    }

    #[test]
    fn collect_expenses_skipped_for_owner() {
        let mut prompter = prompter("n\no\n");

        let expenses = prompter.collect_expenses().unwrap();

        assert_eq!(expenses, ExpenseRecord::none(HousingStatus::Own));
    }

    #[test]
    fn collect_expenses_itemized_for_renter() {
        let mut answers = String::from("y\n");
        for item in ExpenseItem::all() {
            let amount = if *item == ExpenseItem::HousingPayment { "1000" } else { "10" };
            answers.push_str(amount);
            answers.push('\n');
        }
        answers.push_str("r\n3\n");
        let mut prompter = prompter(&answers);

        let expenses = prompter.collect_expenses().unwrap();

        assert_eq!(expenses.monthly_total(), Some(dec!(1150)));
        assert_eq!(expenses.amount(ExpenseItem::HousingPayment), dec!(1000));
        assert_eq!(expenses.years_renting(), Some(3));
    }

    #[test]
    fn collect_request_in_prompt_order() {
        let mut prompter = prompter("30\ns\n120000\nn\no\nm\n");
        let warnings = CollectedWarnings::default();

        let request = prompter.collect_request(&warnings).unwrap();

        assert_eq!(
            request,
            EstimateRequest {
                age: 30,
                income: Income::Salary {
                    annual: dec!(120000),
                },
                expenses: ExpenseRecord::none(HousingStatus::Own),
                filing_status: FilingStatus::MarriedFilingJointly,
            }
        );
        assert!(warnings.messages().is_empty());
    }

    #[test]
    fn collect_request_stops_at_end_of_input() {
        let mut prompter = prompter("30\ns\n");
        let warnings = CollectedWarnings::default();

        let result = prompter.collect_request(&warnings);

        assert!(matches!(result, Err(PromptError::EndOfInput)));
    }
}
