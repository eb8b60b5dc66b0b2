//! The interactive loop: banner, prompts, report, then the retry menu.
//!
//! Each "try again" restarts from the banner.

use std::io::{BufRead, Write};

use million_core::calculations::ProjectionError;
use million_core::{Estimator, EstimatorError, WarningSink};
use tracing::{error, info};

use crate::menu::RetryChoice;
use crate::prompt::{PromptError, Prompter};
use crate::report;

pub struct Session<'a, R, W> {
    prompter: Prompter<R, W>,
    estimator: &'a Estimator,
    warnings: &'a dyn WarningSink,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        prompter: Prompter<R, W>,
        estimator: &'a Estimator,
        warnings: &'a dyn WarningSink,
    ) -> Self {
        Self {
            prompter,
            estimator,
            warnings,
        }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Runs estimates until the user declines to try again or input ends.
    ///
    /// Closed input ends the session normally; only console I/O failures
    /// are returned.
    pub fn run(&mut self) -> Result<(), PromptError> {
        match self.run_rounds() {
            Err(PromptError::EndOfInput) => {
                info!("input closed, ending session");
                writeln!(self.prompter.output())?;
                Ok(())
            }
            other => other,
        }
    }

    fn run_rounds(&mut self) -> Result<(), PromptError> {
        loop {
            report::write_banner(self.prompter.output())?;
            self.run_once()?;

            // Anything but yes or no ends the session, like an explicit quit.
            match self.prompter.ask_choice::<RetryChoice>()? {
                Some(RetryChoice::Yes) => {
                    info!("starting another estimate");
                }
                Some(RetryChoice::No) => {
                    writeln!(self.prompter.output(), "{}", report::FAREWELL)?;
                    return Ok(());
                }
                Some(RetryChoice::Quit) | None => return Ok(()),
            }
        }
    }

    /// Collects one set of inputs and prints the result.
    pub fn run_once(&mut self) -> Result<(), PromptError> {
        let request = self.prompter.collect_request(self.warnings)?;
        let goal = self.estimator.config().savings_goal;

        match self.estimator.run(&request) {
            Ok(estimate) => {
                info!(years = estimate.years_to_goal, "estimate complete");
                report::render(self.prompter.output(), &estimate, goal)?;
            }
            Err(EstimatorError::Projection(ProjectionError::NoSavings(savings))) => {
                info!(%savings, "no yearly savings, goal unreachable");
                report::write_no_savings(self.prompter.output(), goal)?;
            }
            Err(err) => {
                error!(%err, "estimate failed");
                writeln!(self.prompter.output(), "\nCould not finish the estimate: {err}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use million_core::CollectedWarnings;

    use super::*;

    fn run_script(script: &str) -> (String, Vec<String>) {
        let estimator = Estimator::for_2024().unwrap();
        let warnings = CollectedWarnings::default();
        let prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());

        let mut session = Session::new(prompter, &estimator, &warnings);
        session.run().unwrap();

        let output = String::from_utf8(session.into_prompter().into_output()).unwrap();
        (output, warnings.messages())
    }

    #[test]
    fn single_round_then_decline() {
        let (output, warnings) = run_script("30\ns\n120000\nn\no\ns\nn\n");

        assert!(output.contains("ROAD TO $1,000,000 CASH"));
        assert!(output.contains("It will take you 11 years to collect $1,000,000."));
        assert!(output.ends_with(&format!("{}\n", report::FAREWELL)));
        assert!(warnings.is_empty());
    }

    #[test]
    fn quit_ends_without_farewell() {
        let (output, _) = run_script("30\ns\n120000\nn\no\ns\nq\n");

        assert!(!output.contains(report::FAREWELL));
    }

    #[test]
    fn unknown_retry_answer_ends_session() {
        let (output, _) = run_script("30\ns\n120000\nn\no\ns\nmaybe\n");

        assert_eq!(output.matches("How old are you?").count(), 1);
        assert!(!output.contains(report::FAREWELL));
    }

    #[test]
    fn end_of_input_mid_round_is_not_an_error() {
        let (output, _) = run_script("30\nh\n");

        assert!(output.contains("What is your hourly rate?"));
    }

    #[test]
    fn zero_savings_is_reported_then_retry_offered() {
        let (output, _) = run_script("30\ns\n0\nn\no\ns\nq\n");

        assert!(output.contains("you will never collect $1,000,000"));
        assert!(output.contains("Would you like to try again?"));
        assert!(!output.contains("years old, you will have collected"));
    }

    #[test]
    fn unrecognized_filing_status_is_reported_to_sink() {
        let (output, warnings) = run_script("30\ns\n120000\nn\no\nxyz\nq\n");

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("xyz"));
        assert!(output.contains("FINANCIAL BREAKDOWN (2024 tax year, Single)"));
        assert!(!output.contains("unrecognized filing status"));
    }

    #[test]
    fn retry_reprints_banner() {
        let (output, _) = run_script("30\ns\n120000\nn\no\ns\ny\n31\ns\n90000\nn\no\ns\nq\n");

        assert_eq!(output.matches("ROAD TO $1,000,000 CASH").count(), 2);
        let second_banner = output.rfind("ROAD TO $1,000,000 CASH").unwrap();
        let second_age = output.rfind("How old are you?").unwrap();
        assert!(second_banner < second_age);
    }

    #[test]
    fn oversized_hourly_rate_returns_to_retry() {
        let script = concat!(
            "30\nh\n79228162514264337593543950335\n2\nn\no\ns\n",
            "y\n30\ns\n120000\nn\no\ns\nq\n"
        );

        let (output, _) = run_script(script);

        assert!(output.contains(
            "Could not finish the estimate: annual gross income is too large to calculate"
        ));
        assert!(output.contains("It will take you 11 years to collect $1,000,000."));
    }

    #[test]
    fn maximum_expenses_return_to_retry() {
        let mut script = String::from("30\ns\n50000\ny\n");
        for _ in 0..16 {
            script.push_str("79228162514264337593543950335\n");
        }
        script.push_str("o\ns\nq\n");

        let (output, _) = run_script(&script);

        assert!(output.contains(
            "Could not finish the estimate: the monthly expense total is too large to calculate"
        ));
        assert!(output.contains("Would you like to try again?"));
    }
}
