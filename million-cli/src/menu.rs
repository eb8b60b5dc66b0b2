//! Single-letter console menus.
//!
//! Each menu is an enum implementing [`MenuOption`]. An answer matches an
//! option by its letter or its full name, ignoring case and surrounding
//! whitespace.

use million_core::{FilingStatus, HousingStatus};

pub trait MenuOption: Copy + Sized + 'static {
    /// Question shown before the choices.
    const QUESTION: &'static str;

    fn options() -> &'static [Self];

    fn key(&self) -> char;

    /// Full lowercase name, also accepted as an answer.
    fn name(&self) -> &'static str;

    fn from_answer(answer: &str) -> Option<Self> {
        let answer = answer.trim().to_ascii_lowercase();
        Self::options()
            .iter()
            .copied()
            .find(|option| answer == option.key().to_string() || answer == option.name())
    }

    /// `h/s` style hint listing every key.
    fn keys() -> String {
        Self::options()
            .iter()
            .map(|option| option.key().to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// `h (hourly), s (salary)` style listing used when re-prompting.
    fn choices() -> String {
        Self::options()
            .iter()
            .map(|option| format!("{} ({})", option.key(), option.name().replace('_', " ")))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn prompt() -> String {
        format!("{} {}", Self::QUESTION, Self::keys())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeKind {
    Hourly,
    Salary,
}

impl MenuOption for IncomeKind {
    const QUESTION: &'static str = "Are you paid hourly or on salary?";

    fn options() -> &'static [Self] {
        &[IncomeKind::Hourly, IncomeKind::Salary]
    }

    fn key(&self) -> char {
        match self {
            Self::Hourly => 'h',
            Self::Salary => 's',
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Salary => "salary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl MenuOption for YesNo {
    const QUESTION: &'static str = "Do you want to calculate expenses?";

    fn options() -> &'static [Self] {
        &[YesNo::Yes, YesNo::No]
    }

    fn key(&self) -> char {
        match self {
            Self::Yes => 'y',
            Self::No => 'n',
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryChoice {
    Yes,
    No,
    Quit,
}

impl MenuOption for RetryChoice {
    const QUESTION: &'static str = "Would you like to try again? (\"q\" to quit)";

    fn options() -> &'static [Self] {
        &[RetryChoice::Yes, RetryChoice::No, RetryChoice::Quit]
    }

    fn key(&self) -> char {
        match self {
            Self::Yes => 'y',
            Self::No => 'n',
            Self::Quit => 'q',
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Quit => "quit",
        }
    }
}

impl MenuOption for HousingStatus {
    const QUESTION: &'static str = "Do you rent or own your home?";

    fn options() -> &'static [Self] {
        &[HousingStatus::Rent, HousingStatus::Own]
    }

    fn key(&self) -> char {
        match self {
            Self::Rent => 'r',
            Self::Own => 'o',
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Own => "own",
        }
    }
}

impl MenuOption for FilingStatus {
    const QUESTION: &'static str = "What is your tax filing status?";

    fn options() -> &'static [Self] {
        FilingStatus::all()
    }

    fn key(&self) -> char {
        match self {
            Self::Single => 's',
            Self::MarriedFilingJointly => 'm',
            Self::HeadOfHousehold => 'h',
        }
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}
