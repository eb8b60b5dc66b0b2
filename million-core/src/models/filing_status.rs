use serde::{Deserialize, Serialize};

use crate::diagnostics::WarningSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Single,
    #[serde(rename = "married")]
    MarriedFilingJointly,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const DEFAULT: Self = Self::Single;

    pub fn all() -> &'static [FilingStatus] {
        &[
            FilingStatus::Single,
            FilingStatus::MarriedFilingJointly,
            FilingStatus::HeadOfHousehold,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedFilingJointly => "married",
            Self::HeadOfHousehold => "head_of_household",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::HeadOfHousehold => "Head of Household",
        }
    }

    /// IRS rate schedule letter used in the bracket tables.
    pub fn schedule(&self) -> &'static str {
        match self {
            Self::Single => "X",
            Self::MarriedFilingJointly => "Y-1",
            Self::HeadOfHousehold => "Z",
        }
    }

    pub fn from_schedule(schedule: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.schedule() == schedule)
    }

    /// Parses a filing status code.
    ///
    /// Accepts the single-letter menu shortcut (`s`, `m`, `h`), the code
    /// (`single`, `married`, `head_of_household`) or a few common spellings.
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse(code: &str) -> Option<Self> {
        let normalized = code.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "s" | "single" => Some(Self::Single),
            "m" | "married" | "married_filing_jointly" | "mfj" => Some(Self::MarriedFilingJointly),
            "h" | "head_of_household" | "hoh" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }

    /// Parses a filing status code, falling back to [`FilingStatus::DEFAULT`]
    /// and reporting a warning when the code is not recognized.
    pub fn parse_or_default(
        code: &str,
        warnings: &dyn WarningSink,
    ) -> Self {
        Self::parse(code).unwrap_or_else(|| {
            warnings.warn(&format!(
                "unrecognized filing status '{}', using '{}'",
                code.trim(),
                Self::DEFAULT.as_str()
            ));
            Self::DEFAULT
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diagnostics::CollectedWarnings;

    #[test]
    fn parse_accepts_menu_letters() {
        assert_eq!(FilingStatus::parse("s"), Some(FilingStatus::Single));
        assert_eq!(
            FilingStatus::parse("M"),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(FilingStatus::parse(" h "), Some(FilingStatus::HeadOfHousehold));
    }

    #[test]
    fn parse_accepts_codes_and_spellings() {
        assert_eq!(FilingStatus::parse("single"), Some(FilingStatus::Single));
        assert_eq!(
            FilingStatus::parse("Married Filing Jointly"),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            FilingStatus::parse("head-of-household"),
            Some(FilingStatus::HeadOfHousehold)
        );
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(FilingStatus::parse("foo"), None);
        assert_eq!(FilingStatus::parse(""), None);
    }

    #[test]
    fn parse_or_default_falls_back_to_single_with_warning() {
        let warnings = CollectedWarnings::default();

        let status = FilingStatus::parse_or_default("foo", &warnings);

        assert_eq!(status, FilingStatus::Single);
        assert_eq!(
            warnings.messages(),
            vec!["unrecognized filing status 'foo', using 'single'".to_string()]
        );
    }

    #[test]
    fn parse_or_default_is_silent_for_known_code() {
        let warnings = CollectedWarnings::default();

        let status = FilingStatus::parse_or_default("married", &warnings);

        assert_eq!(status, FilingStatus::MarriedFilingJointly);
        assert!(warnings.messages().is_empty());
    }

    #[test]
    fn schedule_round_trips_for_every_status() {
        for status in FilingStatus::all() {
            assert_eq!(FilingStatus::from_schedule(status.schedule()), Some(*status));
        }
        assert_eq!(FilingStatus::from_schedule("Y-2"), None);
    }
}
