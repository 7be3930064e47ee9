use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::validation::ValidationState;

/// Zero or more two-letter tokens, separated by at least one whitespace character.
static PAIR_LIST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z]{2}(?:\s+[a-z]{2})*)?$").expect("Invalid plugboard pair regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlugboardError {
    #[error("Invalid format: Please enter two-letter pairs separated by spaces \"xy ab gh...\"")]
    InvalidFormat,
    #[error("Duplicate letter: {letter} is plugged multiple times")]
    DuplicateLetter { letter: char },
}

/// Outcome of both plugboard checks. They are computed independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlugboardReport {
    pub format_valid: bool,
    pub duplicate_letter: Option<char>,
}

impl PlugboardReport {
    pub fn is_valid(&self) -> bool {
        self.format_valid && self.duplicate_letter.is_none()
    }

    /// Format errors take precedence over a reused letter.
    pub fn into_result(self) -> Result<(), PlugboardError> {
        if !self.format_valid {
            return Err(PlugboardError::InvalidFormat);
        }
        match self.duplicate_letter {
            Some(letter) => Err(PlugboardError::DuplicateLetter { letter }),
            None => Ok(()),
        }
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn check_plugboard(text: &str) -> PlugboardReport {
    let normalized = normalize(text);
    PlugboardReport {
        format_valid: PAIR_LIST_REGEX.is_match(&normalized),
        duplicate_letter: first_duplicate_letter(&normalized),
    }
}

pub fn validate_plugboard(text: &str) -> Result<(), PlugboardError> {
    check_plugboard(text).into_result()
}

/// First character, scanning tokens then characters in order, already seen earlier.
/// Runs on any input, well-formed or not.
pub fn first_duplicate_letter(normalized: &str) -> Option<char> {
    let mut used = HashSet::new();
    normalized
        .split_whitespace()
        .flat_map(str::chars)
        .find(|letter| !used.insert(*letter))
}

#[derive(Debug, Clone)]
pub struct PlugboardValidator {
    text: String,
    report: PlugboardReport,
    state: ValidationState,
}

impl Default for PlugboardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlugboardValidator {
    pub fn new() -> Self {
        let mut validator = Self {
            text: String::new(),
            report: check_plugboard(""),
            state: ValidationState::valid(),
        };
        validator.revalidate();
        validator
    }

    /// Applies one input event carrying the full field text.
    pub fn input(&mut self, text: impl Into<String>) -> &ValidationState {
        self.text = text.into();
        self.revalidate();
        &self.state
    }

    /// Raw field text, as it will be submitted.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn report(&self) -> PlugboardReport {
        self.report
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    fn revalidate(&mut self) {
        self.report = check_plugboard(&self.text);
        self.state = ValidationState::from_result(&self.report.into_result());
        debug!(
            format_valid = self.report.format_valid,
            duplicate = ?self.report.duplicate_letter,
            "plugboard revalidated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_text_is_valid() {
        assert_eq!(validate_plugboard(""), Ok(()));
        assert_eq!(validate_plugboard("   \t "), Ok(()));
    }

    #[test]
    fn whitespace_separated_pairs_are_valid() {
        assert_eq!(validate_plugboard("ab cd ef"), Ok(()));
        assert_eq!(validate_plugboard("  AB\tcd   Ef  "), Ok(()));
    }

    #[test]
    fn tokens_that_are_not_two_letters_are_format_errors() {
        assert_eq!(validate_plugboard("ab cde"), Err(PlugboardError::InvalidFormat));
        assert_eq!(validate_plugboard("a"), Err(PlugboardError::InvalidFormat));
        assert_eq!(validate_plugboard("ab c1"), Err(PlugboardError::InvalidFormat));
        assert_eq!(validate_plugboard("ab, cd"), Err(PlugboardError::InvalidFormat));
    }

    #[test]
    fn pairs_must_be_separated_by_whitespace() {
        assert_eq!(validate_plugboard("abcd"), Err(PlugboardError::InvalidFormat));
    }

    #[test]
    fn reused_letter_is_reported() {
        assert_eq!(
            validate_plugboard("ab ac"),
            Err(PlugboardError::DuplicateLetter { letter: 'a' })
        );
        assert_eq!(
            validate_plugboard("xy zx"),
            Err(PlugboardError::DuplicateLetter { letter: 'x' })
        );
        assert_eq!(
            validate_plugboard("aa"),
            Err(PlugboardError::DuplicateLetter { letter: 'a' })
        );
    }

    #[test]
    fn case_is_folded_before_checking_reuse() {
        assert_eq!(
            validate_plugboard("AB cb"),
            Err(PlugboardError::DuplicateLetter { letter: 'b' })
        );
    }

    #[test]
    fn first_duplicate_stops_the_scan() {
        // 'c' repeats before 'a' does.
        assert_eq!(first_duplicate_letter("ab cd ce ad"), Some('c'));
        assert_eq!(first_duplicate_letter("ab cd"), None);
    }

    #[test]
    fn format_error_takes_precedence_over_duplicate() {
        let report = check_plugboard("ab abc");
        assert!(!report.format_valid);
        assert_eq!(report.duplicate_letter, Some('a'));
        assert_eq!(report.into_result(), Err(PlugboardError::InvalidFormat));
    }

    #[test]
    fn messages_match_banner_text() {
        assert_eq!(
            PlugboardError::InvalidFormat.to_string(),
            "Invalid format: Please enter two-letter pairs separated by spaces \"xy ab gh...\""
        );
        assert_eq!(
            PlugboardError::DuplicateLetter { letter: 'a' }.to_string(),
            "Duplicate letter: a is plugged multiple times"
        );
    }

    #[test]
    fn validator_recomputes_on_every_input() {
        let mut validator = PlugboardValidator::new();
        assert!(validator.state().is_valid());

        assert!(!validator.input("ab a").is_valid());
        assert!(validator.input("ab ac").message().is_some_and(|m| m.starts_with("Duplicate")));
        assert!(validator.input("ab cd").is_valid());
        assert_eq!(validator.state().message(), None);
        assert_eq!(validator.text(), "ab cd");
    }

    #[test]
    fn validator_keeps_raw_text() {
        let mut validator = PlugboardValidator::new();
        validator.input("  AB cd ");
        assert_eq!(validator.text(), "  AB cd ");
        assert!(validator.report().is_valid());
    }
}
