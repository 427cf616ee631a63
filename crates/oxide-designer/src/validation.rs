//! Value validators shared by field kinds.
//!
//! Field kinds compose these both when checking a submitted raw value and
//! when checking their own attribute schema. Every validator is pure: the
//! same input always yields the same result, and malformed input is a
//! failure message, never a panic.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date pattern"));

const INVALID_NUMBER: &str = "Enter a valid number.";

/// A check over one raw string value.
pub trait Validator: Send + Sync {
    /// Returns the user-facing failure message when `value` is rejected.
    fn validate(&self, value: &str) -> Result<(), String>;
}

/// Rejects the empty string. Whitespace counts as a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredValidator;

impl RequiredValidator {
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("This field is required.".to_string());
        }
        Ok(())
    }
}

/// Upper bound on length, counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLengthValidator(usize);

impl MaxLengthValidator {
    pub const fn new(max: usize) -> Self {
        Self(max)
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() > self.0 {
            return Err(format!("Ensure this value has at most {} characters.", self.0));
        }
        Ok(())
    }
}

/// Lower bound on length, counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLengthValidator(usize);

impl MinLengthValidator {
    pub const fn new(min: usize) -> Self {
        Self(min)
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() < self.0 {
            return Err(format!("Ensure this value has at least {} characters.", self.0));
        }
        Ok(())
    }
}

/// A finite number within optional inclusive bounds.
///
/// Surrounding whitespace is ignored; `NaN` and infinities are rejected.
#[derive(Debug, Clone, Copy)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeValidator {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    fn out_of_range(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => INVALID_NUMBER.to_string(),
        }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let number = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| INVALID_NUMBER.to_string())?;

        let below = self.min.is_some_and(|min| number < min);
        let above = self.max.is_some_and(|max| number > max);
        if below || above {
            return Err(self.out_of_range());
        }
        Ok(())
    }
}

/// A calendar date as a date picker submits it.
///
/// Accepts `YYYY-MM-DD`, a full RFC 3339 timestamp, or the RFC 2822 form a
/// browser date picker posts (`Wed, 01 May 2024 00:00:00 GMT`). The day must
/// exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl DateValidator {
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for DateValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let valid = if ISO_DATE.is_match(value) {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        } else {
            DateTime::parse_from_rfc3339(value).is_ok()
                || DateTime::parse_from_rfc2822(value).is_ok()
        };
        if !valid {
            return Err("Enter a valid date.".to_string());
        }
        Ok(())
    }
}

/// One of a fixed set of values, compared exactly.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    choices: Vec<String>,
}

impl ChoiceValidator {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for ChoiceValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.choices.iter().any(|choice| choice == value) {
            Ok(())
        } else {
            Err("Select a valid choice.".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator::new();
        assert!(v.validate("hello").is_ok());
        assert!(v.validate(" ").is_ok());
        assert_eq!(v.validate("").unwrap_err(), "This field is required.");
    }

    #[test]
    fn test_length_validators_count_characters() {
        let max = MaxLengthValidator::new(5);
        assert!(max.validate("héllo").is_ok());
        assert_eq!(
            max.validate("hello world").unwrap_err(),
            "Ensure this value has at most 5 characters."
        );

        let min = MinLengthValidator::new(2);
        assert!(min.validate("ab").is_ok());
        assert!(min.validate("é").is_err());
    }

    #[test]
    fn test_range_validator() {
        let v = RangeValidator::new(Some(0.0), Some(100.0));
        assert!(v.validate("50").is_ok());
        assert!(v.validate(" 0 ").is_ok());
        assert!(v.validate("100").is_ok());
        assert_eq!(v.validate("-1").unwrap_err(), "Value must be between 0 and 100.");
        assert!(v.validate("101").is_err());
        assert_eq!(v.validate("abc").unwrap_err(), INVALID_NUMBER);
        assert!(v.validate("NaN").is_err());
        assert!(v.validate("inf").is_err());

        let unbounded = RangeValidator::new(None, None);
        assert!(unbounded.validate("-1e300").is_ok());
        assert!(unbounded.validate("").is_err());
    }

    #[test]
    fn test_date_validator() {
        let v = DateValidator::new();
        assert!(v.validate("2024-02-29").is_ok());
        assert!(v.validate("2024-03-01T10:00:00Z").is_ok());
        assert!(v.validate("Wed, 01 May 2024 00:00:00 GMT").is_ok());
        assert!(v.validate("Thu, 29 Feb 2024 23:00:00 +0100").is_ok());
        assert!(v.validate("Fri, 30 Feb 2024 00:00:00 GMT").is_err());
        assert!(v.validate("2023-02-29").is_err());
        assert!(v.validate("2024-13-01").is_err());
        assert!(v.validate("not a date").is_err());
        assert!(v.validate("").is_err());
    }

    #[test]
    fn test_choice_validator() {
        let v = ChoiceValidator::new(["red", "green"]);
        assert!(v.validate("red").is_ok());
        assert!(v.validate("Red").is_err());
        assert!(v.validate("").is_err());
    }
}
