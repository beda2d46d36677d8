//! Declarative field rules for the dashboard forms

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {0} characters")]
    TooShort(usize),
    #[error("Must be at most {0} characters")]
    TooLong(usize),
    #[error("Expected a number")]
    NotANumber,
    #[error("Expected a whole number")]
    NotAnInteger,
}

/// Character-length bounds for a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringRule {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringRule {
    pub const fn new() -> Self {
        Self { min: None, max: None }
    }

    pub const fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        let len = value.chars().count();
        if let Some(min) = self.min {
            if len < min {
                return Err(FieldError::TooShort(min));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return Err(FieldError::TooLong(max));
            }
        }
        Ok(())
    }

    /// Blank input is treated as absent rather than too short
    pub fn check_optional(&self, value: &str) -> Result<Option<String>, FieldError> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        self.check(value).map(|_| Some(value.to_string()))
    }
}

impl Default for StringRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerce typed text into a number, `None` when left blank
pub fn coerce_number(value: &str) -> Result<Option<f64>, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(FieldError::NotANumber),
    }
}

pub fn coerce_required_number(value: &str) -> Result<f64, FieldError> {
    coerce_number(value)?.ok_or(FieldError::Required)
}

pub fn coerce_integer<T: TryFrom<i64>>(value: &str) -> Result<Option<T>, FieldError> {
    let Some(number) = coerce_number(value)? else {
        return Ok(None);
    };
    if number.fract() != 0.0 {
        return Err(FieldError::NotAnInteger);
    }
    T::try_from(number as i64)
        .map(Some)
        .map_err(|_| FieldError::NotAnInteger)
}

/// Format a number for a text input, without a trailing `.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Field name to error, one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, error: FieldError) {
        self.fields.entry(field).or_insert(error);
    }

    /// Record the error if any, passing the value through
    pub fn capture<T>(&mut self, field: &'static str, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.insert(field, error);
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.fields.get(field)
    }

    pub fn message(&self, field: &str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.fields.iter().map(|(field, error)| (*field, error))
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_rule_bounds() {
        let rule = StringRule::new().min(3).max(5);
        assert_eq!(rule.check("ab"), Err(FieldError::TooShort(3)));
        assert_eq!(rule.check("abc"), Ok(()));
        assert_eq!(rule.check("abcdef"), Err(FieldError::TooLong(5)));
    }

    #[test]
    fn test_string_rule_counts_characters_not_bytes() {
        let rule = StringRule::new().min(3).max(3);
        assert_eq!(rule.check("Яна"), Ok(()));
    }

    #[test]
    fn test_optional_blank_is_absent() {
        let rule = StringRule::new().min(3);
        assert_eq!(rule.check_optional("  "), Ok(None));
        assert_eq!(rule.check_optional("ab"), Err(FieldError::TooShort(3)));
        assert_eq!(rule.check_optional("abc"), Ok(Some("abc".to_string())));
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce_number("100"), Ok(Some(100.0)));
        assert_eq!(coerce_number(" 99.5 "), Ok(Some(99.5)));
        assert_eq!(coerce_number(""), Ok(None));
        assert_eq!(coerce_number("abc"), Err(FieldError::NotANumber));
        assert_eq!(coerce_number("NaN"), Err(FieldError::NotANumber));
        assert_eq!(coerce_required_number(""), Err(FieldError::Required));
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(coerce_integer::<u32>("7"), Ok(Some(7)));
        assert_eq!(coerce_integer::<u32>("7.5"), Err(FieldError::NotAnInteger));
        assert_eq!(coerce_integer::<u32>("-1"), Err(FieldError::NotAnInteger));
        assert_eq!(coerce_integer::<i32>("-1"), Ok(Some(-1)));
        assert_eq!(coerce_integer::<i32>("x"), Err(FieldError::NotANumber));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1500.0), "1500");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn test_form_errors_keep_first_error_per_field() {
        let mut errors = FormErrors::new();
        errors.insert("slug", FieldError::TooShort(2));
        errors.insert("slug", FieldError::Required);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message("slug").unwrap(), "Must be at least 2 characters");
    }
}
