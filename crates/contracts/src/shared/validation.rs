use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar date format used by HTML date inputs and stored date columns
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Последний год, который `DATE_FORMAT` пишет четырьмя цифрами
pub const MAX_DATE_YEAR: i32 = 9999;

/// Ошибка валидации конкретного поля формы или фильтра
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trim a form value; whitespace-only values become `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an optional `YYYY-MM-DD` value, recording a `FieldError` on failure.
///
/// Years outside 0000..=9999 are rejected: their text form does not sort
/// against stored timestamps.
pub fn parse_optional_date(
    field: &str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    let raw = blank_to_none(value)?;
    match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
        Ok(date) if (0..=MAX_DATE_YEAR).contains(&date.year()) => Some(date),
        Ok(_) => {
            errors.push(FieldError::new(
                field,
                format!("'{}' is out of range (years 0000-9999)", raw),
            ));
            None
        }
        Err(_) => {
            errors.push(FieldError::new(
                field,
                format!("'{}' is not a valid date (expected YYYY-MM-DD)", raw),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(None), None);
        assert_eq!(blank_to_none(Some("".into())), None);
        assert_eq!(blank_to_none(Some(" \t".into())), None);
        assert_eq!(blank_to_none(Some(" HR ".into())), Some("HR".to_string()));
    }

    #[test]
    fn test_parse_optional_date() {
        let mut errors = Vec::new();
        assert_eq!(
            parse_optional_date("startDate", Some("2024-02-29".into()), &mut errors),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_optional_date("startDate", Some("".into()), &mut errors), None);
        assert!(errors.is_empty());

        assert_eq!(
            parse_optional_date("endDate", Some("2023-02-29".into()), &mut errors),
            None
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "endDate");
    }

    #[test]
    fn test_parse_optional_date_rejects_five_digit_years() {
        let mut errors = Vec::new();
        assert_eq!(
            parse_optional_date("endDate", Some("9999-12-31".into()), &mut errors),
            NaiveDate::from_ymd_opt(9999, 12, 31)
        );
        assert!(errors.is_empty());

        assert_eq!(
            parse_optional_date("startDate", Some("+10000-01-01".into()), &mut errors),
            None
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "startDate");
    }
}
