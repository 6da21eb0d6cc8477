//! Reusable field rules. Each rule records an issue instead of returning early,
//! so a form gets every message in one pass.

use chrono::{NaiveDate, Utc};

use super::ValidationErrors;

pub const REQUIRED: &str = "Required";

/// Text must contain something other than whitespace.
pub fn required_text(errors: &mut ValidationErrors, path: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(path, REQUIRED);
    }
}

/// Text length (in characters) must not exceed `max`.
pub fn max_chars(errors: &mut ValidationErrors, path: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(path, format!("Must be {max} characters or fewer"));
    }
}

/// Like [`max_chars`] for optional text.
pub fn optional_max_chars(errors: &mut ValidationErrors, path: &str, value: Option<&str>, max: usize) {
    if let Some(value) = value {
        max_chars(errors, path, value, max);
    }
}

/// Required text whose length lies within `min..=max`.
pub fn text_length(errors: &mut ValidationErrors, path: &str, value: &str, min: usize, max: usize) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.push(path, REQUIRED);
    } else if len < min {
        errors.push(path, format!("Must be at least {min} characters"));
    } else if len > max {
        errors.push(path, format!("Must be {max} characters or fewer"));
    }
}

/// An absolute http(s) URL, when present.
pub fn optional_url(errors: &mut ValidationErrors, path: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };

    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => errors.push(path, "Must be a valid URL"),
    }
}

/// A plausible e-mail address: one `@`, a non-empty local part, a dotted domain.
pub fn email(errors: &mut ValidationErrors, path: &str, value: &str) {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        errors.push(path, "Must be a valid email address");
    }
}

pub fn positive_number(errors: &mut ValidationErrors, path: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(path, "Must be greater than 0");
    }
}

pub fn non_negative_number(errors: &mut ValidationErrors, path: &str, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(path, "Must be 0 or greater");
    }
}

pub fn at_least(errors: &mut ValidationErrors, path: &str, value: u32, min: u32) {
    if value < min {
        errors.push(path, format!("Must be at least {min}"));
    }
}

/// Calendar dates such as a birth date cannot lie ahead of today.
pub fn not_in_future(errors: &mut ValidationErrors, path: &str, value: Option<NaiveDate>) {
    if let Some(date) = value {
        if date > Utc::now().date_naive() {
            errors.push(path, "Must not be in the future");
        }
    }
}

/// ISO 4217 style: three ASCII uppercase letters.
pub fn currency_code(errors: &mut ValidationErrors, path: &str, value: &str) {
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_uppercase()) {
        errors.push(path, "Must be a 3-letter currency code");
    }
}

/// 3 to 30 characters of letters, digits and underscores.
pub fn username(errors: &mut ValidationErrors, path: &str, value: &str) {
    let len = value.chars().count();
    if !(3..=30).contains(&len) {
        errors.push(path, "Must be between 3 and 30 characters");
    } else if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        errors.push(path, "May only contain letters, numbers and underscores");
    }
}

/// When both ends of a range are given, `from` must not come after `to`.
/// The issue is attached to `path` (the upper bound's field).
pub fn ordered_range<T: PartialOrd>(errors: &mut ValidationErrors, path: &str, from: Option<&T>, to: Option<&T>) {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            errors.push(path, "Must not be earlier than the start of the range");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(check: impl FnOnce(&mut ValidationErrors)) -> Vec<String> {
        let mut errors = ValidationErrors::new();
        check(&mut errors);
        errors.issues().iter().map(|i| i.message.clone()).collect()
    }

    #[test]
    fn test_required_text_rejects_whitespace() {
        assert_eq!(run(|e| required_text(e, "name", "   ")), vec![REQUIRED]);
        assert!(run(|e| required_text(e, "name", "Dune")).is_empty());
    }

    #[test]
    fn test_max_chars_counts_characters() {
        assert!(run(|e| max_chars(e, "name", "ééé", 3)).is_empty());
        assert_eq!(run(|e| max_chars(e, "name", "abcd", 3)).len(), 1);
    }

    #[test]
    fn test_text_length_bounds() {
        assert_eq!(run(|e| text_length(e, "x", "", 2, 5)), vec![REQUIRED]);
        assert_eq!(run(|e| text_length(e, "x", "a", 2, 5)).len(), 1);
        assert_eq!(run(|e| text_length(e, "x", "abcdef", 2, 5)).len(), 1);
        assert!(run(|e| text_length(e, "x", "abc", 2, 5)).is_empty());
    }

    #[test]
    fn test_optional_url() {
        assert!(run(|e| optional_url(e, "u", None)).is_empty());
        assert!(run(|e| optional_url(e, "u", Some("https://img.example.com/p.jpg"))).is_empty());
        assert_eq!(run(|e| optional_url(e, "u", Some("not a url"))).len(), 1);
        assert_eq!(run(|e| optional_url(e, "u", Some("ftp://example.com/x"))).len(), 1);
    }

    #[test]
    fn test_email() {
        assert!(run(|e| email(e, "email", "ana@example.com")).is_empty());
        for bad in ["", "ana", "@example.com", "ana@example", "ana@@example.com", "a na@example.com"] {
            assert_eq!(run(|e| email(e, "email", bad)).len(), 1, "{bad}");
        }
    }

    #[test]
    fn test_numbers() {
        assert_eq!(run(|e| positive_number(e, "p", 0.0)).len(), 1);
        assert_eq!(run(|e| positive_number(e, "p", f64::NAN)).len(), 1);
        assert!(run(|e| positive_number(e, "p", 1.5)).is_empty());
        assert!(run(|e| non_negative_number(e, "p", 0.0)).is_empty());
        assert_eq!(run(|e| non_negative_number(e, "p", -0.01)).len(), 1);
        assert_eq!(run(|e| at_least(e, "n", 0, 1)).len(), 1);
    }

    #[test]
    fn test_not_in_future() {
        let tomorrow = Utc::now().date_naive().succ_opt();
        assert_eq!(run(|e| not_in_future(e, "dob", tomorrow)).len(), 1);
        let past = NaiveDate::from_ymd_opt(1990, 5, 17);
        assert!(run(|e| not_in_future(e, "dob", past)).is_empty());
    }

    #[test]
    fn test_ordered_range() {
        assert_eq!(run(|e| ordered_range(e, "to", Some(&5), Some(&3))).len(), 1);
        assert!(run(|e| ordered_range(e, "to", Some(&3), Some(&3))).is_empty());
        assert!(run(|e| ordered_range::<i32>(e, "to", None, Some(&3))).is_empty());
    }

    #[test]
    fn test_currency_and_username() {
        assert!(run(|e| currency_code(e, "c", "EUR")).is_empty());
        assert_eq!(run(|e| currency_code(e, "c", "eur")).len(), 1);
        assert!(run(|e| username(e, "u", "film_fan_42")).is_empty());
        assert_eq!(run(|e| username(e, "u", "ab")).len(), 1);
        assert_eq!(run(|e| username(e, "u", "bad-name")).len(), 1);
    }
}
