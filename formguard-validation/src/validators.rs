// Built-in validators

use crate::{FieldValue, MethodPredicate, Param};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static TEL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[\d\s()\-]{5,}$").unwrap());

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?$").unwrap());

static INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?\d+$").unwrap());

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// `true` when the value holds text and every item passes `f`.
fn every_text(value: &FieldValue, f: impl Fn(&str) -> bool) -> bool {
    value
        .texts()
        .is_some_and(|items| items.into_iter().all(f))
}

/// Length of a value as counted by the length rules: characters of text,
/// entries of a list, number of files.
fn length_of(value: &FieldValue) -> Option<usize> {
    match value {
        FieldValue::Text(s) => Some(s.chars().count()),
        FieldValue::List(items) => Some(items.len()),
        FieldValue::Files(files) => Some(files.len()),
        _ => None,
    }
}

/// Compile a textual pattern. `/body/flags` literals are accepted with the
/// `i`, `m` and `s` flags.
pub fn compile_pattern(source: &str) -> Result<Regex, regex::Error> {
    if let Some(rest) = source.strip_prefix('/')
        && let Some((body, flags)) = rest.rsplit_once('/')
        && flags.chars().all(|c| matches!(c, 'i' | 'm' | 's' | 'g' | 'u'))
    {
        let inline: String = flags.chars().filter(|c| matches!(c, 'i' | 'm' | 's')).collect();
        return if inline.is_empty() {
            Regex::new(body)
        } else {
            Regex::new(&format!("(?{}){}", inline, body))
        };
    }
    Regex::new(source)
}

/// Value is present: non-empty text, list, files or group, or `true`.
pub struct Required;

impl MethodPredicate for Required {
    fn check(&self, value: &FieldValue, _param: &Param) -> bool {
        value.is_truthy()
    }
}

/// Text matches a pattern parameter.
pub struct Regexp;

impl MethodPredicate for Regexp {
    fn check(&self, value: &FieldValue, param: &Param) -> bool {
        match param {
            Param::Pattern(re) => every_text(value, |s| re.is_match(s)),
            Param::Text(source) => match compile_pattern(source) {
                Ok(re) => every_text(value, |s| re.is_match(s)),
                Err(_) => false,
            },
            _ => false,
        }
    }
}

/// Validates email format
pub struct IsEmail;

impl MethodPredicate for IsEmail {
    fn check(&self, value: &FieldValue, _param: &Param) -> bool {
        every_text(value, |s| EMAIL_REGEX.is_match(s))
    }
}

/// Validates phone number format
pub struct IsTel;

impl MethodPredicate for IsTel {
    fn check(&self, value: &FieldValue, _param: &Param) -> bool {
        every_text(value, |s| TEL_REGEX.is_match(s))
    }
}

/// Validates URL format
pub struct IsUrl;

impl MethodPredicate for IsUrl {
    fn check(&self, value: &FieldValue, _param: &Param) -> bool {
        every_text(value, |s| URL_REGEX.is_match(s))
    }
}

/// Calendar date in `YYYY-MM-DD`
pub struct IsDate;

impl MethodPredicate for IsDate {
    fn check(&self, value: &FieldValue, _param: &Param) -> bool {
        every_text(value, |s| {
            DATE_REGEX.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        })
    }
}

/// Time of day in `HH:MM` or `HH:MM:SS`
pub struct IsTime;

impl MethodPredicate for IsTime {
    fn check(&self, value: &FieldValue, _param: &Param) -> bool {
        every_text(value, |s| {
            NaiveTime::parse_from_str(s, "%H:%M").is_ok()
                || NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok()
        })
    }
}

/// Validates numeric text, decimals and exponents allowed
pub struct IsNumber;

impl MethodPredicate for IsNumber {
    fn check(&self, value: &FieldValue, _param: &Param) -> bool {
        every_text(value, |s| NUMBER_REGEX.is_match(s.trim()))
    }
}

/// Validates integer text
pub struct IsInt;

impl MethodPredicate for IsInt {
    fn check(&self, value: &FieldValue, _param: &Param) -> bool {
        every_text(value, |s| INT_REGEX.is_match(s.trim()))
    }
}

/// Validates minimum length
pub struct MinLength;

impl MethodPredicate for MinLength {
    fn check(&self, value: &FieldValue, param: &Param) -> bool {
        match (length_of(value), param.as_usize()) {
            (Some(len), Some(min)) => len >= min,
            _ => false,
        }
    }
}

/// Validates maximum length
pub struct MaxLength;

impl MethodPredicate for MaxLength {
    fn check(&self, value: &FieldValue, param: &Param) -> bool {
        match (length_of(value), param.as_usize()) {
            (Some(len), Some(max)) => len <= max,
            _ => false,
        }
    }
}

/// Validates minimum numeric value
pub struct Min;

impl MethodPredicate for Min {
    fn check(&self, value: &FieldValue, param: &Param) -> bool {
        let Some(min) = param.as_f64() else {
            return false;
        };
        every_text(value, |s| s.trim().parse::<f64>().is_ok_and(|n| n >= min))
    }
}

/// Validates maximum numeric value
pub struct Max;

impl MethodPredicate for Max {
    fn check(&self, value: &FieldValue, param: &Param) -> bool {
        let Some(max) = param.as_f64() else {
            return false;
        };
        every_text(value, |s| s.trim().parse::<f64>().is_ok_and(|n| n <= max))
    }
}

/// Every selected file is at most `param` bytes
pub struct FileSize;

impl MethodPredicate for FileSize {
    fn check(&self, value: &FieldValue, param: &Param) -> bool {
        match (value.files(), param.as_f64()) {
            (Some(files), Some(limit)) => files.iter().all(|f| f.size as f64 <= limit),
            _ => false,
        }
    }
}

/// Every selected file has one of the listed extensions.
///
/// The parameter is a list such as `"jpg, png"` or `"jpg|png"`; leading dots
/// and case are ignored.
pub struct Extension;

impl Extension {
    fn allowed(param: &Param) -> Option<Vec<String>> {
        let list = param.as_text()?;
        Some(
            list.split([',', ' ', '|'])
                .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        )
    }
}

impl MethodPredicate for Extension {
    fn check(&self, value: &FieldValue, param: &Param) -> bool {
        let (Some(files), Some(allowed)) = (value.files(), Self::allowed(param)) else {
            return false;
        };
        files.iter().all(|file| {
            file.extension()
                .is_some_and(|ext| allowed.iter().any(|a| *a == ext))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileRef;

    const ON: Param = Param::Bool(true);

    fn text(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    #[test]
    fn test_required() {
        assert!(Required.check(&text("x"), &ON));
        assert!(!Required.check(&text(""), &ON));
        assert!(!Required.check(&FieldValue::Null, &ON));
        assert!(!Required.check(&FieldValue::Bool(false), &ON));
        assert!(!Required.check(&FieldValue::Files(vec![]), &ON));
        assert!(Required.check(&FieldValue::from(vec!["a"]), &ON));
    }

    #[test]
    fn test_regexp_param_shapes() {
        let re = Param::from(Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap());
        assert!(Regexp.check(&text("123-456-7890"), &re));
        assert!(!Regexp.check(&text("invalid"), &re));

        assert!(Regexp.check(&text("ABC"), &Param::from("/^[a-z]+$/i")));
        assert!(!Regexp.check(&text("ABC"), &Param::from("^[a-z]+$")));
        assert!(!Regexp.check(&text("abc"), &Param::from("([")));
    }

    #[test]
    fn test_email() {
        assert!(IsEmail.check(&text("user@example.com"), &ON));
        assert!(IsEmail.check(&text("test.user@domain.co.uk"), &ON));
        assert!(!IsEmail.check(&text("invalid-email"), &ON));
        assert!(!IsEmail.check(&text("@example.com"), &ON));
    }

    #[test]
    fn test_url_and_tel() {
        assert!(IsUrl.check(&text("https://example.com"), &ON));
        assert!(IsUrl.check(&text("http://localhost:8080/path"), &ON));
        assert!(!IsUrl.check(&text("not-a-url"), &ON));

        assert!(IsTel.check(&text("+7 (999) 123-45-67"), &ON));
        assert!(!IsTel.check(&text("call me"), &ON));
    }

    #[test]
    fn test_date_and_time() {
        assert!(IsDate.check(&text("2024-02-29"), &ON));
        assert!(!IsDate.check(&text("2023-02-29"), &ON));
        assert!(!IsDate.check(&text("29.02.2024"), &ON));

        assert!(IsTime.check(&text("09:30"), &ON));
        assert!(IsTime.check(&text("23:59:59"), &ON));
        assert!(!IsTime.check(&text("25:00"), &ON));
    }

    #[test]
    fn test_numbers() {
        assert!(IsNumber.check(&text("-12.5"), &ON));
        assert!(IsNumber.check(&text("1e3"), &ON));
        assert!(!IsNumber.check(&text("12a"), &ON));

        assert!(IsInt.check(&text("42"), &ON));
        assert!(!IsInt.check(&text("4.2"), &ON));

        assert!(Min.check(&text("18"), &Param::from(18)));
        assert!(!Min.check(&text("17"), &Param::from(18)));
        assert!(Max.check(&text("100"), &Param::from("100")));
        assert!(!Max.check(&text("abc"), &Param::from(100)));
    }

    #[test]
    fn test_lengths() {
        assert!(MinLength.check(&text("hello"), &Param::from(5)));
        assert!(!MinLength.check(&text("hi"), &Param::from(3)));
        assert!(MinLength.check(&text("ёжик"), &Param::from(4)));
        assert!(MaxLength.check(&text("hello"), &Param::from(10)));
        assert!(!MaxLength.check(&text("hello world today"), &Param::from(10)));

        let picks = FieldValue::from(vec!["a", "b"]);
        assert!(MinLength.check(&picks, &Param::from(2)));
        assert!(!MaxLength.check(&picks, &Param::from(1)));
        assert!(!MinLength.check(&text("x"), &ON));
    }

    #[test]
    fn test_files() {
        let files = FieldValue::Files(vec![
            FileRef::new("photo.JPG", 2_000),
            FileRef::new("scan.png", 5_000),
        ]);

        assert!(FileSize.check(&files, &Param::from(5_000)));
        assert!(!FileSize.check(&files, &Param::from(4_999)));

        assert!(Extension.check(&files, &Param::from("jpg, .png")));
        assert!(!Extension.check(&files, &Param::from("jpg")));
        assert!(!Extension.check(&text("photo.jpg"), &Param::from("jpg")));
    }
}
