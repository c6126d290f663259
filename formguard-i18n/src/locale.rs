//! Language tags
//!
//! Tags are compared in a normalized form: lowercase language, uppercase
//! region, joined with `-`. `ru_ru`, `ru-RU` and `RU-ru` are the same tag.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language with an optional region.
///
/// # Examples
///
/// ```
/// use formguard_i18n::Locale;
///
/// let ru_ru = Locale::parse("ru_ru").unwrap();
/// assert_eq!(ru_ru.tag(), "ru-RU");
/// assert_eq!(ru_ru.language_only().tag(), "ru");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Language code (ISO 639-1, e.g., "en", "ru")
    pub language: String,
    /// Optional region code (ISO 3166-1, e.g., "RU", "GB")
    pub region: Option<String>,
}

impl Locale {
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
        }
    }

    /// Parse a tag such as `en`, `en-US` or `ru_RU`.
    ///
    /// Script subtags are skipped; the first two-letter or three-digit
    /// subtag after the language is the region.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);

        let language = parts.next().unwrap_or_default().to_lowercase();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        let region = parts.find_map(|part| {
            let alpha = part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic());
            let numeric = part.len() == 3 && part.chars().all(|c| c.is_ascii_digit());
            (alpha || numeric).then(|| part.to_uppercase())
        });

        Ok(Self { language, region })
    }

    /// Normalized tag (e.g., "en-US").
    pub fn tag(&self) -> String {
        match self.region {
            Some(ref region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// Language-only locale (strips region).
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }

    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    pub fn ru() -> Self {
        Self::new("ru", None::<&str>)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Normalize a tag for lookups, keeping unparsable tags verbatim.
pub fn normalize_tag(tag: &str) -> String {
    Locale::parse(tag)
        .map(|locale| locale.tag())
        .unwrap_or_else(|_| tag.to_string())
}
