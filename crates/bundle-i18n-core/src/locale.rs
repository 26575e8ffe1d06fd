use std::fmt;

use crate::{CoreError, CoreResult};

pub const LOCALE_SEPARATOR: char = '_';

/// A language code with an optional region, compared by its canonical form
/// (`"en"`, `"pt_BR"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    canonical: String,
    language_len: usize,
}

impl Locale {
    pub fn new(language: &str, region: Option<&str>) -> CoreResult<Self> {
        let language = language.trim();
        if language.is_empty() {
            return Err(CoreError::InvalidLocale("language is empty"));
        }
        if !is_alphanumeric(language) {
            return Err(CoreError::InvalidLocale("language has invalid characters"));
        }
        let mut canonical = language.to_ascii_lowercase();
        let language_len = canonical.len();
        if let Some(region) = region {
            let region = region.trim();
            if region.is_empty() {
                return Err(CoreError::InvalidLocale("region is empty"));
            }
            if !is_alphanumeric(region) {
                return Err(CoreError::InvalidLocale("region has invalid characters"));
            }
            canonical.push(LOCALE_SEPARATOR);
            canonical.push_str(&region.to_ascii_uppercase());
        }
        Ok(Self {
            canonical,
            language_len,
        })
    }

    pub fn language(&self) -> &str {
        &self.canonical[..self.language_len]
    }

    pub fn region(&self) -> Option<&str> {
        self.canonical.get(self.language_len + 1..)
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The language-only locale this one inherits from, if it has a region.
    pub fn parent(&self) -> Option<Locale> {
        self.region()?;
        Some(Self {
            canonical: self.language().to_string(),
            language_len: self.language_len,
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl TryFrom<&str> for Locale {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_locale(value)
    }
}

/// Parses `"lang"` or `"lang_REGION"`.
///
/// Codes with more than one separator (`"sr_Latn_RS"`) are rejected rather
/// than truncated, so a resource name never silently maps onto a different
/// locale.
pub fn parse_locale(code: &str) -> CoreResult<Locale> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidLocale("locale code is empty"));
    }
    let mut parts = trimmed.split(LOCALE_SEPARATOR);
    let language = parts.next().unwrap_or_default();
    let region = parts.next();
    if parts.next().is_some() {
        return Err(CoreError::InvalidLocale(
            "locale code has more than one separator",
        ));
    }
    Locale::new(language, region)
}

fn is_alphanumeric(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::{Locale, parse_locale};
    use crate::CoreError;

    #[test]
    fn parses_language_only() {
        let locale = parse_locale("en").expect("locale");
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), None);
        assert_eq!(locale.as_str(), "en");
    }

    #[test]
    fn parses_language_and_region() {
        let locale = parse_locale("pt_BR").expect("locale");
        assert_eq!(locale.language(), "pt");
        assert_eq!(locale.region(), Some("BR"));
        assert_eq!(locale.to_string(), "pt_BR");
    }

    #[test]
    fn normalizes_case() {
        let locale = parse_locale("EN_us").expect("locale");
        assert_eq!(locale.as_str(), "en_US");
        assert_eq!(locale, Locale::new("en", Some("US")).expect("locale"));
    }

    #[test]
    fn rejects_multiple_separators() {
        let err = parse_locale("sr_Latn_RS").expect_err("should fail");
        assert_eq!(
            err,
            CoreError::InvalidLocale("locale code has more than one separator")
        );
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(parse_locale("").is_err());
        assert!(parse_locale("_US").is_err());
        assert!(parse_locale("en_").is_err());
    }

    #[test]
    fn rejects_invalid_characters() {
        let err = parse_locale("en-US").expect_err("should fail");
        assert_eq!(
            err,
            CoreError::InvalidLocale("language has invalid characters")
        );
    }

    #[test]
    fn parent_drops_region() {
        let locale = parse_locale("uk_UA").expect("locale");
        let parent = locale.parent().expect("parent");
        assert_eq!(parent.as_str(), "uk");
        assert!(parent.parent().is_none());
    }
}
