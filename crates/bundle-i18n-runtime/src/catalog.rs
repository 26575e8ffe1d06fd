use bundle_i18n_core::{Locale, parse_locale};

use crate::config::{LocalizerConfig, MalformedLocalePolicy};
use crate::error::{RuntimeError, RuntimeResult};
use crate::source::BundleSource;

/// Supported locales, fixed at construction. The diagnostic locale is always
/// the last entry and the default locale is always present.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    locales: Vec<Locale>,
    default_index: usize,
}

impl LocaleCatalog {
    pub fn load(source: &dyn BundleSource, config: &LocalizerConfig) -> RuntimeResult<Self> {
        let codes = source.locale_codes()?;
        Self::from_codes(&codes, config)
    }

    pub fn from_codes<S: AsRef<str>>(codes: &[S], config: &LocalizerConfig) -> RuntimeResult<Self> {
        let diagnostic = parse_config_locale(&config.diagnostic_locale)?;
        let default_locale = parse_config_locale(&config.default_locale)?;

        let mut locales = Vec::with_capacity(codes.len() + 1);
        for code in codes {
            let code = code.as_ref();
            match parse_locale(code) {
                Ok(locale) if locale == diagnostic || locales.contains(&locale) => {
                    tracing::warn!(code, "skipping duplicate locale");
                }
                Ok(locale) => locales.push(locale),
                Err(reason) => match config.malformed_locales {
                    MalformedLocalePolicy::Skip => {
                        tracing::warn!(code, %reason, "skipping malformed locale code");
                    }
                    MalformedLocalePolicy::Fail => {
                        return Err(RuntimeError::MalformedLocaleCode {
                            code: code.to_string(),
                            reason,
                        });
                    }
                },
            }
        }

        let default_index = locales
            .iter()
            .position(|locale| *locale == default_locale)
            .ok_or_else(|| RuntimeError::MissingDefaultLocale(default_locale.to_string()))?;
        locales.push(diagnostic);

        tracing::debug!(
            locales = ?locales.iter().map(Locale::as_str).collect::<Vec<_>>(),
            "loaded locales"
        );
        Ok(Self {
            locales,
            default_index,
        })
    }

    /// Every entry, diagnostic locale last.
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Entries backed by real bundles.
    pub fn supported(&self) -> &[Locale] {
        &self.locales[..self.locales.len() - 1]
    }

    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default_index]
    }

    pub fn diagnostic_locale(&self) -> &Locale {
        &self.locales[self.locales.len() - 1]
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }

    pub fn is_diagnostic(&self, locale: &Locale) -> bool {
        locale == self.diagnostic_locale()
    }

    /// The catalog entry for `locale`, or the default locale when the
    /// catalog does not hold it.
    pub fn resolve<'a>(&'a self, locale: &'a Locale) -> &'a Locale {
        if self.contains(locale) {
            locale
        } else {
            self.default_locale()
        }
    }

    /// Exact match on the canonical form, then the first entry whose
    /// canonical form is a prefix of `tag`, then the default locale. Matching
    /// is case-sensitive; surrounding whitespace is dropped and `-` is read
    /// as `_`.
    pub fn find_locale(&self, tag: &str) -> &Locale {
        let tag = tag.trim().replace('-', "_");
        self.locales
            .iter()
            .find(|locale| locale.as_str() == tag)
            .or_else(|| {
                self.locales
                    .iter()
                    .find(|locale| tag.starts_with(locale.as_str()))
            })
            .unwrap_or_else(|| self.default_locale())
    }
}

fn parse_config_locale(code: &str) -> RuntimeResult<Locale> {
    parse_locale(code).map_err(|reason| RuntimeError::MalformedLocaleCode {
        code: code.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::LocaleCatalog;
    use crate::config::{LocalizerConfig, MalformedLocalePolicy};
    use crate::error::RuntimeError;
    use bundle_i18n_core::parse_locale;

    fn catalog(codes: &[&str]) -> LocaleCatalog {
        LocaleCatalog::from_codes(codes, &LocalizerConfig::default()).expect("catalog")
    }

    #[test]
    fn appends_diagnostic_locale_last() {
        let catalog = catalog(&["en", "fr"]);
        let codes: Vec<&str> = catalog.locales().iter().map(|l| l.as_str()).collect();
        assert_eq!(codes, vec!["en", "fr", "router"]);
        assert_eq!(catalog.diagnostic_locale().as_str(), "router");
        assert_eq!(catalog.supported().len(), 2);
    }

    #[test]
    fn default_locale_is_en() {
        let catalog = catalog(&["fr", "en", "de"]);
        assert_eq!(catalog.default_locale().as_str(), "en");
    }

    #[test]
    fn missing_default_fails_fast() {
        let err = LocaleCatalog::from_codes(&["fr", "de"], &LocalizerConfig::default())
            .expect_err("error");
        assert!(matches!(err, RuntimeError::MissingDefaultLocale(ref code) if code == "en"));
    }

    #[test]
    fn empty_source_fails_fast() {
        let codes: [&str; 0] = [];
        let err = LocaleCatalog::from_codes(&codes, &LocalizerConfig::default()).expect_err("error");
        assert!(matches!(err, RuntimeError::MissingDefaultLocale(_)));
    }

    #[test]
    fn malformed_codes_follow_policy() {
        let skipped = catalog(&["en", "sr_Latn_RS", "en-US"]);
        assert_eq!(skipped.supported().len(), 1);

        let config = LocalizerConfig {
            malformed_locales: MalformedLocalePolicy::Fail,
            ..LocalizerConfig::default()
        };
        let err = LocaleCatalog::from_codes(&["en", "sr_Latn_RS"], &config).expect_err("error");
        assert!(matches!(err, RuntimeError::MalformedLocaleCode { ref code, .. } if code == "sr_Latn_RS"));
    }

    #[test]
    fn duplicates_are_collapsed() {
        let catalog = catalog(&["en", "EN", "router", "fr"]);
        let codes: Vec<&str> = catalog.locales().iter().map(|l| l.as_str()).collect();
        assert_eq!(codes, vec!["en", "fr", "router"]);
    }

    #[test]
    fn find_exact_match() {
        let catalog = catalog(&["en", "pt", "pt_BR"]);
        assert_eq!(catalog.find_locale("pt_BR").as_str(), "pt_BR");
        assert_eq!(catalog.find_locale("pt").as_str(), "pt");
        assert_eq!(catalog.find_locale("router").as_str(), "router");
    }

    #[test]
    fn find_prefers_exact_over_earlier_prefix() {
        let catalog = catalog(&["pt", "pt_BR", "en"]);
        assert_eq!(catalog.find_locale("pt_BR").as_str(), "pt_BR");
    }

    #[test]
    fn find_prefix_match() {
        let catalog = catalog(&["en"]);
        assert_eq!(catalog.find_locale("en_US").as_str(), "en");
        assert_eq!(catalog.find_locale("en-GB").as_str(), "en");
    }

    #[test]
    fn find_trims_and_reads_hyphen_as_separator() {
        let catalog = catalog(&["en", "pt_BR"]);
        assert_eq!(catalog.find_locale(" pt-BR ").as_str(), "pt_BR");
    }

    #[test]
    fn find_is_case_sensitive() {
        let catalog = catalog(&["en", "fr", "pt_BR"]);
        assert_eq!(catalog.find_locale("FR").as_str(), "en");
        assert_eq!(catalog.find_locale("pt_br").as_str(), "en");
        assert_eq!(catalog.find_locale("fr").as_str(), "fr");
    }

    #[test]
    fn find_falls_back_to_default() {
        let catalog = catalog(&["en", "fr"]);
        assert_eq!(catalog.find_locale("ja_JP").as_str(), "en");
        assert_eq!(catalog.find_locale("").as_str(), "en");
    }

    #[test]
    fn find_is_idempotent() {
        let catalog = catalog(&["en", "fr", "pt_BR", "uk"]);
        for tag in ["fr_CA", "pt_BR", "pt", "uk_UA", "zz", "router", "", "EN"] {
            let first = catalog.find_locale(tag);
            assert_eq!(catalog.find_locale(first.as_str()), first);
        }
    }

    #[test]
    fn resolve_redirects_unsupported() {
        let catalog = catalog(&["en", "fr"]);
        let fr = parse_locale("fr").expect("locale");
        let ja = parse_locale("ja").expect("locale");
        assert_eq!(catalog.resolve(&fr).as_str(), "fr");
        assert_eq!(catalog.resolve(&ja).as_str(), "en");
    }
}
