use std::sync::Arc;

use bundle_i18n_core::{Bundle, Locale, Value};

use crate::cache::{BundleCache, FormatCache};
use crate::catalog::LocaleCatalog;
use crate::config::LocalizerConfig;
use crate::error::RuntimeResult;
use crate::source::{BundleSource, DirectorySource};

/// Text returned for a key the resolved bundle does not have.
pub fn missing_marker(key: &str) -> String {
    format!("???{key}???")
}

/// Locale resolution, bundle lookup and message formatting behind one
/// shareable handle. `get`, `has` and `format` never fail; lookup problems
/// come back as marker text and are logged.
pub struct Localizer {
    catalog: LocaleCatalog,
    source: Box<dyn BundleSource>,
    bundles: BundleCache,
    formats: FormatCache,
    empty: Arc<Bundle>,
}

impl Localizer {
    pub fn new<S: BundleSource + 'static>(source: S, config: &LocalizerConfig) -> RuntimeResult<Self> {
        let catalog = LocaleCatalog::load(&source, config)?;
        Ok(Self {
            catalog,
            source: Box::new(source),
            bundles: BundleCache::new(),
            formats: FormatCache::new(),
            empty: Arc::new(Bundle::new()),
        })
    }

    pub fn from_config(config: &LocalizerConfig) -> RuntimeResult<Self> {
        let source = DirectorySource::new(&config.bundle_dir, &config.family);
        tracing::debug!(root = %source.root().display(), family = %config.family, "reading bundles");
        Self::new(source, config)
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    pub fn find_locale(&self, tag: &str) -> &Locale {
        self.catalog.find_locale(tag)
    }

    pub fn default_locale(&self) -> &Locale {
        self.catalog.default_locale()
    }

    pub fn diagnostic_locale(&self) -> &Locale {
        self.catalog.diagnostic_locale()
    }

    /// The bundle serving `locale`, loading it on first use.
    pub fn bundle(&self, locale: &Locale) -> RuntimeResult<Arc<Bundle>> {
        self.bundles
            .get_or_load(locale, &self.catalog, self.source.as_ref())
    }

    /// Loads every catalog bundle now and reports the first failure.
    pub fn preload(&self) -> RuntimeResult<()> {
        for locale in self.catalog.locales() {
            self.bundle(locale)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str, locale: &Locale) -> String {
        match self.lookup(locale).get(key) {
            Some(pattern) => pattern.to_string(),
            None => {
                tracing::debug!(key, locale = %locale, "missing translation");
                missing_marker(key)
            }
        }
    }

    pub fn has(&self, key: &str, locale: &Locale) -> bool {
        self.lookup(locale).contains(key)
    }

    /// Substitutes `args` into the pattern for `key`. With no arguments the
    /// pattern is returned untouched. A malformed pattern is logged and
    /// returned as is.
    pub fn format(&self, key: &str, locale: &Locale, args: &[Value]) -> String {
        let pattern = self.get(key, locale);
        if args.is_empty() {
            return pattern;
        }
        let format = self.formats.get_or_create(self.catalog.resolve(locale));
        match format.format(&pattern, args) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(key, locale = %locale, error = %err, "invalid message pattern");
                pattern
            }
        }
    }

    /// Like [`Localizer::format`] but surfaces bundle load and pattern errors.
    pub fn try_format(&self, key: &str, locale: &Locale, args: &[Value]) -> RuntimeResult<String> {
        let bundle = self.bundle(locale)?;
        let pattern = bundle
            .get(key)
            .map(str::to_string)
            .unwrap_or_else(|| missing_marker(key));
        if args.is_empty() {
            return Ok(pattern);
        }
        let format = self.formats.get_or_create(self.catalog.resolve(locale));
        Ok(format.format(&pattern, args)?)
    }

    fn lookup(&self, locale: &Locale) -> Arc<Bundle> {
        self.bundle(locale)
            .unwrap_or_else(|_| Arc::clone(&self.empty))
    }
}
