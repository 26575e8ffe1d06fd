use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, PoisonError, RwLock};

use bundle_i18n_core::{Bundle, Locale, MessageFormat};

use crate::catalog::LocaleCatalog;
use crate::error::{RuntimeError, RuntimeResult};
use crate::source::BundleSource;

/// Value of every entry in the diagnostic locale's bundle.
pub const DIAGNOSTIC_VALUE: &str = "router";

#[derive(Clone, Debug)]
enum Slot {
    Loaded(Arc<Bundle>),
    Failed(String),
}

impl Slot {
    fn into_result(self, locale: &Locale) -> RuntimeResult<Arc<Bundle>> {
        match self {
            Slot::Loaded(bundle) => Ok(bundle),
            Slot::Failed(message) => Err(RuntimeError::BundleLoad {
                locale: locale.to_string(),
                message,
            }),
        }
    }
}

/// Lazily loaded bundles, one slot per catalog locale. A slot is filled once
/// and never replaced; a failed load stays failed.
#[derive(Debug, Default)]
pub struct BundleCache {
    slots: RwLock<HashMap<Locale, Slot>>,
}

impl BundleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &self,
        locale: &Locale,
        catalog: &LocaleCatalog,
        source: &dyn BundleSource,
    ) -> RuntimeResult<Arc<Bundle>> {
        if !catalog.contains(locale) {
            return self.get_or_load(catalog.default_locale(), catalog, source);
        }
        if let Some(slot) = self.cached(locale) {
            return slot.into_result(locale);
        }

        let loaded = if catalog.is_diagnostic(locale) {
            self.get_or_load(catalog.default_locale(), catalog, source)
                .map(|default| Arc::new(default.mirror(DIAGNOSTIC_VALUE)))
        } else {
            self.load_supported(locale, catalog, source)
        };
        let slot = match loaded {
            Ok(bundle) => Slot::Loaded(bundle),
            Err(err) => Slot::Failed(err.to_string()),
        };
        self.insert(locale, slot).into_result(locale)
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(locale)
    }

    pub fn len(&self) -> usize {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load_supported(
        &self,
        locale: &Locale,
        catalog: &LocaleCatalog,
        source: &dyn BundleSource,
    ) -> RuntimeResult<Arc<Bundle>> {
        let mut bundle = source.load(locale)?;
        if let Some(parent) = locale.parent().filter(|parent| catalog.contains(parent)) {
            let parent = self.get_or_load(&parent, catalog, source)?;
            bundle = bundle.with_parent(&parent);
        }
        // Keys missing from every more specific bundle come from the default.
        if locale != catalog.default_locale() {
            let default = self.get_or_load(catalog.default_locale(), catalog, source)?;
            bundle = bundle.with_parent(&default);
        }
        Ok(Arc::new(bundle))
    }

    fn cached(&self, locale: &Locale) -> Option<Slot> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
            .cloned()
    }

    // First insert wins; a racing loader gets the stored slot back.
    fn insert(&self, locale: &Locale, slot: Slot) -> Slot {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        match slots.entry(locale.clone()) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(vacant) => {
                match &slot {
                    Slot::Loaded(bundle) => {
                        tracing::debug!(locale = %locale, keys = bundle.len(), "loaded bundle");
                    }
                    Slot::Failed(message) => {
                        tracing::error!(locale = %locale, error = %message, "failed to load bundle");
                    }
                }
                vacant.insert(slot).clone()
            }
        }
    }
}

/// One immutable [`MessageFormat`] per locale.
#[derive(Debug, Default)]
pub struct FormatCache {
    formats: RwLock<HashMap<Locale, Arc<MessageFormat>>>,
}

impl FormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, locale: &Locale) -> Arc<MessageFormat> {
        if let Some(format) = self
            .formats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
        {
            return Arc::clone(format);
        }
        let mut formats = self.formats.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            formats
                .entry(locale.clone())
                .or_insert_with(|| Arc::new(MessageFormat::new(locale.clone()))),
        )
    }

    pub fn len(&self) -> usize {
        self.formats.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
