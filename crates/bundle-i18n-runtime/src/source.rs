use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bundle_i18n_core::{Bundle, Locale, bundle_from_properties, parse_locale};

use crate::error::{RuntimeError, RuntimeResult};

/// Backing store of key to pattern tables, one per locale code.
pub trait BundleSource: Send + Sync {
    /// Locale codes the store holds tables for, in catalog order.
    fn locale_codes(&self) -> RuntimeResult<Vec<String>>;

    fn load(&self, locale: &Locale) -> RuntimeResult<Bundle>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BundleFormat {
    Properties,
    Json,
}

impl BundleFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("properties") => Some(BundleFormat::Properties),
            Some("json") => Some(BundleFormat::Json),
            _ => None,
        }
    }

    pub fn parse(self, contents: &str) -> RuntimeResult<Bundle> {
        match self {
            BundleFormat::Properties => {
                bundle_from_properties(contents).map_err(|err| RuntimeError::Properties {
                    line: err.line,
                    message: err.message,
                })
            }
            BundleFormat::Json => {
                let table: BTreeMap<String, String> = serde_json::from_str(contents)?;
                Ok(Bundle::from(table))
            }
        }
    }
}

/// Directory of `<family>_<code>.properties` / `<family>_<code>.json` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    family: String,
}

struct BundleFile {
    code: String,
    path: PathBuf,
    format: BundleFormat,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, family: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            family: family.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bundle_files(&self) -> RuntimeResult<Vec<BundleFile>> {
        let entries = fs::read_dir(&self.root).map_err(|err| {
            RuntimeError::ResourceUnavailable(format!("{}: {err}", self.root.display()))
        })?;
        let prefix = format!("{}_", self.family);
        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(format) = BundleFormat::from_path(&path) else {
                continue;
            };
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let Some(code) = stem.strip_prefix(&prefix).map(str::to_string) else {
                tracing::debug!(path = %path.display(), family = %self.family, "ignoring file outside bundle family");
                continue;
            };
            files.push(BundleFile { code, path, format });
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

impl BundleSource for DirectorySource {
    fn locale_codes(&self) -> RuntimeResult<Vec<String>> {
        Ok(self
            .bundle_files()?
            .into_iter()
            .map(|file| file.code)
            .collect())
    }

    fn load(&self, locale: &Locale) -> RuntimeResult<Bundle> {
        let file = self
            .bundle_files()?
            .into_iter()
            .find(|file| parse_locale(&file.code).is_ok_and(|parsed| &parsed == locale))
            .ok_or_else(|| RuntimeError::UnknownLocale(locale.to_string()))?;
        let contents = fs::read_to_string(&file.path)?;
        file.format.parse(&contents)
    }
}

/// In-memory tables keyed by locale code.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bundles: Vec<(String, Bundle)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle<K, V>(
        mut self,
        code: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(
            code,
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn insert(&mut self, code: impl Into<String>, bundle: Bundle) {
        let code = code.into();
        match self.bundles.iter_mut().find(|(existing, _)| *existing == code) {
            Some((_, slot)) => *slot = bundle,
            None => self.bundles.push((code, bundle)),
        }
    }
}

impl BundleSource for MemorySource {
    fn locale_codes(&self) -> RuntimeResult<Vec<String>> {
        Ok(self.bundles.iter().map(|(code, _)| code.clone()).collect())
    }

    fn load(&self, locale: &Locale) -> RuntimeResult<Bundle> {
        self.bundles
            .iter()
            .find(|(code, _)| parse_locale(code).is_ok_and(|parsed| &parsed == locale))
            .map(|(_, bundle)| bundle.clone())
            .ok_or_else(|| RuntimeError::UnknownLocale(locale.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{BundleFormat, BundleSource, DirectorySource, MemorySource};
    use crate::error::RuntimeError;
    use bundle_i18n_core::parse_locale;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("bundle_i18n_{name}_{nanos}"));
        fs::create_dir_all(&path).expect("dir");
        path
    }

    #[test]
    fn lists_codes_of_the_family_only() {
        let dir = temp_dir("source_codes");
        fs::write(dir.join("bundle_en.properties"), "a = b").expect("write");
        fs::write(dir.join("bundle_pt_BR.json"), "{}").expect("write");
        fs::write(dir.join("bundle_fr.txt"), "a = b").expect("write");
        fs::write(dir.join("other_de.properties"), "a = b").expect("write");
        fs::create_dir_all(dir.join("bundle_ru.properties")).expect("dir");

        let source = DirectorySource::new(&dir, "bundle");
        let codes = source.locale_codes().expect("codes");
        assert_eq!(codes, vec!["en".to_string(), "pt_BR".to_string()]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn loads_properties_and_json() {
        let dir = temp_dir("source_load");
        fs::write(dir.join("bundle_en.properties"), "logs.msg = Level: {0}").expect("write");
        fs::write(dir.join("bundle_fr.json"), r#"{"logs.msg": "Niveau : {0}"}"#).expect("write");

        let source = DirectorySource::new(&dir, "bundle");
        let en = source.load(&parse_locale("en").expect("locale")).expect("en");
        assert_eq!(en.get("logs.msg"), Some("Level: {0}"));
        let fr = source.load(&parse_locale("fr").expect("locale")).expect("fr");
        assert_eq!(fr.get("logs.msg"), Some("Niveau : {0}"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn matches_files_by_parsed_locale() {
        let dir = temp_dir("source_case");
        fs::write(dir.join("bundle_pt_br.properties"), "greet = Oi").expect("write");

        let source = DirectorySource::new(&dir, "bundle");
        let bundle = source
            .load(&parse_locale("pt_BR").expect("locale"))
            .expect("bundle");
        assert_eq!(bundle.get("greet"), Some("Oi"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let source = DirectorySource::new("/nonexistent/bundle_i18n/bundles", "bundle");
        let err = source.locale_codes().expect_err("error");
        assert!(matches!(err, RuntimeError::ResourceUnavailable(_)));
    }

    #[test]
    fn corrupt_json_is_an_error() {
        let err = BundleFormat::Json.parse("{ not json").expect_err("error");
        assert!(matches!(err, RuntimeError::Json(_)));
    }

    #[test]
    fn memory_source_replaces_and_loads() {
        let source = MemorySource::new()
            .with_bundle("en", [("a", "1")])
            .with_bundle("en", [("a", "2")])
            .with_bundle("fr", [("a", "un")]);
        assert_eq!(
            source.locale_codes().expect("codes"),
            vec!["en".to_string(), "fr".to_string()]
        );
        let en = source.load(&parse_locale("en").expect("locale")).expect("en");
        assert_eq!(en.get("a"), Some("2"));
        let err = source
            .load(&parse_locale("de").expect("locale"))
            .expect_err("missing");
        assert!(matches!(err, RuntimeError::UnknownLocale(_)));
    }
}
