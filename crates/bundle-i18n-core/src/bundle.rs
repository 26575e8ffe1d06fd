use std::collections::BTreeMap;

/// Key to pattern table for one locale. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    entries: BTreeMap<String, String>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Same keys, every value replaced by `value`.
    pub fn mirror(&self, value: &str) -> Bundle {
        self.entries
            .keys()
            .map(|key| (key.clone(), value.to_string()))
            .collect()
    }

    /// Fills keys missing from `self` with the entries of `parent`.
    pub fn with_parent(mut self, parent: &Bundle) -> Bundle {
        for (key, value) in &parent.entries {
            self.entries
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }
}

impl From<BTreeMap<String, String>> for Bundle {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, String)> for Bundle {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
