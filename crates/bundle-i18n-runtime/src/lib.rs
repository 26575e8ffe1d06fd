#![forbid(unsafe_code)]

mod cache;
mod catalog;
mod config;
mod error;
mod localizer;
mod recipient;
mod source;

pub use crate::cache::{BundleCache, DIAGNOSTIC_VALUE, FormatCache};
pub use crate::catalog::LocaleCatalog;
pub use crate::config::{LocalizerConfig, MalformedLocalePolicy, load_config, load_config_or_default};
pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::localizer::{Localizer, missing_marker};
pub use crate::recipient::Recipient;
pub use crate::source::{BundleFormat, BundleSource, DirectorySource, MemorySource};
pub use bundle_i18n_core::{Bundle, Level, Locale, MessageFormat, Value, parse_locale};
