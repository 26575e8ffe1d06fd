#![forbid(unsafe_code)]

mod args;
mod bundle;
mod error;
mod format;
mod level;
mod locale;
mod pattern;
mod properties;

pub use args::Value;
pub use bundle::Bundle;
pub use error::{CoreError, CoreResult};
pub use format::{MessageFormat, NumberSymbols};
pub use level::Level;
pub use locale::{LOCALE_SEPARATOR, Locale, parse_locale};
pub use pattern::{Argument, ArgumentKind, MessagePattern, NumberStyle, Segment};
pub use properties::{PropertiesError, PropertyEntry, bundle_from_properties, parse_properties};
