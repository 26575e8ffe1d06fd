use bundle_i18n_core::{Level, Value};

use crate::localizer::Localizer;

/// Anything that receives localized text and remembers its locale tag.
pub trait Recipient {
    fn locale_tag(&self) -> &str;
}

impl Recipient for str {
    fn locale_tag(&self) -> &str {
        self
    }
}

impl Recipient for String {
    fn locale_tag(&self) -> &str {
        self
    }
}

impl Localizer {
    /// Formats `key` in the catalog locale that best matches the recipient.
    pub fn format_for<R: Recipient + ?Sized>(&self, recipient: &R, key: &str, args: &[Value]) -> String {
        let locale = self.find_locale(recipient.locale_tag());
        self.format(key, locale, args)
    }

    pub fn format_either<R: Recipient + ?Sized>(
        &self,
        recipient: &R,
        condition: bool,
        key_true: &str,
        key_false: &str,
        args: &[Value],
    ) -> String {
        let key = if condition { key_true } else { key_false };
        self.format_for(recipient, key, args)
    }

    pub fn format_decorated<R: Recipient + ?Sized>(
        &self,
        recipient: &R,
        level: Level,
        key: &str,
        args: &[Value],
    ) -> String {
        level.decorate(&self.format_for(recipient, key, args))
    }

    /// One formatted message per recipient, each in its own locale.
    pub fn format_all<'r, R, I>(&self, recipients: I, key: &str, args: &[Value]) -> Vec<(&'r R, String)>
    where
        R: Recipient + ?Sized + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        recipients
            .into_iter()
            .map(|recipient| (recipient, self.format_for(recipient, key, args)))
            .collect()
    }
}
