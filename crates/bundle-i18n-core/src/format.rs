use chrono::{DateTime, Utc};
use num_format::{CustomFormat, Grouping, ToFormattedString};

use crate::pattern::{ArgumentKind, MessagePattern, NumberStyle, Segment};
use crate::{CoreResult, Locale, Value};

const MAX_FRACTION_DIGITS: usize = 3;
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal: char,
    pub grouping: char,
}

impl NumberSymbols {
    pub const fn new(decimal: char, grouping: char) -> Self {
        Self { decimal, grouping }
    }

    pub fn for_locale(locale: &Locale) -> Self {
        match (locale.language(), locale.region()) {
            ("de" | "it", Some("CH")) => Self::new('.', '\u{2019}'),
            ("fr", _) => Self::new(',', '\u{202f}'),
            (
                "de" | "es" | "it" | "pt" | "nl" | "id" | "tr" | "da" | "el" | "ro" | "hr" | "sl"
                | "sr" | "vi",
                _,
            ) => Self::new(',', '.'),
            (
                "ru" | "uk" | "be" | "kk" | "pl" | "cs" | "sk" | "fi" | "sv" | "nb" | "no" | "hu"
                | "bg" | "lt" | "lv" | "et",
                _,
            ) => Self::new(',', '\u{a0}'),
            _ => Self::new('.', ','),
        }
    }

    fn grouping_format(self) -> Option<CustomFormat> {
        let mut separator = [0u8; 4];
        CustomFormat::builder()
            .grouping(Grouping::Standard)
            .minus_sign("-")
            .separator(self.grouping.encode_utf8(&mut separator))
            .build()
            .ok()
    }
}

/// Per-locale formatter. Holds only locale data, so one instance can serve
/// any number of patterns from any number of threads.
#[derive(Clone, Debug)]
pub struct MessageFormat {
    locale: Locale,
    symbols: NumberSymbols,
    grouping: Option<CustomFormat>,
}

impl MessageFormat {
    pub fn new(locale: Locale) -> Self {
        let symbols = NumberSymbols::for_locale(&locale);
        Self {
            locale,
            symbols,
            grouping: symbols.grouping_format(),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn symbols(&self) -> NumberSymbols {
        self.symbols
    }

    pub fn format(&self, pattern: &str, args: &[Value]) -> CoreResult<String> {
        let parsed = MessagePattern::parse(pattern)?;
        Ok(self.format_pattern(&parsed, args))
    }

    /// Placeholders without a matching argument are written back as `{n}`.
    pub fn format_pattern(&self, pattern: &MessagePattern, args: &[Value]) -> String {
        let mut out = String::new();
        for segment in pattern.segments() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Argument(argument) => match args.get(argument.index) {
                    Some(value) => out.push_str(&self.format_value(value, argument.kind)),
                    None => {
                        out.push('{');
                        out.push_str(&argument.index.to_string());
                        out.push('}');
                    }
                },
            }
        }
        out
    }

    pub fn format_value(&self, value: &Value, kind: ArgumentKind) -> String {
        match (kind, value) {
            (ArgumentKind::Plain, Value::Int(number)) => {
                self.format_int(*number, NumberStyle::Default)
            }
            (ArgumentKind::Plain, Value::Float(number)) => {
                self.format_float(*number, NumberStyle::Default)
            }
            (ArgumentKind::Plain, Value::Timestamp(millis)) => {
                with_datetime(*millis, |at| {
                    format!("{} {}", at.format(DATE_FORMAT), at.format(TIME_FORMAT))
                })
            }
            (ArgumentKind::Number(style), Value::Int(number)) => self.format_int(*number, style),
            (ArgumentKind::Number(style), Value::Float(number)) => {
                self.format_float(*number, style)
            }
            (ArgumentKind::Date, Value::Timestamp(millis) | Value::Int(millis)) => {
                with_datetime(*millis, |at| at.format(DATE_FORMAT).to_string())
            }
            (ArgumentKind::Time, Value::Timestamp(millis) | Value::Int(millis)) => {
                with_datetime(*millis, |at| at.format(TIME_FORMAT).to_string())
            }
            (_, other) => other.to_string(),
        }
    }

    fn format_int(&self, value: i64, style: NumberStyle) -> String {
        match style {
            NumberStyle::Default | NumberStyle::Integer => self.group(value),
            NumberStyle::Percent => match value.checked_mul(100) {
                Some(scaled) => {
                    let mut out = self.group(scaled);
                    out.push('%');
                    out
                }
                None => self.format_float(value as f64, style),
            },
        }
    }

    fn group<N: ToFormattedString>(&self, value: N) -> String {
        match &self.grouping {
            Some(format) => value.to_formatted_string(format),
            None => value.to_formatted_string(&num_format::Locale::en),
        }
    }

    fn format_float(&self, value: f64, style: NumberStyle) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-\u{221e}" } else { "\u{221e}" }.to_string();
        }
        let (scaled, fraction_digits, suffix) = match style {
            NumberStyle::Default => (value, MAX_FRACTION_DIGITS, ""),
            NumberStyle::Integer => (value, 0, ""),
            NumberStyle::Percent => (value * 100.0, 0, "%"),
        };
        let rendered = format!("{:.*}", fraction_digits, scaled.abs());
        let (integer, fraction) = match rendered.split_once('.') {
            Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
            None => (rendered.as_str(), ""),
        };

        let mut out = String::new();
        let is_zero = integer.bytes().all(|byte| byte == b'0') && fraction.is_empty();
        if scaled < 0.0 && !is_zero {
            out.push('-');
        }
        match integer.parse::<u128>() {
            Ok(whole) => out.push_str(&self.group(whole)),
            Err(_) => out.push_str(integer),
        }
        if !fraction.is_empty() {
            out.push(self.symbols.decimal);
            out.push_str(fraction);
        }
        out.push_str(suffix);
        out
    }
}

fn with_datetime(millis: i64, render: impl FnOnce(DateTime<Utc>) -> String) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(at) => render(at),
        None => millis.to_string(),
    }
}
