//! Reader for `.properties` bundle files.
//!
//! Supports `#`/`!` comments, `=`/`:`/whitespace separators, backslash line
//! continuations and the `\t \n \r \f \uXXXX` escapes. A repeated key keeps
//! its last value.

use std::collections::BTreeMap;

use crate::Bundle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesError {
    pub message: String,
    pub line: usize,
}

pub fn parse_properties(input: &str) -> Result<Vec<PropertyEntry>, PropertiesError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut entries = Vec::new();
    let mut lines = input.lines().enumerate();

    while let Some((idx, raw_line)) = lines.next() {
        let line_no = idx + 1;
        let line = trim_leading(raw_line);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(trim_leading(next)),
                None => break,
            }
        }

        entries.push(parse_entry(&logical, line_no)?);
    }

    Ok(entries)
}

/// Parses a properties document straight into a [`Bundle`].
pub fn bundle_from_properties(input: &str) -> Result<Bundle, PropertiesError> {
    let mut table = BTreeMap::new();
    for entry in parse_properties(input)? {
        table.insert(entry.key, entry.value);
    }
    Ok(Bundle::from(table))
}

fn parse_entry(logical: &str, line: usize) -> Result<PropertyEntry, PropertiesError> {
    let chars: Vec<char> = logical.chars().collect();
    let mut key = String::new();
    let mut idx = 0;

    while idx < chars.len() {
        let ch = chars[idx];
        if ch == '\\' {
            idx = read_escape(&chars, idx, &mut key, line)?;
            continue;
        }
        if ch == '=' || ch == ':' || is_blank(ch) {
            break;
        }
        key.push(ch);
        idx += 1;
    }

    if key.is_empty() {
        return Err(PropertiesError {
            message: "missing key".to_string(),
            line,
        });
    }

    while idx < chars.len() && is_blank(chars[idx]) {
        idx += 1;
    }
    if idx < chars.len() && (chars[idx] == '=' || chars[idx] == ':') {
        idx += 1;
        while idx < chars.len() && is_blank(chars[idx]) {
            idx += 1;
        }
    }

    let mut value = String::new();
    while idx < chars.len() {
        if chars[idx] == '\\' {
            idx = read_escape(&chars, idx, &mut value, line)?;
        } else {
            value.push(chars[idx]);
            idx += 1;
        }
    }

    Ok(PropertyEntry { key, value, line })
}

fn read_escape(
    chars: &[char],
    idx: usize,
    out: &mut String,
    line: usize,
) -> Result<usize, PropertiesError> {
    let Some(&next) = chars.get(idx + 1) else {
        return Ok(chars.len());
    };
    match next {
        't' => out.push('\t'),
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        'f' => out.push('\u{c}'),
        'u' => {
            let high = read_hex4(chars, idx + 2, line)?;
            if (0xD800..=0xDBFF).contains(&high) {
                if chars.get(idx + 6) == Some(&'\\') && chars.get(idx + 7) == Some(&'u') {
                    let low = read_hex4(chars, idx + 8, line)?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(invalid_unicode(line));
                    }
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined).ok_or_else(|| invalid_unicode(line))?);
                    return Ok(idx + 12);
                }
                return Err(invalid_unicode(line));
            }
            out.push(char::from_u32(high).ok_or_else(|| invalid_unicode(line))?);
            return Ok(idx + 6);
        }
        other => out.push(other),
    }
    Ok(idx + 2)
}

fn read_hex4(chars: &[char], start: usize, line: usize) -> Result<u32, PropertiesError> {
    let digits = chars.get(start..start + 4).ok_or_else(|| invalid_unicode(line))?;
    let mut value = 0u32;
    for digit in digits {
        let nibble = digit.to_digit(16).ok_or_else(|| invalid_unicode(line))?;
        value = value * 16 + nibble;
    }
    Ok(value)
}

fn invalid_unicode(line: usize) -> PropertiesError {
    PropertiesError {
        message: "malformed \\uxxxx escape".to_string(),
        line,
    }
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|ch| *ch == '\\').count();
    trailing % 2 == 1
}

fn trim_leading(line: &str) -> &str {
    line.trim_start_matches(is_blank)
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\u{c}'
}

#[cfg(test)]
mod tests {
    use super::{bundle_from_properties, parse_properties};

    #[test]
    fn parses_separators() {
        let input = "a = one\nb:two\nc three\nd=";
        let entries = parse_properties(input).expect("parse");
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("a", "one"), ("b", "two"), ("c", "three"), ("d", "")]
        );
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        let input = "# comment\n! other\n\n   \nlogs.msg = Level: {0}\n";
        let entries = parse_properties(input).expect("parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "logs.msg");
        assert_eq!(entries[0].value, "Level: {0}");
        assert_eq!(entries[0].line, 5);
    }

    #[test]
    fn joins_continuation_lines() {
        let input = "motd = Welcome \\\n    to the \\\n    server\nnext = x";
        let entries = parse_properties(input).expect("parse");
        assert_eq!(entries[0].value, "Welcome to the server");
        assert_eq!(entries[1].key, "next");
    }

    #[test]
    fn escaped_backslash_is_not_a_continuation() {
        let input = "path = C:\\\\\nother = y";
        let entries = parse_properties(input).expect("parse");
        assert_eq!(entries[0].value, "C:\\");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn decodes_escapes() {
        let input = "k\\ ey = tab\\there\\nnew \\u00e9\\uD83D\\uDE00";
        let entries = parse_properties(input).expect("parse");
        assert_eq!(entries[0].key, "k ey");
        assert_eq!(entries[0].value, "tab\there\nnew é😀");
    }

    #[test]
    fn rejects_malformed_unicode_escape() {
        let err = parse_properties("bad = \\u12").expect_err("error");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn error_reports_physical_line_after_continuations() {
        let input = "a = one \\\n  two\n# note\n\nbad = \\u00zz";
        let err = parse_properties(input).expect_err("error");
        assert_eq!(err.line, 5usize);
        let entries = parse_properties("a = one \\\n  two\nb = x").expect("parse");
        assert_eq!(entries[1].line, 3usize);
    }

    #[test]
    fn rejects_missing_key() {
        let err = parse_properties("= value").expect_err("error");
        assert_eq!(err.message, "missing key");
    }

    #[test]
    fn last_duplicate_wins_in_bundle() {
        let bundle = bundle_from_properties("greet = Hi\ngreet = Hello").expect("bundle");
        assert_eq!(bundle.get("greet"), Some("Hello"));
        assert_eq!(bundle.len(), 1);
    }
}
