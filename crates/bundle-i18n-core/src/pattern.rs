//! Positional placeholder grammar.
//!
//! `{0}` substitutes the first argument, `{1,number,integer}` the second
//! through a number sub-format. An apostrophe quotes literal text (`'{0}'`)
//! and a doubled apostrophe is a single one. A `}` outside an argument is
//! plain text.

use std::iter::Peekable;
use std::str::Chars;

use crate::{CoreError, CoreResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberStyle {
    Default,
    Integer,
    Percent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentKind {
    Plain,
    Number(NumberStyle),
    Date,
    Time,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Argument {
    pub index: usize,
    pub kind: ArgumentKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Argument(Argument),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagePattern {
    segments: Vec<Segment>,
}

impl MessagePattern {
    pub fn parse(pattern: &str) -> CoreResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut in_quote = false;
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    literal.push('\'');
                } else {
                    in_quote = !in_quote;
                }
                continue;
            }
            if in_quote || ch != '{' {
                literal.push(ch);
                continue;
            }

            let body = read_argument(&mut chars)?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Argument(parse_argument(&body)?));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn arguments(&self) -> impl Iterator<Item = &Argument> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Argument(argument) => Some(argument),
            Segment::Literal(_) => None,
        })
    }
}

fn read_argument(chars: &mut Peekable<Chars<'_>>) -> CoreResult<String> {
    let mut body = String::new();
    let mut depth = 1u32;
    let mut in_quote = false;
    for ch in chars.by_ref() {
        if ch == '\'' {
            in_quote = !in_quote;
        } else if !in_quote {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(body);
                    }
                }
                _ => {}
            }
        }
        body.push(ch);
    }
    Err(CoreError::InvalidPattern("unmatched braces"))
}

fn parse_argument(body: &str) -> CoreResult<Argument> {
    let mut parts = body.splitn(3, ',');
    let index = parts
        .next()
        .unwrap_or_default()
        .trim()
        .parse::<usize>()
        .map_err(|_| CoreError::InvalidPattern("argument index is not a number"))?;
    let format_type = parts.next().map(|part| part.trim().to_ascii_lowercase());
    let style = parts.next().map(|part| part.trim().to_ascii_lowercase());

    let kind = match format_type.as_deref() {
        None | Some("") => ArgumentKind::Plain,
        Some("number") => ArgumentKind::Number(match style.as_deref() {
            Some("integer") => NumberStyle::Integer,
            Some("percent") => NumberStyle::Percent,
            _ => NumberStyle::Default,
        }),
        Some("date") => ArgumentKind::Date,
        Some("time") => ArgumentKind::Time,
        Some(_) => return Err(CoreError::InvalidPattern("unknown format type")),
    };
    Ok(Argument { index, kind })
}
