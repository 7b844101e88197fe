//! Placeholder expressions.
//!
//! A placeholder is written Liquid-style inside any string:
//!
//! ```text
//! {{ common.measurements.range.x_feet | replace: '{{ x }}', '60' }}
//! ```
//!
//! The part before the first `|` is a dotted locale key; every following
//! segment is a filter with quoted literal arguments. Filter arguments may
//! themselves contain `{{ ... }}`, so scanning is quote-aware.

use std::fmt;

pub const OPEN: &str = "{{";
pub const CLOSE: &str = "}}";

/// A single filter application, e.g. `replace: '{{ x }}', '60'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub args: Vec<String>,
}

impl Filter {
    pub fn replace(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: "replace".to_string(),
            args: vec![from.into(), to.into()],
        }
    }

    /// Apply to `text`. Returns `None` for unknown filters or wrong arity.
    pub fn apply(&self, text: &str) -> Option<String> {
        match (self.name.as_str(), self.args.as_slice()) {
            ("replace", [from, to]) => Some(text.replace(from.as_str(), to)),
            ("replace_first", [from, to]) => Some(text.replacen(from.as_str(), to, 1)),
            ("append", [suffix]) => Some(format!("{}{}", text, suffix)),
            ("prepend", [prefix]) => Some(format!("{}{}", prefix, text)),
            _ => None,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { ", " })?;
            write_quoted(f, arg)?;
        }
        Ok(())
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, arg: &str) -> fmt::Result {
    if arg.contains('\'') {
        write!(f, "\"{}\"", arg)
    } else {
        write!(f, "'{}'", arg)
    }
}

/// Ordered filters applied to the text a placeholder resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain(Vec<Filter>);

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Filter) {
        self.0.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.0.iter()
    }
}

impl FromIterator<Filter> for FilterChain {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reference to a locale key plus the filters restoring its concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub key: String,
    pub filters: FilterChain,
}

impl Placeholder {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            filters: FilterChain::new(),
        }
    }

    pub fn with_filters(key: impl Into<String>, filters: FilterChain) -> Self {
        Self {
            key: key.into(),
            filters,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", OPEN, self.key)?;
        for filter in self.filters.iter() {
            write!(f, " | {}", filter)?;
        }
        write!(f, " {}", CLOSE)
    }
}

/// A piece of a templated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart<'a> {
    Literal(&'a str),
    Expression {
        /// The expression exactly as written, braces included.
        source: &'a str,
        placeholder: Placeholder,
    },
}

/// True if `text` contains at least one expression opener.
pub fn is_templated(text: &str) -> bool {
    text.contains(OPEN)
}

/// Split `text` into literals and placeholder expressions.
///
/// An opener without a matching closer is kept as literal text.
pub fn parse_template(text: &str) -> Vec<TemplatePart<'_>> {
    let mut parts = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let body_start = start + OPEN.len();
        let Some(body_len) = find_close(&rest[body_start..]) else {
            break;
        };

        if start > 0 {
            parts.push(TemplatePart::Literal(&rest[..start]));
        }
        let end = body_start + body_len + CLOSE.len();
        parts.push(TemplatePart::Expression {
            source: &rest[start..end],
            placeholder: parse_expression(&rest[body_start..body_start + body_len]),
        });
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        parts.push(TemplatePart::Literal(rest));
    }
    parts
}

/// Byte offset of the first `}}` outside quotes.
fn find_close(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in body.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if body[i..].starts_with(CLOSE) => return Some(i),
            None => {}
        }
    }
    None
}

/// Split on `separator` outside quotes.
fn split_unquoted(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut quote: Option<char> = None;
    let mut piece_start = 0;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == separator => {
                pieces.push(&text[piece_start..i]);
                piece_start = i + c.len_utf8();
            }
            None => {}
        }
    }
    pieces.push(&text[piece_start..]);
    pieces
}

fn unquote(arg: &str) -> String {
    let arg = arg.trim();
    let quoted = arg.len() >= 2
        && ((arg.starts_with('\'') && arg.ends_with('\''))
            || (arg.starts_with('"') && arg.ends_with('"')));
    if quoted {
        arg[1..arg.len() - 1].to_string()
    } else {
        arg.to_string()
    }
}

fn parse_expression(body: &str) -> Placeholder {
    let mut segments = split_unquoted(body, '|').into_iter();
    let key = segments.next().unwrap_or_default().trim().to_string();

    let filters = segments
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            let pieces = split_unquoted(segment, ':');
            let name = pieces[0].trim().to_string();
            // re-join in case an unquoted argument contained ':'
            let raw_args = pieces[1..].join(":");
            let args = if raw_args.trim().is_empty() {
                Vec::new()
            } else {
                split_unquoted(&raw_args, ',')
                    .into_iter()
                    .map(unquote)
                    .collect()
            };
            Filter { name, args }
        })
        .collect();

    Placeholder::with_filters(key, filters)
}
