//! Conjunctive list handling.
//!
//! A value such as `"fire, cold, and poison"` is stored as three independent
//! dictionary entries. Its template re-joins the item placeholders and takes the
//! conjunction from shared delimiter entries so translators can localize "and"
//! without touching the items.

use std::sync::LazyLock;

use regex::Regex;

use super::{placeholder::Placeholder, text::join_prose};

pub const AND_KEY: &str = "common.delimiters.and";
pub const OXFORD_AND_KEY: &str = "common.delimiters.and_with_oxford_comma";

pub const AND_DELIMITER: &str = " and ";
pub const OXFORD_AND_DELIMITER: &str = ", and ";

// Alternation is leftmost-first, so ", and " wins over " and " and ", ".
static LIST_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", and | and |, ").unwrap());

/// Punctuation style detected on the original value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `a, b, c`
    Commas,
    /// `a, b and c`
    And,
    /// `a, b, and c`
    OxfordAnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitList<'a> {
    pub items: Vec<&'a str>,
    pub style: ListStyle,
}

/// Split `value` into list items.
///
/// Returns `None` when the value holds no items, or when joining the items back
/// with the detected style would not reproduce `value` exactly (stray spacing,
/// mixed conjunctions). Such values are stored whole.
pub fn split_list(value: &str) -> Option<SplitList<'_>> {
    let style = if value.contains(OXFORD_AND_DELIMITER) {
        ListStyle::OxfordAnd
    } else if value.contains(AND_DELIMITER) {
        ListStyle::And
    } else {
        ListStyle::Commas
    };

    let items: Vec<&str> = LIST_SEPARATOR_REGEX
        .split(value)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return None;
    }

    let literal: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    if join(&literal, style, AND_DELIMITER, OXFORD_AND_DELIMITER) != value {
        return None;
    }

    Some(SplitList { items, style })
}

/// Join per-item expressions back into one template string.
///
/// The Oxford delimiter is only used for three or more items; a two-item list
/// always takes the plain `and` delimiter.
pub fn compose(expressions: &[String], style: ListStyle) -> String {
    join(
        expressions,
        style,
        &Placeholder::new(AND_KEY).to_string(),
        &Placeholder::new(OXFORD_AND_KEY).to_string(),
    )
}

fn join(parts: &[String], style: ListStyle, and: &str, oxford_and: &str) -> String {
    match style {
        ListStyle::Commas => parts.join(", "),
        ListStyle::OxfordAnd if parts.len() > 2 => join_prose(parts, oxford_and),
        ListStyle::OxfordAnd | ListStyle::And => join_prose(parts, and),
    }
}
