//! Lifting numbers out of values.
//!
//! `"30/60 feet"` becomes the shared dictionary value `"{{ x }}/{{ y }} feet"`,
//! a key fragment `x_y_feet`, and a filter chain restoring `30` and `60` at the
//! placeholder that references it. Values that differ only in their numbers
//! therefore share one dictionary entry.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use super::{
    placeholder::{Filter, FilterChain, Placeholder},
    text::variable_token,
};

// Thousands-separated numbers first, then plain integers and decimals.
static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d*\.?\d+").unwrap());

static TRAILING_PARENTHETICAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)\s*$").unwrap());

/// Result of lifting numbers out of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variables {
    /// Value with numbers replaced by bare tokens (`x feet`), used to build keys.
    pub key_text: String,
    /// Value with numbers replaced by placeholders (`{{ x }} feet`), stored in
    /// the dictionary.
    pub value_text: String,
    /// One `replace` per number, in order of occurrence.
    pub filters: FilterChain,
}

impl Variables {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

fn glued(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Byte ranges of the numbers in `text`.
///
/// Numbers glued to a letter or digit on either side are skipped, which leaves
/// dice notation like `2d6` or `1d8+3` untouched.
pub fn find_numbers(text: &str) -> Vec<Range<usize>> {
    NUMBER_REGEX
        .find_iter(text)
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !glued(before) && !glued(after)
        })
        .map(|m| m.range())
        .collect()
}

/// Replace every number in `text` with a variable token.
pub fn extract_variables(text: &str) -> Variables {
    let mut key_text = String::with_capacity(text.len());
    let mut value_text = String::with_capacity(text.len());
    let mut filters = FilterChain::new();
    let mut cursor = 0;

    for (i, range) in find_numbers(text).into_iter().enumerate() {
        let token = variable_token(i).to_string();
        let variable = Placeholder::new(token.as_str()).to_string();
        let literal = &text[range.clone()];

        key_text.push_str(&text[cursor..range.start]);
        key_text.push_str(&token);
        value_text.push_str(&text[cursor..range.start]);
        value_text.push_str(&variable);
        filters.push(Filter::replace(variable, literal));

        cursor = range.end;
    }

    key_text.push_str(&text[cursor..]);
    value_text.push_str(&text[cursor..]);

    Variables {
        key_text,
        value_text,
        filters,
    }
}

/// True if `text` ends with a `( ... )` clause.
pub fn has_trailing_parenthetical(text: &str) -> bool {
    TRAILING_PARENTHETICAL_REGEX.is_match(text)
}
