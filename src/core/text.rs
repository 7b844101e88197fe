//! Text helpers shared by key derivation and templating.
//!
//! Everything here is a pure function over `&str`.

use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on the number of words kept when turning text into a key.
pub const MAX_KEY_TOKENS: usize = 10;

static NON_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]+").unwrap());

/// Turn free text into a lowercase, underscore-joined identifier.
///
/// ```
/// use tomekey::core::text::sanitize;
///
/// assert_eq!(sanitize("Tail Swipe (Costs 2 Actions)"), "tail_swipe_costs_2_actions");
/// assert_eq!(sanitize("piercing/slashing"), "piercing_slashing");
/// assert_eq!(sanitize(&sanitize("Hit Points")), sanitize("Hit Points"));
/// ```
pub fn sanitize(text: &str) -> String {
    let joined = text
        .split([' ', '/'])
        .filter(|token| !token.is_empty())
        .take(MAX_KEY_TOKENS)
        .collect::<Vec<_>>()
        .join("_");

    NON_KEY_CHARS.replace_all(&joined, "").to_lowercase()
}

/// Variable token for the `index`-th number found in a value.
///
/// Tokens walk a 26-letter alphabet starting at `x`, so the first three
/// numbers become `x`, `y`, `z` and the fourth wraps to `a`.
pub fn variable_token(index: usize) -> char {
    // base-36 digits 10..=35 are the letters a..=z
    let offset = ((index + 23) % 26) as u8;
    (b'a' + offset) as char
}

/// Join key components and normalize hyphens.
pub fn join_key<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .map(|part| part.as_ref().replace('-', "_"))
        .collect::<Vec<_>>()
        .join(".")
}

/// Join items as prose: `a, b` + `conjunction` + `c`.
pub fn join_prose(items: &[String], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{}{}{}", head.join(", "), conjunction, last),
    }
}
