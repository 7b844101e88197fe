//! Multi-locale merging.
//!
//! Each resolved document is first annotated: every localized leaf becomes a
//! `{ "<locale>": value }` object. The annotated documents are then deep-merged
//! as overlays, so the result keeps the template's shape with one entry per
//! locale at every localized leaf.

use serde_json::{Map, Value};

use super::placeholder::is_templated;

fn is_templated_value(value: &Value) -> bool {
    value.as_str().is_some_and(is_templated)
}

fn localized(locale: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(locale.to_string(), value);
    Value::Object(map)
}

/// Wrap every leaf of `resolved` that came from a templated leaf of `template`.
///
/// A non-empty array whose elements are all templated strings is wrapped as a
/// whole. Leaves that were never templated stay plain, since they are the same
/// in every locale.
pub fn annotate(template: &Value, resolved: Value, locale: &str) -> Value {
    match (template, resolved) {
        (Value::Array(items), resolved @ Value::Array(_))
            if !items.is_empty() && items.iter().all(is_templated_value) =>
        {
            localized(locale, resolved)
        }
        (Value::Array(items), Value::Array(resolved)) => Value::Array(
            resolved
                .into_iter()
                .enumerate()
                .map(|(index, value)| match items.get(index) {
                    Some(item) => annotate(item, value, locale),
                    None => value,
                })
                .collect(),
        ),
        (Value::Object(map), Value::Object(resolved)) => Value::Object(
            resolved
                .into_iter()
                .map(|(key, value)| {
                    let annotated = match map.get(&key) {
                        Some(item) => annotate(item, value, locale),
                        None => value,
                    };
                    (key, annotated)
                })
                .collect(),
        ),
        (template, resolved) if is_templated_value(template) => localized(locale, resolved),
        (_, resolved) => resolved,
    }
}

/// Deep-merge `overlay` into `base`: objects per key, arrays per index,
/// anything else replaced.
pub fn overlay(base: &mut Value, overlay_value: Value) {
    match (base, overlay_value) {
        (Value::Object(base), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(overlay_items)) => {
            for (index, value) in overlay_items.into_iter().enumerate() {
                match base.get_mut(index) {
                    Some(existing) => overlay(existing, value),
                    None => base.push(value),
                }
            }
        }
        (base, value) => *base = value,
    }
}

/// Merge per-locale resolutions of one template, in the order given.
///
/// Returns `None` when there is no resolution to merge.
pub fn merge_locales<I>(template: &Value, resolved: I) -> Option<Value>
where
    I: IntoIterator<Item = (String, Value)>,
{
    resolved
        .into_iter()
        .map(|(locale, document)| annotate(template, document, &locale))
        .reduce(|mut merged, annotated| {
            overlay(&mut merged, annotated);
            merged
        })
}
