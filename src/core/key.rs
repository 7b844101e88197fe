//! Locale key derivation.
//!
//! Turns a raw document path plus the leaf's value into the dotted key the value
//! is stored under. Stages run in a fixed order:
//!
//! 1. positional indices become semantic identifiers (`spells.3.name` ->
//!    `spells.fireball.name`)
//! 2. leaf renames
//! 3. bucket rewrites into the shared `common.*` area, last match wins
//! 4. connector segments are dropped and hyphens normalized

use serde_json::Value;

use super::{
    path::{DocPath, Segment},
    rules::RuleTable,
    text::{join_key, sanitize},
};
use crate::{config::BucketName, issues::MissingIdentifierIssue};

/// Root component of every bucketed key.
pub const COMMON_NAMESPACE: &str = "common";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub key: String,
    pub issues: Vec<MissingIdentifierIssue>,
}

pub struct KeyDeriver<'a> {
    rules: &'a RuleTable,
}

impl<'a> KeyDeriver<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Derive the locale key for `value` found at `path` inside `root`.
    ///
    /// `value` only matters when a bucket rule applies; it becomes the last key
    /// component after sanitizing.
    pub fn derive(&self, path: &DocPath, root: &Value, value: &str) -> Derivation {
        self.derive_components(path, root, value, |_| {})
    }

    /// Derive the key of one item split out of a list leaf.
    ///
    /// Items that no bucket rule claims are told apart by their sanitized text,
    /// or by their `position` in the list when the text sanitizes to nothing.
    pub fn derive_list_item(
        &self,
        path: &DocPath,
        root: &Value,
        item: &str,
        position: usize,
    ) -> Derivation {
        self.derive_components(path, root, item, |components| {
            let fragment = sanitize(item);
            components.push(if fragment.is_empty() {
                position.to_string()
            } else {
                fragment
            });
        })
    }

    fn derive_components(
        &self,
        path: &DocPath,
        root: &Value,
        value: &str,
        unbucketed: impl FnOnce(&mut Vec<String>),
    ) -> Derivation {
        let raw = path.to_string();
        let (mut components, issues) = self.substitute_identifiers(path, root, &raw);

        self.apply_renames(&raw, &mut components);
        if !self.apply_buckets(path, &raw, value, &mut components) {
            unbucketed(&mut components);
        }

        let key = join_key(
            components
                .iter()
                .filter(|component| !self.rules.is_dropped_segment(component)),
        );

        Derivation { key, issues }
    }

    fn substitute_identifiers(
        &self,
        path: &DocPath,
        root: &Value,
        raw: &str,
    ) -> (Vec<String>, Vec<MissingIdentifierIssue>) {
        let segments = path.segments();
        let mut components: Vec<String> = segments.iter().map(Segment::to_string).collect();
        let mut issues = Vec::new();

        // an index that ends the path names the leaf itself and stays as is
        for i in 0..segments.len().saturating_sub(1) {
            if !segments[i].is_positional() {
                continue;
            }

            let element_path = path.prefix(i + 1);
            let element_raw = element_path.to_string();
            let Some(rule) = self.rules.identifier_for(&element_raw) else {
                continue;
            };

            let identifier = element_path.lookup(root).and_then(|element| {
                rule.fields
                    .iter()
                    .find_map(|field| element.get(field).and_then(Value::as_str))
            });

            match identifier {
                Some(identifier) if rule.sanitize => components[i] = sanitize(identifier),
                Some(identifier) => components[i] = identifier.to_string(),
                None => issues.push(MissingIdentifierIssue {
                    path: raw.to_string(),
                    element: element_raw,
                    fields: rule.fields.clone(),
                }),
            }
        }

        (components, issues)
    }

    fn apply_renames(&self, raw: &str, components: &mut [String]) {
        for rule in self.rules.renames() {
            if !rule.pattern.is_match(raw) {
                continue;
            }
            if let Some(last) = components.last_mut()
                && let Some(renamed) = rule.renames.get(last.as_str())
            {
                *last = renamed.clone();
            }
        }
    }

    /// Returns whether a bucket rule rewrote the key.
    ///
    /// A value that sanitizes to nothing has no fragment to be bucketed under and
    /// keeps its own key.
    fn apply_buckets(
        &self,
        path: &DocPath,
        raw: &str,
        value: &str,
        components: &mut Vec<String>,
    ) -> bool {
        let fragment = sanitize(value);
        if fragment.is_empty() {
            return false;
        }

        let Some(rule) = self
            .rules
            .buckets()
            .iter()
            .rev()
            .find(|rule| rule.pattern.is_match(raw))
        else {
            return false;
        };

        let name = match &rule.name {
            BucketName::Last => path.last().map(Segment::to_string),
            BucketName::Parent => path
                .parent_segment()
                .or_else(|| path.last())
                .map(Segment::to_string),
            BucketName::Fixed(name) => Some(name.clone()),
        }
        .unwrap_or_default();

        *components = vec![COMMON_NAMESPACE.to_string(), rule.bucket.clone(), name, fragment];
        true
    }
}
