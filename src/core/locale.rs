//! Locale dictionary.
//!
//! Nested string mapping addressed by dotted keys. Writes are last-write-wins;
//! the outcome of every write is returned so callers can report divergent
//! collisions.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use super::list::{AND_DELIMITER, AND_KEY, OXFORD_AND_DELIMITER, OXFORD_AND_KEY};

/// What a write did to the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Added,
    /// Same value already stored under the key.
    Unchanged,
    /// A different value was overwritten.
    Replaced { previous: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleData {
    data: Map<String, Value>,
}

impl LocaleData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary holding the shared list delimiters.
    pub fn seeded() -> Self {
        let mut locale = Self::new();
        locale.insert(AND_KEY, AND_DELIMITER);
        locale.insert(OXFORD_AND_KEY, OXFORD_AND_DELIMITER);
        locale
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            _ => bail!("Root of a locale file must be an object"),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read locale file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse locale file: {}", path.display()))?;
        Self::from_value(value).with_context(|| format!("Invalid locale file: {}", path.display()))
    }

    /// Store `value` under the dotted `key`, creating intermediate objects.
    pub fn insert(&mut self, key: &str, value: &str) -> WriteOutcome {
        let parts: Vec<&str> = key.split('.').collect();
        insert_nested(&mut self.data, &parts, value)
    }

    /// Look up a string leaf by dotted key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut parts = key.split('.');
        let first = self.data.get(parts.next()?)?;
        parts
            .try_fold(first, |node, part| node.as_object()?.get(part))?
            .as_str()
    }

    /// Number of string leaves.
    pub fn len(&self) -> usize {
        fn count(value: &Value) -> usize {
            match value {
                Value::Object(map) => map.values().map(count).sum(),
                Value::String(_) => 1,
                _ => 0,
            }
        }
        self.data.values().map(count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The dictionary with top-level keys sorted. Nested keys keep insertion order.
    pub fn to_sorted_value(&self) -> Value {
        let mut entries: Vec<(&String, &Value)> = self.data.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(_) => "{...}".to_string(),
        other => other.to_string(),
    }
}

fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: &str) -> WriteOutcome {
    let Some((&first, rest)) = path.split_first() else {
        return WriteOutcome::Unchanged;
    };

    if rest.is_empty() {
        let previous = root.insert(first.to_string(), Value::String(value.to_string()));
        return match previous {
            None => WriteOutcome::Added,
            Some(Value::String(previous)) if previous == value => WriteOutcome::Unchanged,
            Some(previous) => WriteOutcome::Replaced {
                previous: describe(&previous),
            },
        };
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    // A leaf standing where a branch is needed is overwritten.
    if !next_level.is_object() {
        let previous = describe(next_level);
        *next_level = Value::Object(Map::new());
        if let Value::Object(inner) = next_level {
            insert_nested(inner, rest, value);
        }
        return WriteOutcome::Replaced { previous };
    }

    match next_level {
        Value::Object(inner) => insert_nested(inner, rest, value),
        _ => WriteOutcome::Unchanged,
    }
}
