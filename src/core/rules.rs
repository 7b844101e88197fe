//! Compiled rule tables.
//!
//! A [`RuleTable`] is pure data: ordered lists of compiled patterns built once
//! from [`RuleConfig`]. Patterns are always matched against the raw dotted path
//! (numeric indices included), e.g. `monsters.12.speed.walk`.
//!
//! Rewrite-style rules (identifiers, renames, buckets) are evaluated as a
//! pipeline where every matching rule replaces the previous result, so the last
//! applicable rule in the table wins.

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::{BucketName, RuleConfig};

#[derive(Debug, Clone)]
pub struct IdentifierRule {
    pub scope: Regex,
    pub fields: Vec<String>,
    pub sanitize: bool,
}

#[derive(Debug, Clone)]
pub struct RenameRule {
    pub pattern: Regex,
    pub renames: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct BucketRule {
    pub pattern: Regex,
    pub bucket: String,
    pub name: BucketName,
}

/// How a translatable leaf is turned into dictionary entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Plain,
    List,
    Measurement,
    Parenthetical,
}

#[derive(Debug, Clone)]
pub struct RuleTable {
    ignore_paths: Vec<Regex>,
    ignore_values: Vec<Regex>,
    identifiers: Vec<IdentifierRule>,
    renames: Vec<RenameRule>,
    buckets: Vec<BucketRule>,
    lists: Vec<Regex>,
    measurements: Vec<Regex>,
    parentheticals: Vec<Regex>,
    dropped_segments: HashSet<String>,
}

fn compile_pattern(pattern: &str, field: &str, index: usize) -> Result<Regex> {
    Regex::new(pattern)
        .with_context(|| format!("Malformed rule in '{}[{}]': \"{}\"", field, index, pattern))
}

fn compile_patterns(patterns: &[String], field: &str) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| compile_pattern(pattern, field, i))
        .collect()
}

impl RuleTable {
    /// Compile every pattern up front. A malformed pattern is a configuration
    /// error and aborts the run.
    pub fn compile(config: &RuleConfig) -> Result<Self> {
        let identifiers = config
            .identifiers
            .iter()
            .enumerate()
            .map(|(i, rule)| -> Result<IdentifierRule> {
                Ok(IdentifierRule {
                    scope: compile_pattern(&rule.scope, "rules.identifiers", i)?,
                    fields: rule.fields.clone(),
                    sanitize: rule.sanitize,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let renames = config
            .renames
            .iter()
            .enumerate()
            .map(|(i, rule)| -> Result<RenameRule> {
                Ok(RenameRule {
                    pattern: compile_pattern(&rule.pattern, "rules.renames", i)?,
                    renames: rule.renames.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let buckets = config
            .buckets
            .iter()
            .enumerate()
            .map(|(i, rule)| -> Result<BucketRule> {
                Ok(BucketRule {
                    pattern: compile_pattern(&rule.pattern, "rules.buckets", i)?,
                    bucket: rule.bucket.clone(),
                    name: rule.name.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ignore_paths: compile_patterns(&config.ignore_paths, "rules.ignorePaths")?,
            ignore_values: compile_patterns(&config.ignore_values, "rules.ignoreValues")?,
            identifiers,
            renames,
            buckets,
            lists: compile_patterns(&config.lists, "rules.lists")?,
            measurements: compile_patterns(&config.measurements, "rules.measurements")?,
            parentheticals: compile_patterns(&config.parentheticals, "rules.parentheticals")?,
            dropped_segments: config.dropped_segments.iter().cloned().collect(),
        })
    }

    pub fn is_ignored_path(&self, path: &str) -> bool {
        self.ignore_paths.iter().any(|re| re.is_match(path))
    }

    pub fn is_ignored_value(&self, value: &str) -> bool {
        self.ignore_values.iter().any(|re| re.is_match(value))
    }

    /// Identifier rule governing the index that ends `prefix`, if any.
    pub fn identifier_for(&self, prefix: &str) -> Option<&IdentifierRule> {
        self.identifiers
            .iter()
            .rev()
            .find(|rule| rule.scope.is_match(prefix))
    }

    pub fn renames(&self) -> &[RenameRule] {
        &self.renames
    }

    pub fn buckets(&self) -> &[BucketRule] {
        &self.buckets
    }

    /// Lists take precedence over measurements, measurements over parentheticals.
    pub fn leaf_kind(&self, path: &str) -> LeafKind {
        let matches = |patterns: &[Regex]| patterns.iter().any(|re| re.is_match(path));

        if matches(&self.lists) {
            LeafKind::List
        } else if matches(&self.measurements) {
            LeafKind::Measurement
        } else if matches(&self.parentheticals) {
            LeafKind::Parenthetical
        } else {
            LeafKind::Plain
        }
    }

    pub fn is_dropped_segment(&self, segment: &str) -> bool {
        self.dropped_segments.contains(segment)
    }
}
