//! Document walker.
//!
//! Visits every node of one source document in stable order (object keys in
//! document order, array elements by index) and records, per translatable
//! leaf, the dictionary entries it produces and the placeholder that replaces
//! it in the mirrored template.
//!
//! Each document is walked into its own [`Extraction`]; nothing here touches
//! shared state, so documents can be walked in parallel and their results
//! applied afterwards in a fixed order.

use serde_json::{Map, Value};

use super::{
    key::{Derivation, KeyDeriver},
    list::{compose, split_list},
    locale::{LocaleData, WriteOutcome},
    path::DocPath,
    placeholder::{FilterChain, Placeholder},
    rules::{LeafKind, RuleTable},
    variables::{extract_variables, has_trailing_parenthetical},
};
use crate::issues::{Issue, KeyConflictIssue};

/// One dictionary write produced by a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleEntry {
    pub key: String,
    pub value: String,
    /// Raw path of the leaf that produced the entry.
    pub origin: String,
}

/// Everything one document contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Template name, the source file stem.
    pub name: String,
    pub domain: String,
    /// Dictionary writes in visitation order.
    pub entries: Vec<LocaleEntry>,
    /// Mirrored template, when template generation is enabled.
    pub template: Option<Value>,
    pub issues: Vec<Issue>,
}

impl Extraction {
    /// Replay this document's writes into `locale`, reporting every write that
    /// overwrites a different value.
    pub fn apply_to(&self, locale: &mut LocaleData) -> Vec<Issue> {
        self.entries
            .iter()
            .filter_map(|entry| match locale.insert(&entry.key, &entry.value) {
                WriteOutcome::Replaced { previous } => Some(Issue::KeyConflict(KeyConflictIssue {
                    key: entry.key.clone(),
                    previous,
                    value: entry.value.clone(),
                    origin: entry.origin.clone(),
                })),
                WriteOutcome::Added | WriteOutcome::Unchanged => None,
            })
            .collect()
    }
}

pub struct TreeWalker<'a> {
    rules: &'a RuleTable,
    deriver: KeyDeriver<'a>,
    generate_templates: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(rules: &'a RuleTable, generate_templates: bool) -> Self {
        Self {
            rules,
            deriver: KeyDeriver::new(rules),
            generate_templates,
        }
    }

    /// Walk `document`, addressing its nodes under `domain`.
    pub fn walk(&self, name: &str, domain: &str, document: &Value) -> Extraction {
        let mut extraction = Extraction {
            name: name.to_string(),
            domain: domain.to_string(),
            entries: Vec::new(),
            template: None,
            issues: Vec::new(),
        };

        let template = self.visit(document, &DocPath::root(domain), document, &mut extraction);
        if self.generate_templates {
            extraction.template = Some(template.unwrap_or(Value::Null));
        }
        extraction
    }

    /// Returns the template node, or `None` when the path is ignored.
    fn visit(
        &self,
        node: &Value,
        path: &DocPath,
        root: &Value,
        out: &mut Extraction,
    ) -> Option<Value> {
        if self.rules.is_ignored_path(&path.to_string()) {
            return None;
        }

        let template = match node {
            Value::Object(map) => {
                let mut mirrored = Map::new();
                for (key, child) in map {
                    if let Some(value) = self.visit(child, &path.child(key.as_str()), root, out) {
                        mirrored.insert(key.clone(), value);
                    }
                }
                Value::Object(mirrored)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, child)| self.visit(child, &path.child(index), root, out))
                    .collect(),
            ),
            Value::String(text) if self.rules.is_ignored_value(text) => node.clone(),
            Value::String(text) => Value::String(self.visit_text(text, path, root, out)),
            Value::Number(_) | Value::Bool(_) | Value::Null => node.clone(),
        };

        Some(template)
    }

    fn visit_text(&self, text: &str, path: &DocPath, root: &Value, out: &mut Extraction) -> String {
        let raw = path.to_string();

        match self.rules.leaf_kind(&raw) {
            LeafKind::List => match split_list(text) {
                Some(list) => {
                    let leaf_issues = out.issues.len();
                    let expressions: Vec<String> = list
                        .items
                        .iter()
                        .enumerate()
                        .map(|(position, item)| {
                            let derivation =
                                self.deriver.derive_list_item(path, root, item, position);
                            record(path, derivation, item, FilterChain::new(), leaf_issues, out)
                        })
                        .collect();
                    compose(&expressions, list.style)
                }
                None => self.write(path, root, text, text, FilterChain::new(), out),
            },
            LeafKind::Measurement => self.write_with_variables(text, path, root, out),
            LeafKind::Parenthetical if has_trailing_parenthetical(text) => {
                self.write_with_variables(text, path, root, out)
            }
            LeafKind::Parenthetical | LeafKind::Plain => {
                self.write(path, root, text, text, FilterChain::new(), out)
            }
        }
    }

    fn write_with_variables(
        &self,
        text: &str,
        path: &DocPath,
        root: &Value,
        out: &mut Extraction,
    ) -> String {
        let variables = extract_variables(text);
        self.write(
            path,
            root,
            &variables.key_text,
            &variables.value_text,
            variables.filters,
            out,
        )
    }

    /// Derive a key, record the entry and return the placeholder text.
    fn write(
        &self,
        path: &DocPath,
        root: &Value,
        key_text: &str,
        value: &str,
        filters: FilterChain,
        out: &mut Extraction,
    ) -> String {
        let derivation = self.deriver.derive(path, root, key_text);
        let leaf_issues = out.issues.len();
        record(path, derivation, value, filters, leaf_issues, out)
    }
}

/// Record one dictionary write and return its placeholder text.
///
/// Issues already raised for the same leaf, from `out.issues[leaf_issues..]`,
/// are not repeated.
fn record(
    path: &DocPath,
    derivation: Derivation,
    value: &str,
    filters: FilterChain,
    leaf_issues: usize,
    out: &mut Extraction,
) -> String {
    for issue in derivation.issues {
        let issue = Issue::MissingIdentifier(issue);
        if !out.issues[leaf_issues..].contains(&issue) {
            out.issues.push(issue);
        }
    }

    out.entries.push(LocaleEntry {
        key: derivation.key.clone(),
        value: value.to_string(),
        origin: path.to_string(),
    });

    Placeholder::with_filters(derivation.key, filters).to_string()
}
