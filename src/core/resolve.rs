//! Placeholder resolution.
//!
//! Mirrors a template tree and evaluates every `{{ ... }}` expression against
//! one locale dictionary. Failures are per expression: a missing key keeps the
//! expression text visible in the output and an unknown filter is skipped,
//! while everything around it still resolves.

use serde_json::{Map, Value};

use super::{
    locale::LocaleData,
    path::DocPath,
    placeholder::{Placeholder, TemplatePart, is_templated, parse_template},
};
use crate::issues::{Issue, MissingLocaleKeyIssue, UnknownFilterIssue};

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub document: Value,
    pub issues: Vec<Issue>,
}

pub struct PlaceholderResolver<'a> {
    template_name: &'a str,
    locale_name: &'a str,
    locale: &'a LocaleData,
}

impl<'a> PlaceholderResolver<'a> {
    pub fn new(template_name: &'a str, locale_name: &'a str, locale: &'a LocaleData) -> Self {
        Self {
            template_name,
            locale_name,
            locale,
        }
    }

    pub fn resolve(&self, template: &Value) -> Resolution {
        let mut issues = Vec::new();
        let document = self.resolve_node(template, &DocPath::root(self.template_name), &mut issues);
        Resolution { document, issues }
    }

    fn resolve_node(&self, node: &Value, path: &DocPath, issues: &mut Vec<Issue>) -> Value {
        match node {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, child)| {
                        let resolved = self.resolve_node(child, &path.child(key.as_str()), issues);
                        (key.clone(), resolved)
                    })
                    .collect::<Map<String, Value>>(),
            ),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, child)| self.resolve_node(child, &path.child(index), issues))
                    .collect(),
            ),
            Value::String(text) if is_templated(text) => {
                Value::String(self.render(text, &path.to_string(), issues))
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => node.clone(),
        }
    }

    /// Render one templated string.
    pub fn render(&self, text: &str, path: &str, issues: &mut Vec<Issue>) -> String {
        let mut output = String::with_capacity(text.len());

        for part in parse_template(text) {
            match part {
                TemplatePart::Literal(literal) => output.push_str(literal),
                TemplatePart::Expression {
                    source,
                    placeholder,
                } => match self.evaluate(&placeholder, path, issues) {
                    Some(value) => output.push_str(&value),
                    None => output.push_str(source),
                },
            }
        }

        output
    }

    fn evaluate(
        &self,
        placeholder: &Placeholder,
        path: &str,
        issues: &mut Vec<Issue>,
    ) -> Option<String> {
        let Some(value) = self.locale.get(&placeholder.key) else {
            issues.push(Issue::MissingLocaleKey(MissingLocaleKeyIssue {
                template: self.template_name.to_string(),
                locale: self.locale_name.to_string(),
                path: path.to_string(),
                key: placeholder.key.clone(),
            }));
            return None;
        };

        let resolved = placeholder
            .filters
            .iter()
            .fold(value.to_string(), |text, filter| match filter.apply(&text) {
                Some(applied) => applied,
                None => {
                    issues.push(Issue::UnknownFilter(UnknownFilterIssue {
                        template: self.template_name.to_string(),
                        locale: self.locale_name.to_string(),
                        path: path.to_string(),
                        filter: filter.to_string(),
                    }));
                    text
                }
            });

        Some(resolved)
    }
}
