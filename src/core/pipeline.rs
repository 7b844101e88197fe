//! Extraction and population runs over whole directories.
//!
//! Documents are walked in parallel, each into its own [`Extraction`]. The
//! results are collected in source order and applied to the dictionary one
//! after another, so shared keys always end up with the value of the last
//! document in that order.

use std::path::Path;

use rayon::prelude::*;
use serde_json::Value;

use super::{
    locale::LocaleData,
    merge::merge_locales,
    resolve::PlaceholderResolver,
    rules::RuleTable,
    sources::{NamedFile, SourceFile, read_json},
    walker::{Extraction, TreeWalker},
};
use crate::issues::{Issue, ParseErrorIssue};

/// Per-document numbers for progress output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStats {
    pub name: String,
    pub domain: String,
    pub entries: usize,
}

pub struct ExtractOutput {
    pub locale: LocaleData,
    /// `(template name, template)` in source order.
    pub templates: Vec<(String, Value)>,
    pub documents: Vec<DocumentStats>,
    pub issues: Vec<Issue>,
}

fn parse_error(path: &Path, err: anyhow::Error) -> Issue {
    Issue::ParseError(ParseErrorIssue {
        file_path: path.to_string_lossy().to_string(),
        error: format!("{:#}", err),
    })
}

pub fn extract(sources: &[SourceFile], rules: &RuleTable, generate_templates: bool) -> ExtractOutput {
    let walker = TreeWalker::new(rules, generate_templates);

    let walked: Vec<Result<Extraction, Issue>> = sources
        .par_iter()
        .map(|source| -> Result<Extraction, Issue> {
            let document = read_json(&source.path).map_err(|e| parse_error(&source.path, e))?;
            Ok(walker.walk(&source.name, &source.domain, &document))
        })
        .collect();

    let mut output = ExtractOutput {
        locale: LocaleData::seeded(),
        templates: Vec::new(),
        documents: Vec::new(),
        issues: Vec::new(),
    };

    for result in walked {
        let extraction = match result {
            Ok(extraction) => extraction,
            Err(issue) => {
                output.issues.push(issue);
                continue;
            }
        };

        let conflicts = extraction.apply_to(&mut output.locale);
        output.issues.extend(extraction.issues);
        output.issues.extend(conflicts);
        output.documents.push(DocumentStats {
            name: extraction.name.clone(),
            domain: extraction.domain,
            entries: extraction.entries.len(),
        });
        if let Some(template) = extraction.template {
            output.templates.push((extraction.name, template));
        }
    }

    output
}

pub struct PopulateOutput {
    /// `(template name, merged document)` in template order.
    pub documents: Vec<(String, Value)>,
    /// Locales that loaded successfully.
    pub locales: Vec<String>,
    pub issues: Vec<Issue>,
}

/// Resolve every template against every locale and merge the results.
///
/// Without a loadable locale there is nothing to merge, and no documents are
/// produced.
pub fn populate(templates: &[NamedFile], locale_files: &[NamedFile]) -> PopulateOutput {
    let mut issues = Vec::new();
    let mut locales: Vec<(String, LocaleData)> = Vec::new();

    for file in locale_files {
        match LocaleData::load(&file.path) {
            Ok(locale) => locales.push((file.name.clone(), locale)),
            Err(e) => issues.push(parse_error(&file.path, e)),
        }
    }

    let populated: Vec<Result<(Option<(String, Value)>, Vec<Issue>), Issue>> = templates
        .par_iter()
        .map(|file| -> Result<(Option<(String, Value)>, Vec<Issue>), Issue> {
            let template = read_json(&file.path).map_err(|e| parse_error(&file.path, e))?;
            let mut template_issues = Vec::new();

            let resolved: Vec<(String, Value)> = locales
                .iter()
                .map(|(locale_name, locale)| {
                    let resolution =
                        PlaceholderResolver::new(&file.name, locale_name, locale).resolve(&template);
                    template_issues.extend(resolution.issues);
                    (locale_name.clone(), resolution.document)
                })
                .collect();

            let merged =
                merge_locales(&template, resolved).map(|merged| (file.name.clone(), merged));
            Ok((merged, template_issues))
        })
        .collect();

    let mut documents = Vec::new();
    for result in populated {
        match result {
            Ok((document, template_issues)) => {
                documents.extend(document);
                issues.extend(template_issues);
            }
            Err(issue) => issues.push(issue),
        }
    }

    PopulateOutput {
        documents,
        locales: locales.into_iter().map(|(name, _)| name).collect(),
        issues,
    }
}
