//! Issue types produced while extracting or populating.
//!
//! None of these abort a run. Each issue is self-contained so the reporter can
//! print it without going back to the documents it came from.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    MissingIdentifier,
    KeyConflict,
    MissingLocaleKey,
    UnknownFilter,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingIdentifier => write!(f, "missing-identifier"),
            Rule::KeyConflict => write!(f, "key-conflict"),
            Rule::MissingLocaleKey => write!(f, "missing-locale-key"),
            Rule::UnknownFilter => write!(f, "unknown-filter"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Extraction
// ============================================================

/// An array index could not be replaced by a semantic identifier; the raw
/// number stays in the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingIdentifierIssue {
    /// Leaf path being keyed, e.g. `monsters.4.actions.2.desc`.
    pub path: String,
    /// Path of the element that lacked an identifier, e.g. `monsters.4.actions.2`.
    pub element: String,
    /// Fields that were tried.
    pub fields: Vec<String>,
}

impl MissingIdentifierIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingIdentifier
    }
}

/// Two leaves landed on the same locale key with different values. The later
/// write is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConflictIssue {
    pub key: String,
    pub previous: String,
    pub value: String,
    /// Path (or domain, for cross-document conflicts) of the later writer.
    pub origin: String,
}

impl KeyConflictIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::KeyConflict
    }
}

// ============================================================
// Issue Types - Population
// ============================================================

/// A placeholder referenced a key missing from a locale dictionary. The
/// expression is left in the output as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLocaleKeyIssue {
    pub template: String,
    pub locale: String,
    pub path: String,
    pub key: String,
}

impl MissingLocaleKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingLocaleKey
    }
}

/// A placeholder used a filter the resolver does not know. The filter is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterIssue {
    pub template: String,
    pub locale: String,
    pub path: String,
    pub filter: String,
}

impl UnknownFilterIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownFilter
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// File could not be read or parsed. The file is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingIdentifier(MissingIdentifierIssue),
    KeyConflict(KeyConflictIssue),
    MissingLocaleKey(MissingLocaleKeyIssue),
    UnknownFilter(UnknownFilterIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingIdentifier(_) => MissingIdentifierIssue::severity(),
            Issue::KeyConflict(_) => KeyConflictIssue::severity(),
            Issue::MissingLocaleKey(_) => MissingLocaleKeyIssue::severity(),
            Issue::UnknownFilter(_) => UnknownFilterIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::MissingIdentifier(_) => MissingIdentifierIssue::rule(),
            Issue::KeyConflict(_) => KeyConflictIssue::rule(),
            Issue::MissingLocaleKey(_) => MissingLocaleKeyIssue::rule(),
            Issue::UnknownFilter(_) => UnknownFilterIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A node inside a document or template, addressed by dotted path.
    Node { path: &'a str },
    /// A locale key.
    Key { key: &'a str },
    /// File-level only.
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            ReportLocation::Node { path } => *path,
            ReportLocation::Key { key } => *key,
            ReportLocation::File { path } => *path,
        }
    }
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingIdentifierIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Node { path: &self.path }
    }

    fn message(&self) -> String {
        format!("no identifier for {}", self.element)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "tried {}; keeping the numeric index",
            self.fields.join(", ")
        ))
    }
}

impl Report for KeyConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Key { key: &self.key }
    }

    fn message(&self) -> String {
        format!("\"{}\" overwrites \"{}\"", self.value, self.previous)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("written by {}", self.origin))
    }
}

impl Report for MissingLocaleKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Node { path: &self.path }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("missing in {} (template {})", self.locale, self.template))
    }
}

impl Report for UnknownFilterIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Node { path: &self.path }
    }

    fn message(&self) -> String {
        self.filter.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("skipped for {} (template {})", self.locale, self.template))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
