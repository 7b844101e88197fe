//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style. Without `-v` only errors are printed in
//! full; warnings are folded into a per-rule count table.

use std::collections::BTreeMap;
use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, InitSummary, PopulateSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, Rule, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    {
        let mut stdout = io::stdout().lock();
        report_to(&result.issues, verbose, &mut stdout);
        print_command_summary_to(&result.summary, verbose, &mut stdout);
    }

    print_parse_warning_to(result.parse_error_count, verbose, &mut io::stderr().lock());
}

/// Print issues to a custom writer.
///
/// Errors come first, each group in the order the issues were found.
pub fn report_to<W: Write>(issues: &[Issue], verbose: bool, writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let (errors, warnings): (Vec<&Issue>, Vec<&Issue>) = issues
        .iter()
        .partition(|i| i.report_severity() == Severity::Error);

    for issue in &errors {
        print_issue(issue, writer);
    }

    if verbose {
        for issue in &warnings {
            print_issue(issue, writer);
        }
    } else {
        print_warning_counts(&warnings, writer);
    }

    print_summary(errors.len(), warnings.len(), writer);
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed and were skipped",
            "warning:".bold().yellow(),
            count,
        );
    }
}

pub fn print_command_summary_to<W: Write>(summary: &CommandSummary, verbose: bool, writer: &mut W) {
    match summary {
        CommandSummary::Extract(summary) => print_extract(summary, verbose, writer),
        CommandSummary::Populate(summary) => print_populate(summary, verbose, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.location().as_str());

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_warning_counts<W: Write>(warnings: &[&Issue], writer: &mut W) {
    if warnings.is_empty() {
        return;
    }

    let mut counts: BTreeMap<Rule, usize> = BTreeMap::new();
    for issue in warnings {
        *counts.entry(issue.report_rule()).or_default() += 1;
    }

    let names: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(rule, count)| (rule.to_string(), count))
        .collect();
    let name_width = names
        .iter()
        .map(|(name, _)| UnicodeWidthStr::width(name.as_str()))
        .max()
        .unwrap_or(0);

    let _ = writeln!(
        writer,
        "{}: {} not shown (use {} for details)",
        "warning".bold().yellow(),
        plural(warnings.len(), "warning", "warnings"),
        "-v".cyan()
    );
    for (name, count) in &names {
        let padding = name_width - UnicodeWidthStr::width(name.as_str());
        let _ = writeln!(
            writer,
            "  {}{}  {}",
            name.cyan(),
            " ".repeat(padding),
            count
        );
    }
}

fn print_summary<W: Write>(total_errors: usize, total_warnings: usize, writer: &mut W) {
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

fn print_extract<W: Write>(summary: &ExtractSummary, verbose: bool, writer: &mut W) {
    if verbose && !summary.documents.is_empty() {
        let name_width = summary
            .documents
            .iter()
            .map(|doc| UnicodeWidthStr::width(doc.name.as_str()))
            .max()
            .unwrap_or(0);

        for doc in &summary.documents {
            let padding = name_width - UnicodeWidthStr::width(doc.name.as_str());
            let _ = writeln!(
                writer,
                "  {}{}  {} {}  ({})",
                doc.name,
                " ".repeat(padding),
                "->".blue(),
                doc.domain,
                plural(doc.entries, "entry", "entries")
            );
        }
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} from {} to {}",
            plural(summary.key_count, "key", "keys"),
            plural(summary.documents.len(), "document", "documents"),
            summary.locale_file.display()
        )
        .green()
    );

    if let Some(dir) = &summary.templates_dir {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Wrote {} to {}",
                plural(summary.template_count, "template", "templates"),
                dir.display()
            )
            .green()
        );
    }
}

fn print_populate<W: Write>(summary: &PopulateSummary, verbose: bool, writer: &mut W) {
    if verbose {
        for name in &summary.document_names {
            let _ = writeln!(writer, "  {} {}.json", "populated".bold(), name);
        }
    }

    let locales = if summary.locales.is_empty() {
        String::new()
    } else {
        format!(" ({})", summary.locales.join(", "))
    };

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Populated {} in {}{} to {}",
            plural(summary.document_names.len(), "document", "documents"),
            plural(summary.locales.len(), "locale", "locales"),
            locales,
            summary.output_dir.display()
        )
        .green()
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let preset = summary
        .preset
        .map(|name| format!(" from preset {}", name))
        .unwrap_or_default();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}{}", CONFIG_FILE_NAME, preset).green()
    );
}
