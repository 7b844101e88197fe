//! Source, locale and template files on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde_json::Value;
use walkdir::WalkDir;

use crate::config::Config;

/// A source document to extract from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// File stem, used as the template name.
    pub name: String,
    /// Root component of every key the document produces.
    pub domain: String,
}

/// A JSON file named after what it holds: a locale or a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFile {
    pub name: String,
    pub path: PathBuf,
}

/// `5e-SRD-Ability-Scores` with prefix `5e-SRD-` becomes `ability_scores`.
pub fn domain_name(stem: &str, prefix: &str) -> String {
    stem.strip_prefix(prefix)
        .unwrap_or(stem)
        .replace('-', "_")
        .to_lowercase()
}

fn compile_globs(patterns: &[String], field: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in '{}': \"{}\"", field, pattern))
        })
        .collect()
}

fn matches_any(patterns: &[Pattern], name: &str) -> bool {
    patterns.iter().any(|pattern| pattern.matches(name))
}

fn ensure_dir(dir: &Path, setting: &str) -> Result<()> {
    if !dir.exists() {
        bail!(
            "Directory '{}' does not exist.\n\
             Hint: Check your .tomekeyrc.json '{}' setting.",
            dir.display(),
            setting
        );
    }
    if !dir.is_dir() {
        bail!("'{}' is not a directory.", dir.display());
    }
    Ok(())
}

/// JSON files directly inside `dir`, sorted by file name.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|e| e.to_str()) == Some("json")
        {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Enumerate, filter and order the source documents.
///
/// Files matching `first` come before all others and files matching `last`
/// after them; within each group files are ordered by name. Order matters
/// because later documents win shared keys.
pub fn scan_sources(dir: &Path, config: &Config) -> Result<Vec<SourceFile>> {
    ensure_dir(dir, "sourceRoot")?;

    let include = Pattern::new(&config.include)
        .with_context(|| format!("Invalid glob pattern in 'include': \"{}\"", config.include))?;
    let exclude = compile_globs(&config.exclude, "exclude")?;
    let first = compile_globs(&config.first, "first")?;
    let last = compile_globs(&config.last, "last")?;

    let mut ranked: Vec<(u8, SourceFile)> = json_files(dir)?
        .into_iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_str()?.to_string();
            if !include.matches(&file_name) || matches_any(&exclude, &file_name) {
                return None;
            }
            let rank = if matches_any(&first, &file_name) {
                0
            } else if matches_any(&last, &file_name) {
                2
            } else {
                1
            };
            let name = file_stem(&path)?;
            let domain = domain_name(&name, &config.domain_prefix);
            Some((rank, SourceFile { path, name, domain }))
        })
        .collect();

    // stable: name order from json_files survives within a rank
    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked.into_iter().map(|(_, source)| source).collect())
}

/// Locale files in `dir`, named by locale (`en.json` -> `en`).
pub fn scan_locales(dir: &Path) -> Result<Vec<NamedFile>> {
    ensure_dir(dir, "localesRoot")?;
    named_files(dir)
}

/// Template files in `dir`, named by file stem.
pub fn scan_templates(dir: &Path) -> Result<Vec<NamedFile>> {
    ensure_dir(dir, "templatesRoot")?;
    named_files(dir)
}

fn named_files(dir: &Path) -> Result<Vec<NamedFile>> {
    Ok(json_files(dir)?
        .into_iter()
        .filter_map(|path| file_stem(&path).map(|name| NamedFile { name, path }))
        .collect())
}

pub fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

/// Write `value` as 2-space pretty JSON with a trailing newline.
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "[]").unwrap();
    }

    #[test]
    fn test_domain_name() {
        assert_eq!(domain_name("5e-SRD-Ability-Scores", "5e-SRD-"), "ability_scores");
        assert_eq!(domain_name("5e-SRD-Spells", "5e-SRD-"), "spells");
        assert_eq!(domain_name("Magic-Items", ""), "magic_items");
    }

    #[test]
    fn test_scan_sources_filters_and_orders() {
        let dir = tempdir().unwrap();
        for name in [
            "5e-SRD-Monsters.json",
            "5e-SRD-Spells.json",
            "5e-SRD-Levels.json",
            "5e-SRD-Magic-Schools.json",
            "5e-SRD-Traits.json",
            "5e-SRD-Alignments.json",
            "README.md",
            "other.json",
        ] {
            touch(dir.path(), name);
        }

        let config = Config {
            include: "5e-SRD-*.json".to_string(),
            exclude: vec!["5e-SRD-Levels.json".to_string()],
            first: vec!["*Magic-Schools*".to_string()],
            last: vec!["*Monsters*".to_string(), "*Traits*".to_string()],
            domain_prefix: "5e-SRD-".to_string(),
            ..Default::default()
        };

        let sources = scan_sources(dir.path(), &config).unwrap();
        let domains: Vec<&str> = sources.iter().map(|s| s.domain.as_str()).collect();
        assert_eq!(
            domains,
            vec!["magic_schools", "alignments", "spells", "monsters", "traits"]
        );
        assert_eq!(sources[0].name, "5e-SRD-Magic-Schools");
    }

    #[test]
    fn test_scan_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let err = scan_sources(&dir.path().join("nope"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_scan_locales() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "fr.json");
        touch(dir.path(), "en.json");
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let locales = scan_locales(dir.path()).unwrap();
        let names: Vec<&str> = locales.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["en", "fr"]);
    }

    #[test]
    fn test_write_json_pretty_with_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("en.json");

        write_json(&path, &json!({ "a": { "b": "c" } })).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"a\": {\n    \"b\": \"c\"\n  }\n}\n");
        assert_eq!(read_json(&path).unwrap(), json!({ "a": { "b": "c" } }));
    }
}
