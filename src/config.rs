use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::rules::RuleTable;

pub const CONFIG_FILE_NAME: &str = ".tomekeyrc.json";

/// Rule table bundled for the 5e SRD dataset (`tomekey init --preset 5e-srd`).
pub const SRD_PRESET_JSON: &str = include_str!("../presets/5e-srd.json");

/// Matches dice notation such as `d20`, `2d6` or `1d8+3`.
pub const DICE_NOTATION_PATTERN: &str =
    r"^([0-9]|[1-9][0-9])?d(|4|6|8|10|12|20|1)((\+|-)([0-9]|[1-9][0-9]))?$";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the source documents.
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Glob a file name must match to be treated as a source document.
    #[serde(default = "default_include")]
    pub include: String,
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Documents matching these globs are processed before all others.
    #[serde(default)]
    pub first: Vec<String>,
    /// Documents matching these globs are processed after all others, so their
    /// leaves win shared `common.*` keys.
    #[serde(default)]
    pub last: Vec<String>,
    /// Prefix stripped from file names when deriving the domain name.
    #[serde(default)]
    pub domain_prefix: String,
    #[serde(default = "default_locales_root")]
    pub locales_root: String,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    #[serde(default = "default_templates_root")]
    pub templates_root: String,
    #[serde(default = "default_output_root")]
    pub output_root: String,
    #[serde(default)]
    pub rules: RuleConfig,
}

/// Ordered rule tables, kept as plain strings until [`RuleTable::compile`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Paths (and whole subtrees) that never produce keys or template entries.
    #[serde(default = "default_ignore_paths")]
    pub ignore_paths: Vec<String>,
    /// String values that are never translatable.
    #[serde(default = "default_ignore_values")]
    pub ignore_values: Vec<String>,
    #[serde(default = "default_identifiers")]
    pub identifiers: Vec<IdentifierRuleConfig>,
    #[serde(default)]
    pub renames: Vec<RenameRuleConfig>,
    #[serde(default)]
    pub buckets: Vec<BucketRuleConfig>,
    /// Leaves holding natural-language lists ("fire, cold, and poison").
    #[serde(default)]
    pub lists: Vec<String>,
    /// Leaves whose numbers are lifted into variables.
    #[serde(default)]
    pub measurements: Vec<String>,
    /// Name leaves whose trailing `( ... )` clause may carry numbers.
    #[serde(default)]
    pub parentheticals: Vec<String>,
    #[serde(default = "default_dropped_segments")]
    pub dropped_segments: Vec<String>,
}

/// Replaces an array index with a field of the element at that index.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierRuleConfig {
    /// Matched against the raw path ending at the index, e.g. `monsters.3`.
    pub scope: String,
    /// Candidate fields, first present wins.
    pub fields: Vec<String>,
    #[serde(default)]
    pub sanitize: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenameRuleConfig {
    pub pattern: String,
    /// Last-segment renames, e.g. `full_name -> name`.
    pub renames: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BucketRuleConfig {
    pub pattern: String,
    pub bucket: String,
    #[serde(default)]
    pub name: BucketName,
}

/// Third key component of a bucket rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum BucketName {
    /// The leaf's own field name (`range` for `spells.3.range`).
    #[default]
    Last,
    /// The field above the leaf (`components` for `spells.3.components.0`).
    Parent,
    Fixed(String),
}

impl From<String> for BucketName {
    fn from(value: String) -> Self {
        match value.as_str() {
            "last" => BucketName::Last,
            "parent" => BucketName::Parent,
            _ => BucketName::Fixed(value),
        }
    }
}

impl From<BucketName> for String {
    fn from(value: BucketName) -> Self {
        match value {
            BucketName::Last => "last".to_string(),
            BucketName::Parent => "parent".to_string(),
            BucketName::Fixed(name) => name,
        }
    }
}

fn default_source_root() -> String {
    "./data".to_string()
}

fn default_include() -> String {
    "*.json".to_string()
}

fn default_locales_root() -> String {
    "./locales".to_string()
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_templates_root() -> String {
    "./templates".to_string()
}

fn default_output_root() -> String {
    "./output".to_string()
}

fn default_ignore_paths() -> Vec<String> {
    vec![r"(index|url)$".to_string()]
}

fn default_ignore_values() -> Vec<String> {
    [r"^\d+$", DICE_NOTATION_PATTERN, "^true$", "^false$", "^$"]
        .map(String::from)
        .to_vec()
}

fn default_identifiers() -> Vec<IdentifierRuleConfig> {
    vec![IdentifierRuleConfig {
        scope: r"^[^.]+\.\d+$".to_string(),
        fields: vec!["index".to_string()],
        sanitize: false,
    }]
}

fn default_dropped_segments() -> Vec<String> {
    ["from", "info"].map(String::from).to_vec()
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            ignore_paths: default_ignore_paths(),
            ignore_values: default_ignore_values(),
            identifiers: default_identifiers(),
            renames: Vec::new(),
            buckets: Vec::new(),
            lists: Vec::new(),
            measurements: Vec::new(),
            parentheticals: Vec::new(),
            dropped_segments: default_dropped_segments(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            include: default_include(),
            exclude: Vec::new(),
            first: Vec::new(),
            last: Vec::new(),
            domain_prefix: String::new(),
            locales_root: default_locales_root(),
            source_locale: default_source_locale(),
            templates_root: default_templates_root(),
            output_root: default_output_root(),
            rules: RuleConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any file glob or rule pattern is malformed.
    pub fn validate(&self) -> Result<()> {
        Pattern::new(&self.include)
            .with_context(|| format!("Invalid glob pattern in 'include': \"{}\"", self.include))?;

        for (field, patterns) in [
            ("exclude", &self.exclude),
            ("first", &self.first),
            ("last", &self.last),
        ] {
            for pattern in patterns {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in '{}': \"{}\"", field, pattern)
                })?;
            }
        }

        RuleTable::compile(&self.rules)?;

        Ok(())
    }

    /// Resolve a configured directory against the directory holding the config.
    pub fn resolve_dir(&self, base_dir: &Path, dir: &str) -> PathBuf {
        let path = Path::new(dir);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        let relative = path.strip_prefix(".").unwrap_or(path);
        base_dir.join(relative)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory that relative paths in the config are resolved against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
