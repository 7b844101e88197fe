use std::{env, path::PathBuf};

use anyhow::{Context as _, Result};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::RuleTable,
};

/// Configuration and compiled rules shared by `extract` and `populate`.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g. `--source-locale fr`)
/// 2. `.tomekeyrc.json` found from `--root` or the current directory upward
/// 3. Built-in defaults
pub struct CommandContext {
    pub config: Config,
    /// Directory relative config paths resolve against.
    pub base_dir: PathBuf,
    pub rules: RuleTable,
}

impl CommandContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let start_dir = match &args.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to get current directory")?,
        };

        let loaded = load_config(&start_dir)?;
        let mut config = loaded.config;
        if let Some(locale) = &args.source_locale {
            config.source_locale = locale.clone();
        }

        let rules = RuleTable::compile(&config.rules)?;

        Ok(Self {
            config,
            base_dir: loaded.base_dir,
            rules,
        })
    }

    pub fn source_dir(&self) -> PathBuf {
        self.config
            .resolve_dir(&self.base_dir, &self.config.source_root)
    }

    pub fn locales_dir(&self) -> PathBuf {
        self.config
            .resolve_dir(&self.base_dir, &self.config.locales_root)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.config
            .resolve_dir(&self.base_dir, &self.config.templates_root)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config
            .resolve_dir(&self.base_dir, &self.config.output_root)
    }

    /// Path of the dictionary `extract` writes.
    pub fn source_locale_file(&self) -> PathBuf {
        self.locales_dir()
            .join(format!("{}.json", self.config.source_locale))
    }
}
