use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod extract;
mod init;
mod populate;

const BIN_NAME: &str = "tomekey";

/// Config used by most tests: SRD-style file names, one measurement field and
/// one list field.
pub const BASIC_CONFIG: &str = r#"{
  "domainPrefix": "5e-SRD-",
  "last": ["*Monsters*"],
  "rules": {
    "buckets": [
      { "pattern": "\\.range$", "bucket": "measurements", "name": "last" },
      { "pattern": "^monsters\\.\\d+\\.languages$", "bucket": "monster_properties", "name": "last" }
    ],
    "lists": ["^monsters\\.\\d+\\.languages$"],
    "measurements": ["\\.range$"]
  }
}"#;

pub const SPELLS: &str = r#"[
  { "index": "fireball", "name": "Fireball", "range": "150 feet", "level": 3 },
  { "index": "light", "name": "Light", "range": "Touch", "level": 0 }
]"#;

pub const MONSTERS: &str = r#"[
  { "index": "aboleth", "name": "Aboleth", "languages": "Common, Draconic and Elvish" }
]"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// Project with [`BASIC_CONFIG`] and the spell and monster documents.
    pub fn with_dataset() -> Result<Self> {
        let test = Self::with_file(".tomekeyrc.json", BASIC_CONFIG)?;
        test.write_file("data/5e-SRD-Spells.json", SPELLS)?;
        test.write_file("data/5e-SRD-Monsters.json", MONSTERS)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn extract_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("extract");
        cmd
    }

    pub fn populate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("populate");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}
