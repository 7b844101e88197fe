use std::{env, fs};

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, InitSummary, helper::finish};
use crate::{
    cli::args::{InitCommand, Preset},
    config::{CONFIG_FILE_NAME, SRD_PRESET_JSON, default_config_json},
};

/// Write `.tomekeyrc.json` into the current directory.
pub fn init(cmd: InitCommand) -> Result<CommandResult> {
    let config_path = env::current_dir()
        .context("Failed to get current directory")?
        .join(CONFIG_FILE_NAME);

    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    let (content, preset) = match cmd.preset {
        Some(Preset::Srd5e) => (SRD_PRESET_JSON.to_string(), Some("5e-srd")),
        None => (default_config_json()?, None),
    };

    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let summary = InitSummary {
        config_file: config_path,
        preset,
    };
    Ok(finish(CommandSummary::Init(summary), Vec::new()))
}
