use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    // 1. Parse as JSON
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    // 2. Verify expected fields exist
    assert!(
        parsed.get("sourceRoot").is_some(),
        "Config should have 'sourceRoot' field"
    );
    assert!(
        parsed.get("sourceLocale").is_some(),
        "Config should have 'sourceLocale' field"
    );
    assert!(
        parsed.pointer("/rules/ignorePaths").is_some(),
        "Config should have 'rules.ignorePaths' field"
    );

    // 3. Verify formatting (2-space indentation)
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(String::from_utf8_lossy(&output.stdout), @"✓ Created .tomekeyrc.json");

    // Verify file exists
    assert!(test.root().join(".tomekeyrc.json").exists());

    // Verify content is valid and has expected structure
    let content = test.read_file(".tomekeyrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_with_preset() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["init", "--preset", "5e-srd"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(
        String::from_utf8_lossy(&output.stdout),
        @"✓ Created .tomekeyrc.json from preset 5e-srd"
    );

    let content = test.read_file(".tomekeyrc.json")?;
    assert_config_content(&content)?;

    let parsed: Value = serde_json::from_str(&content)?;
    assert_eq!(parsed["domainPrefix"], "5e-SRD-");
    assert_eq!(parsed["exclude"][0], "5e-SRD-Levels.json");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".tomekeyrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_snapshot!(
        String::from_utf8_lossy(&output.stderr),
        @"Error: .tomekeyrc.json already exists"
    );

    // untouched
    assert_eq!(test.read_file(".tomekeyrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    // Initialize config
    test.command().arg("init").output()?;

    // Create minimal project structure
    test.write_file(
        "data/Skills.json",
        r#"[{ "index": "arcana", "name": "Arcana", "desc": ["Recall lore."] }]"#,
    )?;

    // Verify extract works with initialized config
    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let locale = test.read_json("locales/en.json")?;
    assert_eq!(locale["skills"]["arcana"]["name"], "Arcana");
    assert_eq!(locale["skills"]["arcana"]["desc"]["0"], "Recall lore.");

    Ok(())
}
