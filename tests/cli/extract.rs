use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{BASIC_CONFIG, CliTest};

#[test]
fn test_extract_writes_sorted_source_locale() -> Result<()> {
    let test = CliTest::with_dataset()?;

    let output = test.extract_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Wrote 10 keys from 2 documents"), "stdout: {}", stdout);

    let locale = test.read_json("locales/en.json")?;
    assert_eq!(
        locale,
        json!({
            "common": {
                "delimiters": {
                    "and": " and ",
                    "and_with_oxford_comma": ", and "
                },
                "measurements": {
                    "range": {
                        "x_feet": "{{ x }} feet",
                        "touch": "Touch"
                    }
                },
                "monster_properties": {
                    "languages": {
                        "common": "Common",
                        "draconic": "Draconic",
                        "elvish": "Elvish"
                    }
                }
            },
            "monsters": {
                "aboleth": { "name": "Aboleth" }
            },
            "spells": {
                "fireball": { "name": "Fireball" },
                "light": { "name": "Light" }
            }
        })
    );

    let top_level: Vec<&String> = locale.as_object().unwrap().keys().collect();
    assert_eq!(top_level, ["common", "monsters", "spells"]);

    let content = test.read_file("locales/en.json")?;
    assert!(content.starts_with("{\n  \"common\""));
    assert!(content.ends_with("}\n"));

    // no templates unless asked
    assert!(!test.root().join("templates").exists());

    Ok(())
}

#[test]
fn test_extract_generates_templates() -> Result<()> {
    let test = CliTest::with_dataset()?;

    let output = test.extract_command().arg("--generate-templates").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Wrote 2 templates"), "stdout: {}", stdout);

    assert_eq!(
        test.read_json("templates/5e-SRD-Spells.json")?,
        json!([
            {
                "name": "{{ spells.fireball.name }}",
                "range": "{{ common.measurements.range.x_feet | replace: '{{ x }}', '150' }}",
                "level": 3
            },
            {
                "name": "{{ spells.light.name }}",
                "range": "{{ common.measurements.range.touch }}",
                "level": 0
            }
        ])
    );

    assert_eq!(
        test.read_json("templates/5e-SRD-Monsters.json")?,
        json!([
            {
                "name": "{{ monsters.aboleth.name }}",
                "languages": "{{ common.monster_properties.languages.common }}, \
                              {{ common.monster_properties.languages.draconic }}\
                              {{ common.delimiters.and }}\
                              {{ common.monster_properties.languages.elvish }}"
            }
        ])
    );

    Ok(())
}

#[test]
fn test_extract_verbose_lists_documents_in_processing_order() -> Result<()> {
    let test = CliTest::with_dataset()?;

    let output = test.extract_command().arg("-v").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    let spells = stdout.find("5e-SRD-Spells").unwrap();
    let monsters = stdout.find("5e-SRD-Monsters").unwrap();
    assert!(spells < monsters, "stdout: {}", stdout);
    assert!(stdout.contains("-> spells  (4 entries)"), "stdout: {}", stdout);
    assert!(stdout.contains("-> monsters  (4 entries)"), "stdout: {}", stdout);

    Ok(())
}

#[test]
fn test_extract_reports_key_conflicts() -> Result<()> {
    let test = CliTest::with_file(".tomekeyrc.json", BASIC_CONFIG)?;
    test.write_file(
        "data/5e-SRD-Equipment.json",
        r#"[{ "index": "lantern", "name": "Lantern", "range": "30 Feet" }]"#,
    )?;
    test.write_file(
        "data/5e-SRD-Spells.json",
        r#"[{ "index": "light", "name": "Light", "range": "30 feet" }]"#,
    )?;

    let output = test.extract_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    // warnings never fail the run
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("1 warning not shown (use -v for details)"), "stdout: {}", stdout);
    assert!(stdout.contains("key-conflict  1"), "stdout: {}", stdout);
    assert!(stdout.contains("1 problems (0 errors, 1 warning)"), "stdout: {}", stdout);

    // the later document wins
    let locale = test.read_json("locales/en.json")?;
    assert_eq!(
        locale.pointer("/common/measurements/range/x_feet"),
        Some(&json!("{{ x }} feet"))
    );

    let verbose = test.extract_command().arg("--verbose").output()?;
    let stdout = String::from_utf8_lossy(&verbose.stdout);
    assert!(stdout.contains(
        "warning: \"{{ x }} feet\" overwrites \"{{ x }} Feet\"  key-conflict"
    ));
    assert!(stdout.contains("--> common.measurements.range.x_feet"));
    assert!(stdout.contains("= note: written by spells.0.range"));

    Ok(())
}

#[test]
fn test_extract_skips_unparsable_documents() -> Result<()> {
    let test = CliTest::with_dataset()?;
    test.write_file("data/5e-SRD-Broken.json", "{ not json")?;

    let output = test.extract_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("error: Failed to parse JSON file"), "stdout: {}", stdout);
    assert!(stdout.contains("parse-error"));
    assert!(stderr.contains("1 file(s) could not be parsed"), "stderr: {}", stderr);

    let locale = test.read_json("locales/en.json")?;
    assert_eq!(locale.pointer("/spells/fireball/name"), Some(&json!("Fireball")));

    Ok(())
}

#[test]
fn test_extract_respects_exclude_and_source_locale() -> Result<()> {
    let test = CliTest::with_file(
        ".tomekeyrc.json",
        r#"{ "exclude": ["*Levels*"], "domainPrefix": "5e-SRD-" }"#,
    )?;
    test.write_file("data/5e-SRD-Skills.json", r#"[{ "index": "arcana", "name": "Arcana" }]"#)?;
    test.write_file("data/5e-SRD-Levels.json", r#"[{ "index": "bard-1", "name": "Bard 1" }]"#)?;

    let output = test
        .extract_command()
        .args(["--source-locale", "en-GB"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!test.root().join("locales/en.json").exists());

    let locale = test.read_json("locales/en-GB.json")?;
    assert_eq!(locale.pointer("/skills/arcana/name"), Some(&json!("Arcana")));
    assert!(locale.get("levels").is_none());

    Ok(())
}

#[test]
fn test_extract_fails_without_source_dir() -> Result<()> {
    let test = CliTest::with_file(".tomekeyrc.json", "{}")?;

    let output = test.extract_command().output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
    assert!(stderr.contains("sourceRoot"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_extract_rejects_malformed_rule() -> Result<()> {
    let test = CliTest::with_file(
        ".tomekeyrc.json",
        r#"{ "rules": { "buckets": [{ "pattern": "(unclosed", "bucket": "broken" }] } }"#,
    )?;
    test.write_file("data/5e-SRD-Spells.json", "[]")?;

    let output = test.extract_command().output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr.contains("Malformed rule in 'rules.buckets[0]'"),
        "stderr: {}",
        stderr
    );
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_extract_uses_root_flag() -> Result<()> {
    let test = CliTest::with_dataset()?;
    let elsewhere = CliTest::new()?;

    let output = elsewhere
        .extract_command()
        .arg("--root")
        .arg(test.root())
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.root().join("locales/en.json").exists());
    assert!(!elsewhere.root().join("locales").exists());

    Ok(())
}
