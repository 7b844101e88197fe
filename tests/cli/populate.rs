use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::CliTest;

const FRENCH: &str = r#"{
  "common": {
    "delimiters": { "and": " et ", "and_with_oxford_comma": " et " },
    "measurements": { "range": { "x_feet": "{{ x }} pieds", "touch": "Contact" } },
    "monster_properties": {
      "languages": { "common": "Commun", "draconic": "Draconique", "elvish": "Elfique" }
    }
  },
  "monsters": { "aboleth": { "name": "Aboleth" } },
  "spells": { "fireball": { "name": "Boule de feu" } }
}"#;

/// Dataset extracted with templates, plus a French dictionary.
fn extracted() -> Result<CliTest> {
    let test = CliTest::with_dataset()?;
    let output = test.extract_command().arg("--generate-templates").output()?;
    assert_eq!(output.status.code(), Some(0));
    test.write_file("locales/fr.json", FRENCH)?;
    Ok(test)
}

#[test]
fn test_populate_merges_every_locale() -> Result<()> {
    let test = extracted()?;

    let output = test.populate_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stdout.contains("Populated 2 documents in 2 locales (en, fr)"),
        "stdout: {}",
        stdout
    );

    assert_eq!(
        test.read_json("output/5e-SRD-Spells.json")?,
        json!([
            {
                "name": { "en": "Fireball", "fr": "Boule de feu" },
                "range": { "en": "150 feet", "fr": "150 pieds" },
                "level": 3
            },
            {
                "name": { "en": "Light", "fr": "{{ spells.light.name }}" },
                "range": { "en": "Touch", "fr": "Contact" },
                "level": 0
            }
        ])
    );

    assert_eq!(
        test.read_json("output/5e-SRD-Monsters.json")?,
        json!([
            {
                "name": { "en": "Aboleth", "fr": "Aboleth" },
                "languages": {
                    "en": "Common, Draconic and Elvish",
                    "fr": "Commun, Draconique et Elfique"
                }
            }
        ])
    );

    Ok(())
}

#[test]
fn test_populate_reports_missing_keys() -> Result<()> {
    let test = extracted()?;

    let output = test.populate_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("missing-locale-key  1"), "stdout: {}", stdout);

    let verbose = test.populate_command().arg("-v").output()?;
    let stdout = String::from_utf8_lossy(&verbose.stdout);

    assert_eq!(verbose.status.code(), Some(0));
    assert!(stdout.contains("warning: spells.light.name  missing-locale-key"));
    assert!(stdout.contains("--> 5e-SRD-Spells.1.name"));
    assert!(stdout.contains("= note: missing in fr (template 5e-SRD-Spells)"));
    assert!(stdout.contains("populated 5e-SRD-Spells.json"));

    Ok(())
}

#[test]
fn test_populate_skips_unknown_filters() -> Result<()> {
    let test = extracted()?;
    test.write_file(
        "templates/Index.json",
        r#"{ "title": "{{ spells.fireball.name | upcase }}!", "count": 1 }"#,
    )?;

    let output = test.populate_command().arg("-v").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("warning: upcase  unknown-filter"), "stdout: {}", stdout);

    assert_eq!(
        test.read_json("output/Index.json")?,
        json!({
            "title": { "en": "Fireball!", "fr": "Boule de feu!" },
            "count": 1
        })
    );

    Ok(())
}

#[test]
fn test_populate_reports_broken_locale() -> Result<()> {
    let test = extracted()?;
    test.write_file("locales/de.json", "[1, 2")?;

    let output = test.populate_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("parse-error"), "stdout: {}", stdout);
    assert!(stdout.contains("in 2 locales (en, fr)"), "stdout: {}", stdout);

    Ok(())
}

#[test]
fn test_populate_fails_without_templates() -> Result<()> {
    let test = CliTest::with_dataset()?;
    test.extract_command().output()?;

    let output = test.populate_command().output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("templatesRoot"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_populate_without_locales_writes_nothing() -> Result<()> {
    let test = CliTest::with_dataset()?;
    test.extract_command().arg("--generate-templates").output()?;
    std::fs::remove_file(test.root().join("locales/en.json"))?;

    let output = test.populate_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stdout.contains("Populated 0 documents in 0 locales"),
        "stdout: {}",
        stdout
    );
    assert!(!test.root().join("output/5e-SRD-Spells.json").exists());

    Ok(())
}
