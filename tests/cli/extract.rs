use anyhow::Result;
use serde_json::json;

use crate::CliTest;

#[test]
fn test_extract_builds_consolidated_document() -> Result<()> {
    let test = CliTest::with_sample_content()?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Extracted 2 items across 2 types"), "{stdout}");

    let document = test.read_json("build/content.json")?;
    assert_eq!(document["elements"]["torch01"]["label"], json!("Torch"));
    assert_eq!(
        document["cultures"]["en"]["seasons"][0]["name"],
        json!("Spring")
    );
    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> Result<()> {
    let test = CliTest::with_sample_content()?;

    assert!(test.extract_command().output()?.status.success());
    let first = test.read_file("build/content.json")?;
    assert!(test.extract_command().output()?.status.success());
    assert_eq!(test.read_file("build/content.json")?, first);
    Ok(())
}

#[test]
fn test_extract_reports_duplicates_and_skips() -> Result<()> {
    let test = CliTest::with_sample_content()?;
    test.write_file(
        "data/core/elements/zz_dup.json",
        r#"{"elements": [{"id": "torch01", "label": "Later Torch"}]}"#,
    )?;
    test.write_file("data/core/elements/broken.json", "{\"elements\": [")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "anomalies must not fail the run");
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("1 skipped"), "{stdout}");
    assert!(stdout.contains("1 duplicate ids"), "{stdout}");
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("broken.json"), "{stderr}");

    // Last write wins in lexicographic path order.
    let document = test.read_json("build/content.json")?;
    assert_eq!(
        document["elements"]["torch01"]["label"],
        json!("Later Torch")
    );
    Ok(())
}

#[test]
fn test_extract_excluded_folder_is_pruned() -> Result<()> {
    let test = CliTest::with_sample_content()?;
    test.write_file(
        "data/_test/elements/t.json",
        r#"{"elements": [{"id": "testonly"}]}"#,
    )?;

    assert!(test.extract_command().output()?.status.success());
    let document = test.read_json("build/content.json")?;
    assert!(document["elements"].get("testonly").is_none());
    Ok(())
}

#[test]
fn test_extract_missing_source_root_fails() -> Result<()> {
    let test = CliTest::with_sample_content()?;

    let output = test
        .extract_command()
        .arg("--source-root")
        .arg("no/such/dir")
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Error:"), "{stderr}");
    Ok(())
}

#[test]
fn test_extract_path_overrides() -> Result<()> {
    let test = CliTest::with_sample_content()?;

    let output = test
        .extract_command()
        .arg("-o")
        .arg("elsewhere/doc.json")
        .output()?;
    assert!(output.status.success());
    assert!(test.has_file("elsewhere/doc.json"));
    assert!(!test.has_file("build/content.json"));
    Ok(())
}

#[test]
fn test_missing_config_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("lorepot.toml"), "{stderr}");
    Ok(())
}
