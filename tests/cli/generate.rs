use anyhow::Result;

use crate::CliTest;

fn extracted_project() -> Result<CliTest> {
    let test = CliTest::with_sample_content()?;
    assert!(test.extract_command().output()?.status.success());
    Ok(test)
}

#[test]
fn test_generate_writes_candidate_catalog() -> Result<()> {
    let test = extracted_project()?;

    let output = test.generate_command().output()?;
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("candidate entries"), "{stdout}");

    let pot = test.read_file("build/messages.pot")?;
    assert!(pot.contains("msgid \"Torch\""));
    assert!(pot.contains("msgid \"A burning brand.\""));
    // Culture entries are disambiguated by structural context.
    assert!(pot.contains("msgctxt \"/cultures/en/seasons/0/name\""));
    assert!(pot.contains("msgctxt \"/cultures/en/seasons/1/name\""));
    // Ordinary entries have no context.
    assert!(!pot.contains("msgctxt \"/elements"));
    Ok(())
}

#[test]
fn test_generate_output_is_reproducible() -> Result<()> {
    let test = extracted_project()?;

    assert!(test.generate_command().output()?.status.success());
    let first = test.read_file("build/messages.pot")?;
    assert!(test.generate_command().output()?.status.success());
    assert_eq!(test.read_file("build/messages.pot")?, first);
    Ok(())
}

#[test]
fn test_generate_warns_on_unknown_rule_type() -> Result<()> {
    let test = extracted_project()?;
    test.write_file(
        "lorepot.toml",
        r#"
[rules.elements]
patterns = ["^/label$"]

[rules.legacies]
patterns = ["^/label$"]
"#,
    )?;

    let output = test.generate_command().output()?;
    assert!(output.status.success(), "warnings are not failures");
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("warning:"), "{stderr}");
    assert!(stderr.contains("legacies"), "{stderr}");
    Ok(())
}

#[test]
fn test_generate_strict_mode_promotes_warnings() -> Result<()> {
    let test = extracted_project()?;
    test.write_file(
        "lorepot.toml",
        r#"
[rules.legacies]
patterns = ["^/label$"]
"#,
    )?;

    let output = test.generate_command().arg("--strict").output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("strict mode"), "{stderr}");
    Ok(())
}

#[test]
fn test_generate_invalid_pattern_fails() -> Result<()> {
    let test = extracted_project()?;
    test.write_file(
        "lorepot.toml",
        r#"
[rules.elements]
patterns = ["["]
"#,
    )?;

    let output = test.generate_command().output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("invalid pattern"), "{stderr}");
    Ok(())
}

#[test]
fn test_generate_missing_document_fails() -> Result<()> {
    let test = CliTest::with_sample_content()?;

    let output = test.generate_command().output()?;
    assert!(!output.status.success());
    Ok(())
}
