use anyhow::Result;
use polib::catalog::Catalog;
use polib::message::Message;
use polib::metadata::CatalogMetadata;
use serde_json::json;

use crate::CliTest;

fn write_mo(test: &CliTest, path: &str, entries: &[(Option<&str>, &str, &str)]) -> Result<()> {
    let mut catalog = Catalog::new(CatalogMetadata::new());
    for (context, source, translation) in entries {
        let mut builder = Message::build_singular();
        builder
            .with_msgid(source.to_string())
            .with_msgstr(translation.to_string());
        if let Some(context) = context {
            builder.with_msgctxt(context.to_string());
        }
        catalog.append_or_update(builder.done());
    }
    let full = test.root().join(path);
    std::fs::create_dir_all(full.parent().unwrap())?;
    polib::mo_file::write(&catalog, &full)?;
    Ok(())
}

fn extracted_project() -> Result<CliTest> {
    let test = CliTest::with_sample_content()?;
    assert!(test.extract_command().output()?.status.success());
    Ok(test)
}

#[test]
fn test_inject_substitutes_translations() -> Result<()> {
    let test = extracted_project()?;
    write_mo(
        &test,
        "build/messages.mo",
        &[(None, "Torch", "松明"), (None, "A burning brand.", "燃える薪。")],
    )?;

    let output = test.inject_command().output()?;
    assert!(output.status.success(), "{output:?}");

    let content = test.read_json("build/loc/content.json")?;
    assert_eq!(
        content,
        json!({"elements": [{
            "id": "torch01",
            "label": "松明",
            "description": "燃える薪。",
        }]})
    );
    // Culture record had no translations, so no culture artifact.
    assert!(!test.has_file("build/loc/culture.json"));
    Ok(())
}

#[test]
fn test_inject_omits_untranslated_items() -> Result<()> {
    let test = extracted_project()?;
    write_mo(&test, "build/messages.mo", &[(None, "Unrelated", "無関係")])?;

    let output = test.inject_command().output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("0 items"), "{stdout}");

    let content = test.read_json("build/loc/content.json")?;
    assert_eq!(content, json!({}));
    Ok(())
}

#[test]
fn test_inject_culture_record_goes_to_dedicated_output() -> Result<()> {
    let test = extracted_project()?;
    write_mo(
        &test,
        "build/messages.mo",
        &[
            (Some("/cultures/en/seasons/0/name"), "Spring", "春"),
            (Some("/cultures/en/seasons/1/name"), "Spring", "泉"),
        ],
    )?;

    let output = test.inject_command().output()?;
    assert!(output.status.success(), "{output:?}");

    let culture = test.read_json("build/loc/culture.json")?;
    assert_eq!(
        culture,
        json!({"cultures": [{
            "id": "en",
            "seasons": [{"name": "春"}, {"name": "泉"}],
        }]})
    );
    // Ordinary output exists but holds nothing.
    assert_eq!(test.read_json("build/loc/content.json")?, json!({}));
    Ok(())
}

#[test]
fn test_inject_applies_culture_overrides() -> Result<()> {
    let test = extracted_project()?;
    test.write_file(
        "lorepot.toml",
        r#"
[culture.overrides]
id = "ja"
endonym = "日本語"

[rules.cultures]
patterns = ["/name$"]
"#,
    )?;
    write_mo(
        &test,
        "build/messages.mo",
        &[(Some("/cultures/en/seasons/0/name"), "Spring", "春")],
    )?;

    assert!(test.inject_command().output()?.status.success());
    let culture = test.read_json("build/loc/culture.json")?;
    let record = &culture["cultures"][0];
    assert_eq!(record["id"], json!("ja"));
    assert_eq!(record["endonym"], json!("日本語"));
    assert_eq!(record["seasons"][0]["name"], json!("春"));
    Ok(())
}

#[test]
fn test_inject_accepts_po_catalog() -> Result<()> {
    let test = extracted_project()?;
    test.write_file(
        "build/translated.po",
        r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

msgid "Torch"
msgstr "Fackel"
"#,
    )?;

    let output = test
        .inject_command()
        .arg("--compiled")
        .arg("build/translated.po")
        .output()?;
    assert!(output.status.success(), "{output:?}");
    let content = test.read_json("build/loc/content.json")?;
    assert_eq!(content["elements"][0]["label"], json!("Fackel"));
    Ok(())
}

#[test]
fn test_inject_po_without_header_is_accepted() -> Result<()> {
    // Hand-written translator files often omit the header entry entirely;
    // loading must succeed rather than fail or abort.
    let test = extracted_project()?;
    test.write_file(
        "build/translated.po",
        "msgid \"Torch\"\nmsgstr \"Fackel\"\n\nmsgid \"A burning brand.\"\nmsgstr \"\"\n\"Eine brennende \"\n\"Fackel.\"\n",
    )?;

    let output = test
        .inject_command()
        .arg("--compiled")
        .arg("build/translated.po")
        .output()?;
    assert!(output.status.success(), "{output:?}");
    let content = test.read_json("build/loc/content.json")?;
    assert_eq!(content["elements"][0]["label"], json!("Fackel"));
    assert_eq!(
        content["elements"][0]["description"],
        json!("Eine brennende Fackel.")
    );
    Ok(())
}

#[test]
fn test_inject_unreadable_catalog_is_fatal() -> Result<()> {
    let test = extracted_project()?;
    test.write_file("build/messages.mo", "garbage")?;

    let output = test.inject_command().output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Error:"), "{stderr}");
    Ok(())
}
