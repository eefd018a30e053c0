use anyhow::Result;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "{output:?}");
    assert!(test.has_file("lorepot.toml"));

    let config = test.read_file("lorepot.toml")?;
    assert!(config.contains("source_root"));
    assert!(config.contains("[rules.elements]"));
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lorepot.toml", "source_root = \"data\"\n")?;

    let output = test.command().arg("init").output()?;
    assert!(!output.status.success());
    assert_eq!(test.read_file("lorepot.toml")?, "source_root = \"data\"\n");
    Ok(())
}

#[test]
fn test_help_lists_pipeline_commands() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    for command in ["extract", "generate", "inject", "init"] {
        assert!(stdout.contains(command), "{stdout}");
    }
    Ok(())
}
