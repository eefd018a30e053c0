//! Command dispatch.
//!
//! Each command loads the configuration, applies command-line overrides,
//! runs its pipeline stage, and prints a summary. Configuration warnings are
//! printed as warnings by default and abort the run under `--strict`.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use super::args::{
    Arguments, Command, CommonArgs, ExtractCommand, GenerateCommand, InjectCommand,
};
use super::exit_status::ExitStatus;
use super::report;
use crate::config::{CONFIG_FILE_NAME, Config, default_config_toml};
use crate::document::Document;
use crate::{catalog, extract, inject};

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };
    match args.command.expect("command presence checked above") {
        Command::Extract(cmd) => run_extract(cmd)?,
        Command::Generate(cmd) => run_generate(cmd)?,
        Command::Inject(cmd) => run_inject(cmd)?,
        Command::Init => run_init()?,
    }
    Ok(ExitStatus::Success.into())
}

fn load_config(common: &CommonArgs) -> Result<Config> {
    let mut config = Config::load(&common.config)
        .with_context(|| format!("failed to load {}", common.config.display()))?;
    if common.strict {
        config.strict = true;
    }
    Ok(config)
}

fn enforce_strict(config: &Config, warnings: &[String]) -> Result<()> {
    if config.strict && !warnings.is_empty() {
        bail!(
            "strict mode: {} configuration warning(s), first: {}",
            warnings.len(),
            warnings[0]
        );
    }
    Ok(())
}

fn run_extract(cmd: ExtractCommand) -> Result<()> {
    let mut config = load_config(&cmd.common)?;
    if let Some(source_root) = cmd.source_root {
        config.source_root = source_root;
    }
    if let Some(output) = cmd.output {
        config.document = output;
    }

    let outcome = extract::extract(&config.source_root, &config)?;
    outcome.document.write(&config.document)?;
    report::print_extract(&outcome, &config.document, cmd.common.verbose);
    Ok(())
}

fn run_generate(cmd: GenerateCommand) -> Result<()> {
    let mut config = load_config(&cmd.common)?;
    if let Some(document) = cmd.document {
        config.document = document;
    }
    if let Some(output) = cmd.output {
        config.catalog = output;
    }

    let document = Document::read(&config.document)?;
    let outcome = catalog::generate(&document, &config)?;
    enforce_strict(&config, &outcome.warnings)?;
    let written = catalog::write_pot(&outcome.entries, &config, &config.catalog)?;
    report::print_generate(&outcome, written, &config.catalog);
    Ok(())
}

fn run_inject(cmd: InjectCommand) -> Result<()> {
    let mut config = load_config(&cmd.common)?;
    if let Some(document) = cmd.document {
        config.document = document;
    }
    if let Some(compiled) = cmd.compiled {
        config.compiled = compiled;
    }
    if let Some(output) = cmd.output {
        config.output = output;
    }
    if let Some(culture_output) = cmd.culture_output {
        config.culture_output = culture_output;
    }

    let catalog = inject::load_catalog(&config.compiled)?;
    let document = Document::read(&config.document)?;
    let outcome = inject::inject(&catalog, &document, &config)?;
    enforce_strict(&config, &outcome.warnings)?;
    inject::write_outputs(&outcome, &config)?;
    report::print_inject(&outcome, &config.output, &config.culture_output);
    Ok(())
}

fn run_init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }
    fs::write(config_path, default_config_toml())
        .with_context(|| format!("failed to write {}", CONFIG_FILE_NAME))?;
    report::print_init(config_path);
    Ok(())
}
