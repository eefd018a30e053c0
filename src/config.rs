use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

pub const CONFIG_FILE_NAME: &str = "lorepot.toml";

/// Pipeline configuration, read once at startup from a TOML file.
///
/// Paths are interpreted relative to the current working directory; any of
/// them can be overridden per invocation from the command line.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the game's content tree.
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,
    /// Consolidated document artifact (extract output, generate/inject input).
    #[serde(default = "default_document")]
    pub document: PathBuf,
    /// Candidate catalog artifact (generate output).
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
    /// Compiled catalog (inject input); `.mo`, or `.po` for uncompiled.
    #[serde(default = "default_compiled")]
    pub compiled: PathBuf,
    /// Combined translated output for all ordinary types.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Dedicated translated output for the culture record.
    #[serde(default = "default_culture_output")]
    pub culture_output: PathBuf,

    /// Project-Id-Version header written into the candidate catalog.
    #[serde(default = "default_project_id_version")]
    pub project_id_version: String,
    /// Target language code written into the candidate catalog header.
    #[serde(default = "default_language")]
    pub language: String,
    /// Treat configuration warnings (unknown type, non-string match) as fatal.
    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub culture: CultureConfig,
    /// Per-type catalog rules, keyed by content type.
    #[serde(default)]
    pub rules: BTreeMap<String, Rule>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Directory or file names excluded from discovery, matched per path
    /// component (vendor folders, editor test content).
    #[serde(default)]
    pub excludes: Vec<String>,
    /// Reserved marker folder holding default content; skipped when deriving
    /// a type from a file's containing folder.
    #[serde(default = "default_marker")]
    pub default_marker: String,
    /// The one locale subtree under the culture folder that is real source
    /// content; sibling locales are existing overrides, not content.
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            excludes: Vec::new(),
            default_marker: default_marker(),
            source_locale: default_source_locale(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CultureConfig {
    /// Name of the distinguished culture/locale content type.
    #[serde(rename = "type", default = "default_culture_type")]
    pub type_name: String,
    /// Field values forced onto the translated culture record before it is
    /// written (locale id, endonym, font script and the like).
    #[serde(default)]
    pub overrides: BTreeMap<String, serde_json::Value>,
}

impl Default for CultureConfig {
    fn default() -> Self {
        Self {
            type_name: default_culture_type(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Catalog rule for one content type.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    /// Regexes over each item's JSON Pointer paths selecting the translatable
    /// string leaves, e.g. `"^/label$"` or `"/description$"`.
    pub patterns: Vec<String>,
}

fn default_source_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_document() -> PathBuf {
    PathBuf::from("build/content.json")
}

fn default_catalog() -> PathBuf {
    PathBuf::from("build/messages.pot")
}

fn default_compiled() -> PathBuf {
    PathBuf::from("build/messages.mo")
}

fn default_output() -> PathBuf {
    PathBuf::from("build/loc/content.json")
}

fn default_culture_output() -> PathBuf {
    PathBuf::from("build/loc/culture.json")
}

fn default_project_id_version() -> String {
    "lorepot 0.1".to_string()
}

fn default_language() -> String {
    String::new()
}

fn default_marker() -> String {
    "core".to_string()
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_culture_type() -> String {
    "cultures".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            document: default_document(),
            catalog: default_catalog(),
            compiled: default_compiled(),
            output: default_output(),
            culture_output: default_culture_output(),
            project_id_version: default_project_id_version(),
            language: default_language(),
            strict: false,
            extract: ExtractConfig::default(),
            culture: CultureConfig::default(),
            rules: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        toml::from_str(&content)
            .map_err(|e| PipelineError::Config(format!("{}: {e}", path.display())))
    }

    /// True when `type_name` is the distinguished culture type.
    pub fn is_culture_type(&self, type_name: &str) -> bool {
        type_name == self.culture.type_name
    }
}

pub fn default_config_toml() -> String {
    let mut config = Config::default();
    config.rules.insert(
        "elements".to_string(),
        Rule {
            patterns: vec!["^/label$".to_string(), "^/description$".to_string()],
        },
    );
    config.rules.insert(
        default_culture_type(),
        Rule {
            patterns: vec!["/label$".to_string(), "/name$".to_string()],
        },
    );
    toml::to_string_pretty(&config).unwrap_or_default()
}
