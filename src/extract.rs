//! Extraction: content tree -> consolidated document.
//!
//! Discovers every JSON file under the source root, decodes and parses each
//! one tolerantly, and merges all discovered items into one document keyed by
//! type and id. Per-file problems are recorded as skips and never abort the
//! run; only a missing source root is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, WINDOWS_1252};
use jsonc_parser::ParseOptions;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::config::Config;
use crate::document::{Document, lower_keys};
use crate::error::PipelineError;

/// Why a discovered file contributed nothing to the document.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: PipelineError,
}

/// Result of one extraction pass. All counters are explicit here rather than
/// ambient state so the pass stays a pure function of the tree it scanned.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    pub document: Document,
    pub files_scanned: usize,
    pub skipped: Vec<SkippedFile>,
    /// Duplicate `(type, id)` occurrences resolved by last-write-wins.
    pub duplicate_ids: usize,
    /// Structural nodes without a usable id, dropped silently.
    pub dropped_no_id: usize,
}

/// Walk `source_root` and build the consolidated document.
///
/// Files are visited in lexicographic order per directory, which makes the
/// last-write-wins resolution of duplicate ids reproducible across runs and
/// platforms.
pub fn extract(source_root: &Path, config: &Config) -> Result<ExtractOutcome, PipelineError> {
    if !source_root.exists() {
        return Err(PipelineError::io(
            source_root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source root does not exist"),
        ));
    }

    let excludes = &config.extract.excludes;
    let mut outcome = ExtractOutcome::default();

    let walker = WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !excludes.iter().any(|ex| ex == name))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(source_root).to_path_buf();
                outcome.skipped.push(SkippedFile {
                    reason: PipelineError::io(&path, err.into()),
                    path,
                });
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_json_extension(entry.path()) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(source_root)
            .unwrap_or(entry.path());
        if is_foreign_culture(rel, config) {
            continue;
        }

        outcome.files_scanned += 1;
        match read_content_file(entry.path()) {
            Ok(value) => merge_file(&mut outcome, value, rel, config),
            Err(reason) => outcome.skipped.push(SkippedFile {
                path: entry.path().to_path_buf(),
                reason,
            }),
        }
    }

    Ok(outcome)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Locale subtrees under the culture folder other than the configured source
/// locale are someone else's finished translations, not source content.
fn is_foreign_culture(rel: &Path, config: &Config) -> bool {
    let components: Vec<&str> = rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    let dirs = &components[..components.len().saturating_sub(1)];
    for (i, dir) in dirs.iter().enumerate() {
        if dir.eq_ignore_ascii_case(&config.culture.type_name) {
            if let Some(locale) = dirs.get(i + 1) {
                return !locale.eq_ignore_ascii_case(&config.extract.source_locale);
            }
        }
    }
    false
}

/// Read one content file: tolerant decode, then lenient JSON parse.
fn read_content_file(path: &Path) -> Result<Value, PipelineError> {
    let bytes = fs::read(path).map_err(|e| PipelineError::io(path, e))?;
    let text = decode(path, &bytes)?;
    let options = ParseOptions {
        allow_loose_object_property_names: true,
        ..Default::default()
    };
    match jsonc_parser::parse_to_serde_value(&text, &options) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(PipelineError::Parse {
            path: path.to_path_buf(),
            message: "file contains no JSON value".to_string(),
        }),
        Err(err) => Err(PipelineError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }),
    }
}

/// Decode file bytes to text. BOMs are authoritative; otherwise UTF-8 is
/// tried first with a Windows-1252 fallback for stray legacy files.
fn decode(path: &Path, bytes: &[u8]) -> Result<String, PipelineError> {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(PipelineError::Encoding {
                path: path.to_path_buf(),
            });
        }
        return Ok(text.into_owned());
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }
    let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    Ok(text.into_owned())
}

/// Merge one parsed file into the document under construction.
///
/// Two shapes are accepted: the native `{ Type: [items] }` form, where the
/// lower-cased top-level keys name the types, and bare item/list files, where
/// the type comes from the containing folder.
fn merge_file(outcome: &mut ExtractOutcome, value: Value, rel: &Path, config: &Config) {
    let value = lower_keys(value);
    match value {
        Value::Object(map) if is_native_shape(&map) => {
            for (type_name, items) in map {
                if let Value::Array(items) = items {
                    for item in items {
                        merge_item(outcome, &type_name, item);
                    }
                }
            }
        }
        Value::Object(_) => {
            if let Some(type_name) = folder_type(rel, config) {
                merge_item(outcome, &type_name, value);
            } else {
                outcome.dropped_no_id += 1;
            }
        }
        Value::Array(items) => {
            if let Some(type_name) = folder_type(rel, config) {
                for item in items {
                    merge_item(outcome, &type_name, item);
                }
            } else {
                outcome.dropped_no_id += items.len();
            }
        }
        _ => outcome.dropped_no_id += 1,
    }
}

/// `{ type: [items] }`: a non-empty object whose values are all arrays of
/// objects. An `id` key marks the object as a bare item instead, even when
/// every one of its other fields happens to hold an array.
fn is_native_shape(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && !map.contains_key("id")
        && map.values().all(|value| match value {
            Value::Array(items) => items.iter().all(Value::is_object),
            _ => false,
        })
}

/// Derive a type from the file's containing folder, skipping the reserved
/// default-content marker. Anything under the culture folder belongs to the
/// culture type regardless of nesting.
fn folder_type(rel: &Path, config: &Config) -> Option<String> {
    let components: Vec<String> = rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(str::to_lowercase)
        .collect();
    let dirs = &components[..components.len().saturating_sub(1)];
    if dirs
        .iter()
        .any(|dir| *dir == config.culture.type_name.to_lowercase())
    {
        return Some(config.culture.type_name.to_lowercase());
    }
    dirs.iter()
        .filter(|dir| **dir != config.extract.default_marker.to_lowercase())
        .next_back()
        .cloned()
}

fn merge_item(outcome: &mut ExtractOutcome, type_name: &str, item: Value) {
    let Value::Object(ref fields) = item else {
        outcome.dropped_no_id += 1;
        return;
    };
    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    match id {
        Some(id) => {
            if outcome.document.insert_item(type_name, &id, item) {
                outcome.duplicate_ids += 1;
            }
        }
        None => outcome.dropped_no_id += 1,
    }
}
