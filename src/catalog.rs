//! Catalog generation: consolidated document -> candidate gettext catalog.
//!
//! Walks the document according to the per-type rules, producing one entry
//! for every matched, non-blank string leaf. Order is fully determined by the
//! document (type order, then id order, then walk order within an item), so
//! repeated runs over the same inputs diff cleanly.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use polib::catalog::Catalog;
use polib::message::{Message, MessageMutView};
use polib::metadata::CatalogMetadata;
use polib::po_file;
use regex::Regex;

use crate::config::Config;
use crate::document::{Document, ItemKind};
use crate::error::PipelineError;
use crate::pointer::Pointer;
use crate::walk;

/// One translatable string unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Source text, verbatim from the document.
    pub text: String,
    /// Structural pointer used as msgctxt; populated only for culture
    /// entries, whose short strings collide without it.
    pub context: Option<String>,
    /// Full structural pointer, always recorded as a `#:` reference.
    pub reference: String,
}

#[derive(Debug, Default)]
pub struct GenerateOutcome {
    /// The full candidate list, undeduplicated, in document order.
    pub entries: Vec<CatalogEntry>,
    /// Non-fatal configuration complaints (fatal under strict mode).
    pub warnings: Vec<String>,
    pub types_processed: usize,
}

/// Compile every rule's patterns up front. An invalid regex makes the whole
/// configuration unusable, strict mode or not.
pub fn compile_rules(config: &Config) -> Result<BTreeMap<String, Vec<Regex>>, PipelineError> {
    let mut compiled = BTreeMap::new();
    for (type_name, rule) in &config.rules {
        let mut regexes = Vec::with_capacity(rule.patterns.len());
        for pattern in &rule.patterns {
            let regex = Regex::new(pattern).map_err(|e| {
                PipelineError::Config(format!(
                    "invalid pattern {pattern:?} for type {type_name:?}: {e}"
                ))
            })?;
            regexes.push(regex);
        }
        compiled.insert(type_name.clone(), regexes);
    }
    Ok(compiled)
}

/// Produce the candidate entry list for `document`.
pub fn generate(document: &Document, config: &Config) -> Result<GenerateOutcome, PipelineError> {
    let rules = compile_rules(config)?;
    let mut outcome = GenerateOutcome::default();

    for type_name in rules.keys() {
        if !document.contains_type(type_name) {
            outcome
                .warnings
                .push(format!("rule type {type_name:?} not present in document"));
        }
    }

    for (type_name, items) in document.types() {
        let Some(patterns) = rules.get(type_name) else {
            continue;
        };
        outcome.types_processed += 1;
        let kind = if config.is_culture_type(type_name) {
            ItemKind::Culture
        } else {
            ItemKind::Ordinary
        };
        for (id, item) in items {
            for leaf in walk::leaves(item) {
                let path = leaf.pointer.to_string();
                if !patterns.iter().any(|re| re.is_match(&path)) {
                    continue;
                }
                let full = Pointer::from_parts([type_name.as_str(), id.as_str()])
                    .join(&leaf.pointer)
                    .to_string();
                let Some(text) = leaf.as_str() else {
                    outcome
                        .warnings
                        .push(format!("matched non-string value at {full}"));
                    continue;
                };
                if text.trim().is_empty() {
                    continue;
                }
                outcome.entries.push(CatalogEntry {
                    text: text.to_string(),
                    context: kind.requires_context().then(|| full.clone()),
                    reference: full,
                });
            }
        }
    }

    Ok(outcome)
}

/// Write the candidate list as a POT artifact.
///
/// Entries with the same (context, text) collapse into one message with
/// merged references. The header carries no timestamp so that regenerating
/// from an unchanged document produces an identical file.
pub fn write_pot(
    entries: &[CatalogEntry],
    config: &Config,
    path: &Path,
) -> Result<usize, PipelineError> {
    // Order-preserving dedup keyed by (context, text).
    let mut order: Vec<(Option<String>, String)> = Vec::new();
    let mut references: BTreeMap<(Option<String>, String), Vec<String>> = BTreeMap::new();
    for entry in entries {
        let key = (entry.context.clone(), entry.text.clone());
        let refs = references.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        if !refs.contains(&entry.reference) {
            refs.push(entry.reference.clone());
        }
    }

    let mut metadata = CatalogMetadata::new();
    metadata.project_id_version = config.project_id_version.clone();
    metadata.language = config.language.clone();
    metadata.mime_version = "1.0".to_string();
    metadata.content_type = "text/plain; charset=UTF-8".to_string();
    metadata.content_transfer_encoding = "8bit".to_string();
    let mut catalog = Catalog::new(metadata);

    let written = order.len();
    let mut sources = Vec::with_capacity(written);
    for key in order {
        sources.push(references.remove(&key).unwrap_or_default().join(" "));
        let (context, text) = key;
        // The builder methods hand back &mut Self, so the builder needs its
        // own binding before any of them run.
        let mut builder = Message::build_singular();
        builder.with_msgid(text).with_msgstr(String::new());
        if let Some(context) = context {
            builder.with_msgctxt(context);
        }
        catalog.append_or_update(builder.done());
    }
    for (mut message, source) in catalog.messages_mut().zip(sources) {
        *message.source_mut() = source;
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    po_file::write(&catalog, path).map_err(|e| PipelineError::io(path, e))?;
    Ok(written)
}
