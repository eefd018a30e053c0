//! Reinjection: compiled catalog + consolidated document -> localized JSON.
//!
//! Substitutes translated strings back into working copies of the items,
//! restores the native list shape, and splits the result into the combined
//! ordinary-type artifact and the dedicated culture artifact. Items that
//! received no translation at all are not emitted.

use std::path::Path;

use serde_json::{Map, Value};

use crate::catalog::compile_rules;
use crate::config::Config;
use crate::document::{Document, ItemKind, write_json};
use crate::error::PipelineError;
use crate::pointer::Pointer;
use crate::translation::TranslationTable;
use crate::walk;

#[derive(Debug, Default)]
pub struct InjectOutcome {
    /// `{ type: [items] }` for all ordinary types, document order.
    pub output: Value,
    /// `{ cultureType: [item] }`, present when the culture record was
    /// translated.
    pub culture_output: Option<Value>,
    pub items_translated: usize,
    pub items_omitted: usize,
    pub substitutions: usize,
    pub warnings: Vec<String>,
}

/// Load the compiled catalog. `.po` files are accepted for convenience when
/// a translator hands back an uncompiled catalog; anything else is read as a
/// compiled MO file.
pub fn load_catalog(path: &Path) -> Result<TranslationTable, PipelineError> {
    TranslationTable::load(path)
}

/// Apply `catalog` to `document` under the configured rules.
pub fn inject(
    catalog: &TranslationTable,
    document: &Document,
    config: &Config,
) -> Result<InjectOutcome, PipelineError> {
    let rules = compile_rules(config)?;
    let mut outcome = InjectOutcome::default();

    for type_name in rules.keys() {
        if !document.contains_type(type_name) {
            outcome
                .warnings
                .push(format!("rule type {type_name:?} not present in document"));
        }
    }

    let mut ordinary = Map::new();
    let mut culture_items: Vec<Value> = Vec::new();

    for (type_name, items) in document.types() {
        let Some(patterns) = rules.get(type_name) else {
            continue;
        };
        let kind = if config.is_culture_type(type_name) {
            ItemKind::Culture
        } else {
            ItemKind::Ordinary
        };
        // Surviving items keep the document's insertion order; original
        // source order is not preserved by the document and is not promised.
        let mut translated: Vec<Value> = Vec::new();
        for (id, item) in items {
            let mut substitutions: Vec<(Pointer, String)> = Vec::new();
            for leaf in walk::leaves(item) {
                let path = leaf.pointer.to_string();
                if !patterns.iter().any(|re| re.is_match(&path)) {
                    continue;
                }
                let Some(text) = leaf.as_str() else {
                    continue;
                };
                if text.trim().is_empty() {
                    continue;
                }
                let full = Pointer::from_parts([type_name.as_str(), id.as_str()])
                    .join(&leaf.pointer)
                    .to_string();
                let context = kind.requires_context().then_some(full.as_str());
                let Some(translation) = catalog.get(context, text) else {
                    continue;
                };
                // Empty means not yet translated; identical means the
                // catalog echoes the source. Neither is a substitution.
                if translation.is_empty() || translation == text {
                    continue;
                }
                substitutions.push((leaf.pointer.clone(), translation.to_string()));
            }

            if substitutions.is_empty() {
                outcome.items_omitted += 1;
                continue;
            }
            let mut copy = item.clone();
            for (pointer, translation) in &substitutions {
                pointer.assign(&mut copy, Value::String(translation.clone()));
            }
            outcome.items_translated += 1;
            outcome.substitutions += substitutions.len();
            match kind {
                ItemKind::Culture => culture_items.push(copy),
                ItemKind::Ordinary => translated.push(copy),
            }
        }
        if kind == ItemKind::Ordinary && !translated.is_empty() {
            ordinary.insert(type_name.clone(), Value::Array(translated));
        }
    }

    outcome.output = Value::Object(ordinary);
    if !culture_items.is_empty() {
        for item in &mut culture_items {
            apply_overrides(item, config);
        }
        let mut wrapper = Map::new();
        wrapper.insert(
            config.culture.type_name.clone(),
            Value::Array(culture_items),
        );
        outcome.culture_output = Some(Value::Object(wrapper));
    }

    Ok(outcome)
}

/// Force configured field values onto the translated culture record (target
/// locale id, endonym and the like).
fn apply_overrides(item: &mut Value, config: &Config) {
    let Value::Object(fields) = item else {
        return;
    };
    for (key, value) in &config.culture.overrides {
        fields.insert(key.clone(), value.clone());
    }
}

/// Write both artifacts. The ordinary output is always written, even when
/// empty, so downstream packaging sees a well-formed file; the culture
/// artifact only exists when the culture record survived.
pub fn write_outputs(outcome: &InjectOutcome, config: &Config) -> Result<(), PipelineError> {
    write_json(&config.output, &outcome.output)?;
    if let Some(culture) = &outcome.culture_output {
        write_json(&config.culture_output, culture)?;
    }
    Ok(())
}
