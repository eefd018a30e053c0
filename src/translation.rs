//! Compiled translation tables.
//!
//! Translators hand catalogs back in two forms: compiled MO files and plain
//! PO text, often with minimal or hand-edited headers. Both load into the
//! same context-aware lookup table, and a catalog that cannot be read
//! surfaces as a `CatalogFormat` error rather than a panic.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::PipelineError;

/// EOT joins msgctxt and msgid, the same convention compiled catalogs use.
const CONTEXT_SEPARATOR: char = '\u{4}';

const MO_MAGIC: u32 = 0x9504_12de;

/// `(msgctxt, msgid) -> msgstr` lookup over a loaded catalog.
#[derive(Debug, Default)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file. `.po` and `.pot` paths parse as PO text;
    /// anything else is read as a compiled MO file.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let bytes = fs::read(path).map_err(|e| PipelineError::io(path, e))?;
        let is_po = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("po") || ext.eq_ignore_ascii_case("pot"));
        let parsed = if is_po {
            String::from_utf8(bytes)
                .map_err(|_| "PO text is not valid UTF-8".to_string())
                .map(|text| Self::from_po(&text))
        } else {
            Self::from_mo(&bytes)
        };
        parsed.map_err(|message| PipelineError::CatalogFormat {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn insert(&mut self, context: Option<&str>, source: &str, translation: &str) {
        self.entries.insert(key(context, source), translation.to_string());
    }

    pub fn get(&self, context: Option<&str>, source: &str) -> Option<&str> {
        self.entries.get(&key(context, source)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse PO text: msgctxt/msgid/msgstr directives with continuation
    /// lines. The header entry (empty msgid) and untranslated entries
    /// contribute nothing; unrecognized lines are ignored so hand-edited
    /// files load leniently. Plural forms never occur in this pipeline's
    /// catalogs and are skipped.
    pub fn from_po(content: &str) -> Self {
        #[derive(Clone, Copy, PartialEq)]
        enum Field {
            Context,
            Id,
            Str,
        }

        let mut table = Self::new();
        let mut context: Option<String> = None;
        let mut msgid = String::new();
        let mut msgstr = String::new();
        let mut field: Option<Field> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() {
                flush_entry(&mut table, &mut context, &mut msgid, &mut msgstr);
                field = None;
                continue;
            }
            if let Some(rest) = line.strip_prefix("msgctxt ") {
                if field == Some(Field::Str) {
                    flush_entry(&mut table, &mut context, &mut msgid, &mut msgstr);
                }
                context = Some(unquote(rest));
                field = Some(Field::Context);
            } else if line.starts_with("msgid_plural") || line.starts_with("msgstr[") {
                field = None;
            } else if let Some(rest) = line.strip_prefix("msgid ") {
                if field == Some(Field::Str) {
                    flush_entry(&mut table, &mut context, &mut msgid, &mut msgstr);
                }
                msgid = unquote(rest);
                field = Some(Field::Id);
            } else if let Some(rest) = line.strip_prefix("msgstr ") {
                msgstr = unquote(rest);
                field = Some(Field::Str);
            } else if line.starts_with('"') {
                let continued = unquote(line);
                match field {
                    Some(Field::Context) => {
                        if let Some(context) = context.as_mut() {
                            context.push_str(&continued);
                        }
                    }
                    Some(Field::Id) => msgid.push_str(&continued),
                    Some(Field::Str) => msgstr.push_str(&continued),
                    None => {}
                }
            }
        }
        flush_entry(&mut table, &mut context, &mut msgid, &mut msgstr);
        table
    }

    /// Parse a compiled MO catalog: magic, entry count, then two parallel
    /// `(length, offset)` tables for originals and translations. Both byte
    /// orders are accepted. The stored original is already in
    /// `ctxt EOT msgid` form, matching this table's key scheme; the header
    /// entry and plural entries (NUL in the original) are skipped.
    pub fn from_mo(bytes: &[u8]) -> Result<Self, String> {
        let magic = read_u32(bytes, 0, true)?;
        let little = if magic == MO_MAGIC {
            true
        } else if magic.swap_bytes() == MO_MAGIC {
            false
        } else {
            return Err(format!("not a compiled catalog (magic {magic:#010x})"));
        };
        let count = read_u32(bytes, 8, little)? as usize;
        let originals = read_u32(bytes, 12, little)? as usize;
        let translations = read_u32(bytes, 16, little)? as usize;

        let mut table = Self::new();
        for i in 0..count {
            let original = read_string(bytes, originals + 8 * i, little)?;
            if original.is_empty() || original.contains('\0') {
                continue;
            }
            let translation = read_string(bytes, translations + 8 * i, little)?;
            table
                .entries
                .insert(original.to_string(), translation.to_string());
        }
        Ok(table)
    }
}

fn key(context: Option<&str>, source: &str) -> String {
    match context {
        Some(context) => format!("{context}{CONTEXT_SEPARATOR}{source}"),
        None => source.to_string(),
    }
}

fn flush_entry(
    table: &mut TranslationTable,
    context: &mut Option<String>,
    msgid: &mut String,
    msgstr: &mut String,
) {
    if !msgid.is_empty() && !msgstr.is_empty() {
        table.insert(context.as_deref(), msgid, msgstr);
    }
    *context = None;
    msgid.clear();
    msgstr.clear();
}

/// Remove surrounding quotes and unescape in a single pass, so `\\n` stays a
/// literal backslash followed by `n` instead of collapsing to a newline.
fn unquote(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn read_u32(bytes: &[u8], offset: usize, little: bool) -> Result<u32, String> {
    let raw: [u8; 4] = offset
        .checked_add(4)
        .and_then(|end| bytes.get(offset..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| format!("truncated catalog at offset {offset}"))?;
    Ok(if little {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    })
}

fn read_string(bytes: &[u8], entry_offset: usize, little: bool) -> Result<&str, String> {
    let len = read_u32(bytes, entry_offset, little)? as usize;
    let start = read_u32(bytes, entry_offset + 4, little)? as usize;
    let slice = start
        .checked_add(len)
        .and_then(|end| bytes.get(start..end))
        .ok_or_else(|| format!("string entry out of bounds at offset {entry_offset}"))?;
    std::str::from_utf8(slice).map_err(|_| "catalog string is not valid UTF-8".to_string())
}
