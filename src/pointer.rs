//! RFC 6901 JSON Pointers.
//!
//! Pointers address string leaves inside content items: they become gettext
//! `msgctxt` values for culture entries and `#:` provenance references for
//! everything else, so escaping must round-trip exactly.

use std::fmt;

use serde_json::Value;

/// A parsed JSON Pointer, stored as unescaped reference tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    parts: Vec<String>,
}

impl Pointer {
    /// The root pointer (empty string, zero tokens).
    pub fn root() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse an escaped pointer string such as `/cultures/en/seasons/0/name`.
    pub fn parse(pointer: &str) -> Result<Self, PointerParseError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        if !pointer.starts_with('/') {
            return Err(PointerParseError::MissingSlash(pointer.to_string()));
        }
        let mut parts = Vec::new();
        for token in pointer[1..].split('/') {
            parts.push(unescape(token)?);
        }
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    /// New pointer with one more token appended.
    pub fn child(&self, token: impl Into<String>) -> Self {
        let mut parts = self.parts.clone();
        parts.push(token.into());
        Self { parts }
    }

    /// New pointer with all of `other`'s tokens appended.
    pub fn join(&self, other: &Pointer) -> Self {
        let mut parts = self.parts.clone();
        parts.extend(other.parts.iter().cloned());
        Self { parts }
    }

    /// Resolve against a value, returning the addressed node if it exists.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        for part in &self.parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Assign into an existing location inside `value`.
    ///
    /// Only replaces nodes that already exist; this is all reinjection needs,
    /// since every pointer it writes was produced by walking the same value.
    pub fn assign(&self, value: &mut Value, new: Value) -> bool {
        let Some((last, prefix)) = self.parts.split_last() else {
            *value = new;
            return true;
        };
        let mut current = value;
        for part in prefix {
            current = match current {
                Value::Object(map) => match map.get_mut(part) {
                    Some(v) => v,
                    None => return false,
                },
                Value::Array(items) => {
                    let Some(idx) = part.parse::<usize>().ok() else {
                        return false;
                    };
                    match items.get_mut(idx) {
                        Some(v) => v,
                        None => return false,
                    }
                }
                _ => return false,
            };
        }
        match current {
            Value::Object(map) => {
                if !map.contains_key(last) {
                    return false;
                }
                map.insert(last.clone(), new);
                true
            }
            Value::Array(items) => {
                let Some(idx) = last.parse::<usize>().ok() else {
                    return false;
                };
                match items.get_mut(idx) {
                    Some(slot) => {
                        *slot = new;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "/{}", escape(part))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointerParseError {
    #[error("pointer must start with '/': {0:?}")]
    MissingSlash(String),
    #[error("invalid escape sequence in pointer token: {0:?}")]
    InvalidEscape(String),
}

fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape(token: &str) -> Result<String, PointerParseError> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(PointerParseError::InvalidEscape(token.to_string())),
        }
    }
    Ok(out)
}
