//! Depth-first traversal of JSON values.
//!
//! Yields every leaf (string, number, bool, null) together with its pointer,
//! in document order. Both catalog generation and reinjection walk items
//! through this, so the two stages always see leaves in the same order.

use serde_json::Value;

use crate::pointer::Pointer;

/// One leaf reached during a walk.
#[derive(Debug, Clone)]
pub struct Leaf<'a> {
    pub pointer: Pointer,
    pub value: &'a Value,
}

impl Leaf<'_> {
    /// The leaf's string content, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Collect all leaves under `value` in document order.
pub fn leaves(value: &Value) -> Vec<Leaf<'_>> {
    let mut out = Vec::new();
    collect(value, Pointer::root(), &mut out);
    out
}

fn collect<'a>(value: &'a Value, pointer: Pointer, out: &mut Vec<Leaf<'a>>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                collect(child, pointer.child(key.clone()), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect(child, pointer.child(index.to_string()), out);
            }
        }
        _ => out.push(Leaf { pointer, value }),
    }
}
