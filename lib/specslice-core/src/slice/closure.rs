//! Transitive reference closure over an operation subtree.

use indexmap::IndexSet;
use serde_json::Value;

use super::reference::{ComponentRef, REF_KEY};
use crate::document::Document;
use crate::error::SliceError;

/// Computes the set of component keys transitively reachable from a subtree.
///
/// Depth-first traversal over the tree; every mapping carrying a `$ref`
/// entry with a pointer-string value is a reference marker. A discovered key
/// is inserted into the set before its target is traversed, so cyclic
/// reference graphs (self-references included) terminate with each
/// definition entered at most once. The returned set keeps discovery order.
///
/// # Errors
///
/// Returns [`SliceError::UnsupportedPointerFormat`] for pointers outside the
/// `#/components/<category>/<name>` convention and
/// [`SliceError::ReferenceNotFound`] for pointers that do not resolve; both
/// abort the whole computation, since a closure with a hole in it would
/// produce a slice with dangling references.
pub fn closure(
    document: &Document,
    operation: &Value,
) -> Result<IndexSet<ComponentRef>, SliceError> {
    let mut visited = IndexSet::new();
    collect_references(document, operation, &mut visited)?;
    Ok(visited)
}

fn collect_references(
    document: &Document,
    value: &Value,
    visited: &mut IndexSet<ComponentRef>,
) -> Result<(), SliceError> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(pointer)) = map.get(REF_KEY) {
                let reference = ComponentRef::parse(pointer)?;
                if visited.insert(reference.clone()) {
                    let target = document.resolve(&reference)?;
                    collect_references(document, target, visited)?;
                }
            }
            for entry in map.values() {
                collect_references(document, entry, visited)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_references(document, item, visited)?;
            }
        }
        _ => {}
    }
    Ok(())
}
