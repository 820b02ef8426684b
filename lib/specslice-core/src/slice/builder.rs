//! Assembly of the minimal per-endpoint document.

use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::debug;

use super::closure::closure;
use super::reference::ComponentRef;
use crate::document::Document;
use crate::error::SliceError;

/// Extracts a minimal, self-contained document for one endpoint.
///
/// The slice carries the source's global metadata (`openapi`, `info`, and
/// `servers` when present), a `paths` section holding exactly the target
/// path and method, and a `components` section holding exactly the
/// definitions transitively reachable from that operation, grouped by
/// category in source order. Every value is a deep copy; mutating the slice
/// never affects the source document.
///
/// # Example
///
/// ```rust,ignore
/// use specslice_core::extract_slice;
///
/// let slice = extract_slice(&document, "/users/{id}", "get")?;
/// println!("{}", serde_json::to_string_pretty(slice.as_value())?);
/// ```
///
/// # Errors
///
/// Returns [`SliceError::EndpointNotFound`] when the (path, method) pair is
/// absent, and propagates [`SliceError::ReferenceNotFound`] /
/// [`SliceError::UnsupportedPointerFormat`] from the closure computation; no
/// partial slice is ever produced.
pub fn extract_slice(document: &Document, path: &str, method: &str) -> Result<Document, SliceError> {
    let method = method.to_ascii_lowercase();
    let operation = document.operation(path, &method)?;
    let references = closure(document, operation)?;
    debug!(path, %method, components = references.len(), "extracted endpoint slice");
    build(document, path, &method, operation, &references)
}

fn build(
    document: &Document,
    path: &str,
    method: &str,
    operation: &Value,
    references: &IndexSet<ComponentRef>,
) -> Result<Document, SliceError> {
    let source = document.as_value();
    let mut root = Map::new();

    root.insert(
        "openapi".to_string(),
        source
            .get("openapi")
            .cloned()
            .unwrap_or_else(|| Value::String("3.0.0".to_string())),
    );
    root.insert(
        "info".to_string(),
        source
            .get("info")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
    );
    if let Some(servers) = source.get("servers") {
        root.insert("servers".to_string(), servers.clone());
    }

    let mut item = Map::new();
    item.insert(method.to_string(), operation.clone());
    let mut paths = Map::new();
    paths.insert(path.to_string(), Value::Object(item));
    root.insert("paths".to_string(), Value::Object(paths));

    let components = copy_components(document, references);
    if !components.is_empty() {
        root.insert("components".to_string(), Value::Object(components));
    }

    Document::try_new(Value::Object(root))
}

/// Copies the referenced definitions, grouped by category.
///
/// Iterates the source's `components` section rather than the closure set,
/// so category and definition order match the source document and repeated
/// slices are byte-for-byte identical.
fn copy_components(
    document: &Document,
    references: &IndexSet<ComponentRef>,
) -> Map<String, Value> {
    let mut components = Map::new();
    let Some(source_components) = document.components() else {
        return components;
    };

    for (category, definitions) in source_components {
        let Some(definitions) = definitions.as_object() else {
            continue;
        };
        let mut kept = Map::new();
        for (name, definition) in definitions {
            if references.contains(&ComponentRef::new(category.clone(), name.clone())) {
                kept.insert(name.clone(), definition.clone());
            }
        }
        if !kept.is_empty() {
            components.insert(category.clone(), Value::Object(kept));
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_test_document() -> Document {
        Document::try_new(json!({
            "openapi": "3.1.0",
            "info": {"title": "Pet Store", "version": "2.0.0"},
            "servers": [{"url": "https://api.example.com"}],
            "tags": [{"name": "pets"}],
            "paths": {
                "/pets": {
                    "get": {
                        "summary": "List pets",
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {"$ref": "#/components/schemas/Pet"}
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a pet",
                        "responses": {"201": {"description": "created"}}
                    }
                },
                "/owners": {
                    "get": {
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Owner"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Category": {"type": "string"},
                    "Pet": {
                        "type": "object",
                        "properties": {
                            "category": {"$ref": "#/components/schemas/Category"}
                        }
                    },
                    "Owner": {
                        "type": "object",
                        "properties": {
                            "pets": {
                                "type": "array",
                                "items": {"$ref": "#/components/schemas/Pet"}
                            }
                        }
                    }
                },
                "securitySchemes": {
                    "ApiKey": {"type": "apiKey", "name": "X-Api-Key", "in": "header"}
                }
            }
        }))
        .expect("test document should be loadable")
    }

    #[test]
    fn should_keep_only_target_endpoint() {
        let document = create_test_document();

        let slice = extract_slice(&document, "/pets", "GET").expect("slice should build");

        let paths = slice
            .as_value()
            .get("paths")
            .and_then(Value::as_object)
            .expect("slice should have paths");
        assert_eq!(paths.len(), 1);
        let item = paths
            .get("/pets")
            .and_then(Value::as_object)
            .expect("target path should be present");
        assert_eq!(item.keys().collect::<Vec<_>>(), vec!["get"]);
    }

    #[test]
    fn should_copy_metadata_and_keep_reachable_components_in_source_order() {
        let document = create_test_document();

        let slice = extract_slice(&document, "/owners", "get").expect("slice should build");
        let root = slice.as_value();

        assert_eq!(root.get("openapi"), Some(&json!("3.1.0")));
        assert_eq!(
            root.get("info"),
            Some(&json!({"title": "Pet Store", "version": "2.0.0"}))
        );
        assert_eq!(
            root.get("servers"),
            Some(&json!([{"url": "https://api.example.com"}]))
        );
        // Not part of the copied metadata.
        assert_eq!(root.get("tags"), None);

        let schemas = root
            .pointer("/components/schemas")
            .and_then(Value::as_object)
            .expect("slice should keep schemas");
        // Source order, not discovery order (discovery sees Owner first).
        assert_eq!(
            schemas.keys().collect::<Vec<_>>(),
            vec!["Category", "Pet", "Owner"]
        );
    }

    #[test]
    fn should_exclude_unreachable_component_categories() {
        let document = create_test_document();

        let slice = extract_slice(&document, "/pets", "get").expect("slice should build");

        let components = slice
            .as_value()
            .get("components")
            .and_then(Value::as_object)
            .expect("slice should have components");
        assert!(!components.contains_key("securitySchemes"));
        let schemas = components
            .get("schemas")
            .and_then(Value::as_object)
            .expect("slice should keep schemas");
        assert!(!schemas.contains_key("Owner"));
    }

    #[test]
    fn should_omit_components_for_reference_free_operation() {
        let document = create_test_document();

        let slice = extract_slice(&document, "/pets", "post").expect("slice should build");

        assert_eq!(slice.as_value().get("components"), None);
    }

    #[test]
    fn should_default_openapi_version_and_info() {
        let document = Document::try_new(json!({
            "paths": {"/ping": {"get": {"responses": {"200": {"description": "pong"}}}}}
        }))
        .expect("test document should be loadable");

        let slice = extract_slice(&document, "/ping", "get").expect("slice should build");
        let root = slice.as_value();

        assert_eq!(root.get("openapi"), Some(&json!("3.0.0")));
        assert_eq!(root.get("info"), Some(&json!({})));
        assert_eq!(root.get("servers"), None);
    }

    #[test]
    fn should_be_idempotent() {
        let document = create_test_document();

        let first = extract_slice(&document, "/owners", "get").expect("slice should build");
        let second = extract_slice(&document, "/owners", "get").expect("slice should build");

        assert_eq!(first, second);
    }

    #[test]
    fn should_deep_copy_instead_of_sharing() {
        let document = create_test_document();
        let original = document.clone();

        let slice = extract_slice(&document, "/pets", "get").expect("slice should build");
        let mut mutated = slice.into_value();
        if let Some(info) = mutated.pointer_mut("/info") {
            *info = json!({"title": "Mutated"});
        }

        assert_eq!(document, original);
        assert_eq!(document.title(), Some("Pet Store"));
    }

    #[test]
    fn should_surface_endpoint_not_found() {
        let document = create_test_document();

        let error = extract_slice(&document, "/missing", "get").expect_err("path is absent");

        assert!(matches!(error, SliceError::EndpointNotFound { .. }));
    }

    #[test]
    fn should_not_emit_partial_slice_on_dangling_reference() {
        let document = Document::try_new(json!({
            "paths": {
                "/broken": {"get": {"responses": {"200": {
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Ghost"}}}
                }}}}
            }
        }))
        .expect("test document should be loadable");

        let error = extract_slice(&document, "/broken", "get").expect_err("reference is dangling");

        assert!(matches!(error, SliceError::ReferenceNotFound { .. }));
    }

    #[test]
    fn should_produce_slice_whose_own_closure_matches_its_components() {
        let document = create_test_document();

        let slice = extract_slice(&document, "/owners", "get").expect("slice should build");
        let operation = slice
            .operation("/owners", "get")
            .expect("slice should keep the operation");
        let recomputed = closure(&slice, operation).expect("slice should resolve within itself");

        let kept: Vec<ComponentRef> = slice
            .as_value()
            .get("components")
            .and_then(Value::as_object)
            .map(|components| {
                components
                    .iter()
                    .flat_map(|(category, definitions)| {
                        definitions
                            .as_object()
                            .into_iter()
                            .flat_map(|names| names.keys())
                            .map(|name| ComponentRef::new(category.clone(), name.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Minimality and completeness in one check: the slice contains a
        // component iff it is reachable from the slice's own operation.
        assert_eq!(
            kept.iter().collect::<std::collections::HashSet<_>>(),
            recomputed.iter().collect::<std::collections::HashSet<_>>()
        );
    }
}
