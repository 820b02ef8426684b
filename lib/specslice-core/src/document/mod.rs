//! In-memory OpenAPI document model.
//!
//! A [`Document`] wraps the parsed specification tree and offers the
//! pointer-style addressing the slicing engine is built on: operation lookup
//! by `(path, method)`, component resolution by reference, and the flat
//! endpoint listing used for discovery.
//!
//! The tree itself is a [`serde_json::Value`] with order-preserving mappings,
//! so documents render back out with their source key order intact whether
//! they arrived as YAML or JSON.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::SliceError;
use crate::slice::ComponentRef;

mod endpoints;
mod loader;

pub use endpoints::Endpoint;
pub use loader::{SpecFormat, load_path, load_url};

/// The HTTP methods that identify operations under a path item.
///
/// Any other key at the path level (`parameters`, `summary`, `description`,
/// vendor extensions) is not an endpoint.
pub(crate) const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// A loaded OpenAPI document.
///
/// Construction validates loadability: the root must be a mapping and must
/// contain a `paths` mapping. Nothing else about the specification is
/// validated; this tool subsets documents, it does not lint them.
///
/// # Example
///
/// ```rust
/// use specslice_core::Document;
///
/// let document = Document::from_json_str(r#"{
///     "openapi": "3.0.0",
///     "info": {"title": "Demo", "version": "1.0.0"},
///     "paths": {"/ping": {"get": {"summary": "Ping"}}}
/// }"#)?;
///
/// assert_eq!(document.title(), Some("Demo"));
/// assert_eq!(document.path_count(), 1);
/// # Ok::<(), specslice_core::SliceError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Wraps an already parsed tree, validating that it is loadable.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::InvalidDocument`] when the root is not a mapping
    /// or the `paths` section is missing or not a mapping.
    pub fn try_new(root: Value) -> Result<Self, SliceError> {
        let Some(map) = root.as_object() else {
            return Err(SliceError::InvalidDocument {
                reason: "document root is not a mapping".to_string(),
            });
        };
        match map.get("paths") {
            Some(Value::Object(_)) => Ok(Self { root }),
            Some(_) => Err(SliceError::InvalidDocument {
                reason: "'paths' is not a mapping".to_string(),
            }),
            None => Err(SliceError::InvalidDocument {
                reason: "missing 'paths' section".to_string(),
            }),
        }
    }

    /// Parses a JSON payload into a document.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::Json`] on malformed JSON and
    /// [`SliceError::InvalidDocument`] when the payload is not loadable.
    pub fn from_json_str(text: &str) -> Result<Self, SliceError> {
        let root: Value = serde_json::from_str(text)?;
        Self::try_new(root)
    }

    /// Parses a YAML payload into a document.
    ///
    /// Scalar mapping keys that are not strings (unquoted status codes like
    /// `200:` are common) are stringified; sequence or mapping keys are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::Yaml`] on malformed YAML and
    /// [`SliceError::InvalidDocument`] when the payload is not loadable.
    pub fn from_yaml_str(text: &str) -> Result<Self, SliceError> {
        let parsed: serde_yaml::Value = serde_yaml::from_str(text)?;
        Self::try_new(loader::yaml_to_json(parsed)?)
    }

    /// Borrows the underlying tree.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Consumes the document, returning the underlying tree.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }

    /// The document title from `info.title`, when present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.root
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
    }

    /// The document version from `info.version`, when present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root
            .get("info")
            .and_then(|info| info.get("version"))
            .and_then(Value::as_str)
    }

    /// Number of path entries in the `paths` section.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths().map_or(0, Map::len)
    }

    pub(crate) fn paths(&self) -> Option<&Map<String, Value>> {
        self.root.get("paths").and_then(Value::as_object)
    }

    pub(crate) fn components(&self) -> Option<&Map<String, Value>> {
        self.root.get("components").and_then(Value::as_object)
    }

    /// Looks up the operation object at `paths[path][method]`.
    ///
    /// The method is matched case-insensitively and must be one of the eight
    /// HTTP methods; path-level keys such as `parameters` are never treated
    /// as operations.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::EndpointNotFound`] carrying the methods that do
    /// exist at the path (empty when the path itself is absent).
    pub fn operation(&self, path: &str, method: &str) -> Result<&Value, SliceError> {
        let method = method.to_ascii_lowercase();
        let item = self
            .paths()
            .and_then(|paths| paths.get(path))
            .and_then(Value::as_object);

        let Some(item) = item else {
            return Err(SliceError::EndpointNotFound {
                path: path.to_string(),
                method,
                available: Vec::new(),
            });
        };

        let available = || -> Vec<String> {
            item.keys()
                .filter(|key| HTTP_METHODS.contains(&key.as_str()))
                .cloned()
                .collect()
        };

        if !HTTP_METHODS.contains(&method.as_str()) {
            return Err(SliceError::EndpointNotFound {
                path: path.to_string(),
                method,
                available: available(),
            });
        }

        item.get(&method).ok_or_else(|| SliceError::EndpointNotFound {
            path: path.to_string(),
            method,
            available: available(),
        })
    }

    /// Resolves a parsed component reference to its definition subtree.
    ///
    /// The subtree is borrowed from the document's own structure; the
    /// resolver never mutates.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::ReferenceNotFound`] when the category or name is
    /// absent.
    pub fn resolve(&self, reference: &ComponentRef) -> Result<&Value, SliceError> {
        self.components()
            .and_then(|components| components.get(reference.category()))
            .and_then(Value::as_object)
            .and_then(|category| category.get(reference.name()))
            .ok_or_else(|| SliceError::ReferenceNotFound {
                pointer: reference.pointer(),
            })
    }

    /// Resolves a raw pointer string, parsing it first.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::UnsupportedPointerFormat`] for pointers outside
    /// the `#/components/<category>/<name>` convention and
    /// [`SliceError::ReferenceNotFound`] when the target is absent.
    pub fn resolve_pointer(&self, pointer: &str) -> Result<&Value, SliceError> {
        let reference = ComponentRef::parse(pointer)?;
        self.resolve(&reference)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_test_document() -> Document {
        Document::try_new(json!({
            "openapi": "3.0.3",
            "info": {"title": "Pet Store", "version": "2.1.0"},
            "paths": {
                "/pets": {
                    "summary": "Pet collection",
                    "get": {"summary": "List pets"},
                    "post": {"summary": "Create a pet"}
                }
            },
            "components": {
                "schemas": {
                    "Pet": {"type": "object"}
                }
            }
        }))
        .expect("test document should be loadable")
    }

    #[test]
    fn should_expose_metadata() {
        let document = create_test_document();

        assert_eq!(document.title(), Some("Pet Store"));
        assert_eq!(document.version(), Some("2.1.0"));
        assert_eq!(document.path_count(), 1);
    }

    #[test]
    fn should_reject_non_mapping_root() {
        let result = Document::try_new(json!(["not", "a", "document"]));

        assert!(matches!(result, Err(SliceError::InvalidDocument { .. })));
    }

    #[test]
    fn should_reject_missing_paths() {
        let result = Document::try_new(json!({"openapi": "3.0.0"}));

        assert!(matches!(result, Err(SliceError::InvalidDocument { .. })));
    }

    #[test]
    fn should_reject_scalar_paths() {
        let result = Document::try_new(json!({"paths": "oops"}));

        assert!(matches!(result, Err(SliceError::InvalidDocument { .. })));
    }

    #[test]
    fn should_look_up_operation_case_insensitively() {
        let document = create_test_document();

        let operation = document
            .operation("/pets", "GET")
            .expect("operation should exist");
        assert_eq!(operation.get("summary"), Some(&json!("List pets")));
    }

    #[test]
    fn should_report_available_methods_for_missing_method() {
        let document = create_test_document();

        let error = document
            .operation("/pets", "delete")
            .expect_err("method should be missing");
        match error {
            SliceError::EndpointNotFound {
                path,
                method,
                available,
            } => {
                assert_eq!(path, "/pets");
                assert_eq!(method, "delete");
                assert_eq!(available, vec!["get".to_string(), "post".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn should_not_treat_path_level_keys_as_operations() {
        let document = create_test_document();

        let error = document
            .operation("/pets", "summary")
            .expect_err("'summary' is not a method");
        assert!(matches!(error, SliceError::EndpointNotFound { .. }));
    }

    #[test]
    fn should_report_missing_path_with_no_methods() {
        let document = create_test_document();

        let error = document
            .operation("/missing", "get")
            .expect_err("path should be missing");
        match error {
            SliceError::EndpointNotFound { available, .. } => assert!(available.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn should_resolve_pointer_to_component() {
        let document = create_test_document();

        let schema = document
            .resolve_pointer("#/components/schemas/Pet")
            .expect("schema should resolve");
        assert_eq!(schema.get("type"), Some(&json!("object")));
    }

    #[test]
    fn should_fail_resolution_for_absent_component() {
        let document = create_test_document();

        let error = document
            .resolve_pointer("#/components/schemas/Ghost")
            .expect_err("schema should be absent");
        match error {
            SliceError::ReferenceNotFound { pointer } => {
                assert_eq!(pointer, "#/components/schemas/Ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
