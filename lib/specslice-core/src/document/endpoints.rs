//! Flat endpoint enumeration for discovery listing.

use serde_json::Value;

use super::{Document, HTTP_METHODS};

/// One `(path, method)` pair present in a document, with its summary line.
///
/// Produced by a single pass over the `paths` section; no reference
/// traversal is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// The API path, e.g. `/users/{id}`.
    pub path: String,
    /// The HTTP method, uppercased for display.
    pub method: String,
    /// The operation's `summary`, falling back to its `description`, else
    /// empty.
    pub summary: String,
    /// The operation's `operationId`, when present.
    pub operation_id: Option<String>,
}

impl Document {
    /// Lists every endpoint in the document, in source order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Endpoint> {
        let Some(paths) = self.paths() else {
            return Vec::new();
        };

        let mut endpoints = Vec::new();
        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                continue;
            };
            for (method, operation) in item {
                if !HTTP_METHODS.contains(&method.as_str()) {
                    continue;
                }
                let summary = operation
                    .get("summary")
                    .or_else(|| operation.get("description"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let operation_id = operation
                    .get("operationId")
                    .and_then(Value::as_str)
                    .map(ToString::to_string);
                endpoints.push(Endpoint {
                    path: path.clone(),
                    method: method.to_ascii_uppercase(),
                    summary,
                    operation_id,
                });
            }
        }
        endpoints
    }
}
