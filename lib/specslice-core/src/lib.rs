//! # Specslice Core
//!
//! Slice a single endpoint out of a large OpenAPI specification, together
//! with every schema, parameter, response, and other component it
//! transitively depends on.
//!
//! Large specifications routinely exceed what tooling and LLM-facing
//! contexts can usefully load. This crate computes, for one `(path, method)`
//! pair, the transitive closure of all internal `$ref` pointers reachable
//! from that operation and emits a minimal, self-contained document
//! containing only that closure.
//!
//! ## Quick Start
//!
//! ```rust
//! use specslice_core::{Document, ToYaml, extract_slice};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = Document::from_json_str(r##"{
//!     "openapi": "3.0.0",
//!     "info": {"title": "Pet Store", "version": "1.0.0"},
//!     "paths": {
//!         "/pets": {
//!             "get": {
//!                 "responses": {"200": {
//!                     "content": {"application/json": {
//!                         "schema": {"$ref": "#/components/schemas/Pet"}
//!                     }}
//!                 }}
//!             }
//!         }
//!     },
//!     "components": {
//!         "schemas": {
//!             "Pet": {"type": "object"},
//!             "Unrelated": {"type": "string"}
//!         }
//!     }
//! }"##)?;
//!
//! let slice = extract_slice(&document, "/pets", "get")?;
//!
//! // The slice keeps Pet and drops Unrelated.
//! assert!(slice.as_value().pointer("/components/schemas/Pet").is_some());
//! assert!(slice.as_value().pointer("/components/schemas/Unrelated").is_none());
//!
//! let yaml = slice.to_yaml()?;
//! # let _ = yaml;
//! # Ok(())
//! # }
//! ```
//!
//! ## Loading documents
//!
//! [`load_path`] reads a `.yaml`/`.yml`/`.json` file;
//! [`load_url`] fetches over HTTP(S) with a caller-specified timeout.
//! Both validate that the payload is a loadable document (a mapping with a
//! `paths` section) before handing it back, so a failed load never produces
//! a half-usable [`Document`].
//!
//! ## Error handling
//!
//! Every operation returns [`SliceError`]. Failures are never swallowed or
//! patched over: a dangling `$ref` aborts the slice rather than producing a
//! document with a hole in it.

pub mod document;
mod error;
pub mod slice;
mod yaml;

pub use document::{Document, Endpoint, SpecFormat, load_path, load_url};
pub use error::SliceError;
pub use slice::{ComponentRef, closure, extract_slice};
pub use yaml::{ToYaml, YamlError};
