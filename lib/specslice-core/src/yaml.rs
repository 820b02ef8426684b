//! YAML serialization support.
//!
//! This module provides YAML rendering for documents and slices. JSON
//! rendering goes straight through [`serde_json`]; YAML gets a small
//! extension trait so call sites read the same either way.
//!
//! # Example
//!
//! ```rust,ignore
//! use specslice_core::{ToYaml, extract_slice};
//!
//! let slice = extract_slice(&document, "/users/{id}", "get")?;
//! std::fs::write("slice.yaml", slice.to_yaml()?)?;
//! ```

use serde::Serialize;

/// Error type for YAML serialization operations.
pub type YamlError = serde_yaml::Error;

/// Extension trait for serializing types to YAML.
///
/// This trait is implemented for all types that implement [`Serialize`].
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_yaml::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}
