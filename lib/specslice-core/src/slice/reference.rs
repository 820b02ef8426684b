//! Typed component reference keys parsed from `$ref` pointers.

use std::fmt;
use std::str::FromStr;

use crate::error::SliceError;

/// The mapping key that marks a reference object.
pub(crate) const REF_KEY: &str = "$ref";

const POINTER_PREFIX: &str = "#/components/";

/// A `(category, name)` key identifying one reusable component definition.
///
/// Parsed from pointer strings of the form `#/components/<category>/<name>`,
/// the only convention this engine resolves. The key is a plain composite
/// value, independent of any particular in-memory representation, so it can
/// be collected into sets and compared across documents.
///
/// # Example
///
/// ```rust
/// use specslice_core::ComponentRef;
///
/// let reference = ComponentRef::parse("#/components/schemas/User")?;
/// assert_eq!(reference.category(), "schemas");
/// assert_eq!(reference.name(), "User");
/// assert_eq!(reference.pointer(), "#/components/schemas/User");
/// # Ok::<(), specslice_core::SliceError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    category: String,
    name: String,
}

impl ComponentRef {
    /// Builds a key directly from its parts.
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Parses a pointer string into a key.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::UnsupportedPointerFormat`] for anything outside
    /// the `#/components/<category>/<name>` convention: external file
    /// references, pointers into other document sections, and pointers with
    /// missing, empty, or extra segments.
    pub fn parse(pointer: &str) -> Result<Self, SliceError> {
        let unsupported = || SliceError::UnsupportedPointerFormat {
            pointer: pointer.to_string(),
        };

        let rest = pointer.strip_prefix(POINTER_PREFIX).ok_or_else(unsupported)?;
        match rest.split('/').collect::<Vec<_>>().as_slice() {
            [category, name] if !category.is_empty() && !name.is_empty() => {
                Ok(Self::new(*category, *name))
            }
            _ => Err(unsupported()),
        }
    }

    /// The component category, e.g. `schemas` or `parameters`.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The component name within its category.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pointer string this key round-trips to.
    #[must_use]
    pub fn pointer(&self) -> String {
        format!("{POINTER_PREFIX}{}/{}", self.category, self.name)
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.category, self.name)
    }
}

impl FromStr for ComponentRef {
    type Err = SliceError;

    fn from_str(pointer: &str) -> Result<Self, Self::Err> {
        Self::parse(pointer)
    }
}
