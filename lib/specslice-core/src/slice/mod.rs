//! The reference resolution and slicing engine.
//!
//! Given a loaded [`Document`](crate::document::Document) and a target
//! endpoint, [`closure`] computes the transitive set of component
//! definitions reachable from the operation, and [`extract_slice`] emits a
//! new, structurally valid document containing only that closure.
//!
//! Two invariants hold for every produced slice:
//!
//! - **Completeness**: every `$ref` inside the slice resolves within the
//!   slice's own `components` section.
//! - **Minimality**: the slice contains no component that is not reachable
//!   from the target operation.

mod builder;
mod closure;
mod reference;

pub use builder::extract_slice;
pub use closure::closure;
pub use reference::ComponentRef;
