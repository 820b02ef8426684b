//! # Specslice MCP
//!
//! MCP (Model Context Protocol) stdio server exposing OpenAPI endpoint
//! slicing as tools, backed by `specslice-core`.
//!
//! The server implements five tools:
//!
//! 1. **`load_openapi_spec`** - load a specification from a local YAML or
//!    JSON file
//! 2. **`load_openapi_spec_from_url`** - load a specification from a remote
//!    URL with a caller-specified timeout
//! 3. **`list_endpoints`** - enumerate every `(path, method)` pair in the
//!    loaded specification
//! 4. **`extract_endpoint_slice`** - emit a minimal specification containing
//!    one endpoint and its transitive component dependencies, as YAML or
//!    JSON
//! 5. **`get_server_status`** - report whether and what is loaded
//!
//! # State
//!
//! At most one specification is loaded at a time; a successful load replaces
//! it wholesale, and a failed load leaves the previous one untouched.
//! Operations that need a document fail immediately when none is loaded.
//!
//! # Example
//!
//! ```no_run
//! use specslice_mcp::SpecSliceServer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! SpecSliceServer::new().serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod server;
pub mod types;

pub use server::SpecSliceServer;
