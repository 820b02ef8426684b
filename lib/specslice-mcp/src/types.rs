//! Parameter and response types for the MCP tools.
//!
//! These types define the tool argument shapes only; all slicing logic
//! lives in `specslice-core`. Field docs become the JSON-schema
//! descriptions clients see.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use specslice_core::Endpoint;

/// Request for the `load_openapi_spec` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadSpecParams {
    /// Path to a local `.yaml`, `.yml`, or `.json` specification file.
    pub file_path: String,
}

/// Request for the `load_openapi_spec_from_url` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadSpecFromUrlParams {
    /// The http(s) URL to fetch the specification from.
    pub url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

pub(crate) fn default_timeout_seconds() -> u64 {
    30
}

/// Summary returned by both load tools after a successful load.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct LoadSpecResponse {
    /// The specification title from `info.title`.
    pub title: String,
    /// The specification version from `info.version`.
    pub version: String,
    /// Number of path entries in the specification.
    pub path_count: usize,
    /// The file path or URL the specification was loaded from.
    pub source: String,
}

/// Textual rendering selected for an extracted slice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Render the slice as YAML.
    #[default]
    Yaml,
    /// Render the slice as pretty-printed JSON.
    Json,
}

/// Request for the `extract_endpoint_slice` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExtractSliceParams {
    /// The API path, e.g. `/users/{id}`.
    pub path: String,
    /// The HTTP method, e.g. `GET` or `post` (case-insensitive).
    pub method: String,
    /// Output format for the rendered slice.
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Response of the `extract_endpoint_slice` tool.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ExtractSliceResponse {
    /// The requested API path.
    pub path: String,
    /// The requested HTTP method, uppercased.
    pub method: String,
    /// The format `document` is rendered in.
    pub format: OutputFormat,
    /// The minimal specification containing only the requested endpoint and
    /// its transitive component dependencies.
    pub document: String,
}

/// One endpoint in a `list_endpoints` response.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct EndpointEntry {
    /// The API path.
    pub path: String,
    /// The HTTP method, uppercased.
    pub method: String,
    /// The operation's summary (or description), empty when absent.
    pub summary: String,
    /// The operation's `operationId`, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl From<Endpoint> for EndpointEntry {
    fn from(endpoint: Endpoint) -> Self {
        let Endpoint {
            path,
            method,
            summary,
            operation_id,
        } = endpoint;
        Self {
            path,
            method,
            summary,
            operation_id,
        }
    }
}

/// Response of the `list_endpoints` tool.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ListEndpointsResponse {
    /// All endpoints of the loaded specification, in source order.
    pub endpoints: Vec<EndpointEntry>,
}

/// Response of the `get_server_status` tool.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ServerStatusResponse {
    /// Whether a specification is currently loaded.
    pub loaded: bool,
    /// Title of the loaded specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Version of the loaded specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Number of endpoints available in the loaded specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_count: Option<usize>,
    /// Where the loaded specification came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}
