//! The MCP tool surface over the slicing engine.
//!
//! The server owns the session state: at most one loaded document, replaced
//! wholesale on each successful load. Each tool invocation locks the
//! session, runs to completion, and unlocks, so a load is atomic with
//! respect to concurrent reads. Everything else is a thin mapping onto
//! `specslice-core` contracts.

use std::sync::Arc;
use std::time::Duration;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{ErrorData, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use specslice_core::{Document, SliceError, ToYaml, extract_slice, load_path, load_url};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::types::{
    EndpointEntry, ExtractSliceParams, ExtractSliceResponse, ListEndpointsResponse,
    LoadSpecFromUrlParams, LoadSpecParams, LoadSpecResponse, OutputFormat, ServerStatusResponse,
};

const INSTRUCTIONS: &str = "This server helps you work with large OpenAPI specifications by \
extracting only the relevant parts for specific endpoints. Use 'load_openapi_spec' to load a \
YAML or JSON OpenAPI specification from a local file, or 'load_openapi_spec_from_url' to load \
one from a remote URL. Use 'list_endpoints' to see all available endpoints in the loaded \
specification, and 'extract_endpoint_slice' to get a minimal OpenAPI document containing only \
the specified endpoint and its dependencies.";

/// The currently loaded specification and where it came from.
#[derive(Debug, Clone)]
struct LoadedDocument {
    document: Document,
    source: String,
}

/// MCP server exposing the slicing engine as tools.
#[derive(Clone)]
pub struct SpecSliceServer {
    session: Arc<Mutex<Option<LoadedDocument>>>,
    tool_router: ToolRouter<Self>,
}

impl Default for SpecSliceServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl SpecSliceServer {
    /// Creates a server with no specification loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Arc::new(Mutex::new(None)),
            tool_router: Self::tool_router(),
        }
    }

    /// Serves the MCP protocol over stdin/stdout until the peer disconnects.
    ///
    /// # Errors
    ///
    /// Returns the transport error that ended the session.
    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Installs a freshly loaded document, discarding any previous one.
    async fn install(&self, document: Document, source: String) -> LoadSpecResponse {
        let response = summarize(&document, &source);
        let mut session = self.session.lock().await;
        *session = Some(LoadedDocument { document, source });
        response
    }

    /// Runs `operation` against the loaded document, failing with
    /// `NoDocumentLoaded` when none is present.
    async fn with_document<T>(
        &self,
        operation: impl FnOnce(&LoadedDocument) -> Result<T, SliceError>,
    ) -> Result<T, ErrorData> {
        let session = self.session.lock().await;
        let loaded = session.as_ref().ok_or(SliceError::NoDocumentLoaded);
        loaded
            .and_then(operation)
            .map_err(to_error_data)
    }

    /// Load an OpenAPI specification from a local YAML or JSON file. Replaces
    /// any previously loaded specification.
    #[tool(name = "load_openapi_spec")]
    async fn load_openapi_spec(
        &self,
        params: Parameters<LoadSpecParams>,
    ) -> Result<Json<LoadSpecResponse>, ErrorData> {
        let LoadSpecParams { file_path } = params.0;

        let document = load_path(&file_path).map_err(to_error_data)?;
        let response = self.install(document, file_path).await;
        info!(source = %response.source, paths = response.path_count, "loaded OpenAPI specification");
        Ok(Json(response))
    }

    /// Load an OpenAPI specification from a remote URL. Replaces any
    /// previously loaded specification.
    #[tool(name = "load_openapi_spec_from_url")]
    async fn load_openapi_spec_from_url(
        &self,
        params: Parameters<LoadSpecFromUrlParams>,
    ) -> Result<Json<LoadSpecResponse>, ErrorData> {
        let LoadSpecFromUrlParams {
            url,
            timeout_seconds,
        } = params.0;

        let timeout = Duration::from_secs(timeout_seconds);
        let document = load_url(&url, timeout).await.map_err(to_error_data)?;
        let response = self.install(document, url).await;
        info!(source = %response.source, paths = response.path_count, "loaded OpenAPI specification");
        Ok(Json(response))
    }

    /// List all endpoints available in the currently loaded OpenAPI
    /// specification.
    #[tool(name = "list_endpoints")]
    async fn list_endpoints(&self) -> Result<Json<ListEndpointsResponse>, ErrorData> {
        let endpoints = self
            .with_document(|loaded| Ok(loaded.document.endpoints()))
            .await?;

        Ok(Json(ListEndpointsResponse {
            endpoints: endpoints.into_iter().map(EndpointEntry::from).collect(),
        }))
    }

    /// Extract a minimal OpenAPI document containing only the specified
    /// endpoint and every component it transitively depends on.
    #[tool(name = "extract_endpoint_slice")]
    async fn extract_endpoint_slice(
        &self,
        params: Parameters<ExtractSliceParams>,
    ) -> Result<Json<ExtractSliceResponse>, ErrorData> {
        let ExtractSliceParams {
            path,
            method,
            output_format,
        } = params.0;

        let document = self
            .with_document(|loaded| {
                let slice = extract_slice(&loaded.document, &path, &method)?;
                render(&slice, output_format)
            })
            .await?;
        debug!(%path, %method, ?output_format, "rendered endpoint slice");

        Ok(Json(ExtractSliceResponse {
            path,
            method: method.to_uppercase(),
            format: output_format,
            document,
        }))
    }

    /// Get the current status of the slicing server.
    #[tool(name = "get_server_status")]
    async fn get_server_status(&self) -> Result<Json<ServerStatusResponse>, ErrorData> {
        let session = self.session.lock().await;

        let response = match session.as_ref() {
            None => ServerStatusResponse {
                loaded: false,
                title: None,
                version: None,
                endpoint_count: None,
                source: None,
            },
            Some(loaded) => ServerStatusResponse {
                loaded: true,
                title: loaded.document.title().map(ToString::to_string),
                version: loaded.document.version().map(ToString::to_string),
                endpoint_count: Some(loaded.document.endpoints().len()),
                source: Some(loaded.source.clone()),
            },
        };
        Ok(Json(response))
    }
}

#[tool_handler]
impl ServerHandler for SpecSliceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn summarize(document: &Document, source: &str) -> LoadSpecResponse {
    LoadSpecResponse {
        title: document.title().unwrap_or("Unknown").to_string(),
        version: document.version().unwrap_or("Unknown").to_string(),
        path_count: document.path_count(),
        source: source.to_string(),
    }
}

fn render(document: &Document, format: OutputFormat) -> Result<String, SliceError> {
    match format {
        OutputFormat::Yaml => Ok(document.to_yaml()?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
    }
}

/// Maps core failures onto protocol errors.
///
/// Conditions the caller can correct (bad path, unusable URL, nothing
/// loaded) surface as invalid-params; everything else is an internal error.
/// The full message is preserved either way.
fn to_error_data(error: SliceError) -> ErrorData {
    match &error {
        SliceError::NoDocumentLoaded
        | SliceError::EndpointNotFound { .. }
        | SliceError::UnsupportedPointerFormat { .. }
        | SliceError::UnsupportedFileType { .. }
        | SliceError::UnsupportedUrlScheme { .. }
        | SliceError::InvalidUrl(_) => ErrorData::invalid_params(error.to_string(), None),
        _ => ErrorData::internal_error(error.to_string(), None),
    }
}
