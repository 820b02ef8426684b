use std::time::Duration;

/// Errors that can occur while loading or slicing an OpenAPI document.
///
/// This enum covers the whole failure taxonomy, from transport problems during
/// a remote load to dangling references discovered mid-slice. All variants
/// implement `std::error::Error` and carry enough context for the caller to
/// correct the request.
///
/// None of these conditions are recoverable at the point of detection: a
/// partially resolved slice is never acceptable, so every failure propagates
/// unchanged to the caller.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SliceError {
    /// No OpenAPI document has been loaded yet.
    ///
    /// Occurs when listing endpoints or extracting a slice before a
    /// successful load.
    #[display("no OpenAPI document is loaded; load a specification first")]
    NoDocumentLoaded,

    /// The requested (path, method) pair does not exist in the document.
    #[display("endpoint {} {path} not found; available methods at this path: {available:?}", method.to_uppercase())]
    #[from(skip)]
    EndpointNotFound {
        /// The requested API path.
        path: String,
        /// The requested HTTP method.
        method: String,
        /// HTTP methods that do exist at the requested path (empty when the
        /// path itself is absent).
        available: Vec<String>,
    },

    /// A reference pointer does not resolve to any component definition.
    ///
    /// Surfaced mid-traversal; aborts the whole slicing operation rather
    /// than emitting a slice with a dangling reference.
    #[display("reference {pointer} does not resolve to a component in the document")]
    #[from(skip)]
    ReferenceNotFound {
        /// The pointer that failed to resolve.
        pointer: String,
    },

    /// A reference pointer falls outside the supported
    /// `#/components/<category>/<name>` convention.
    ///
    /// External file references and full-document pointers are not resolved.
    #[display("unsupported reference pointer {pointer:?}: expected #/components/<category>/<name>")]
    #[from(skip)]
    UnsupportedPointerFormat {
        /// The offending pointer string.
        pointer: String,
    },

    /// The parsed payload is not a loadable OpenAPI document.
    #[display("invalid OpenAPI document: {reason}")]
    #[from(skip)]
    InvalidDocument {
        /// Why the payload was rejected.
        reason: String,
    },

    /// The file path has an extension the loader does not recognize.
    #[display("unsupported file type for {path:?}: expected .yaml, .yml, or .json")]
    #[from(skip)]
    UnsupportedFileType {
        /// The rejected file path.
        path: String,
    },

    /// Reading the specification file failed.
    #[display("reading {path:?} failed: {source}")]
    #[from(skip)]
    Io {
        /// The file that could not be read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// JSON parsing failed.
    Json(serde_json::Error),

    /// YAML parsing failed.
    Yaml(serde_yaml::Error),

    /// The URL could not be parsed.
    InvalidUrl(url::ParseError),

    /// The URL uses a scheme other than http or https.
    #[display("unsupported URL scheme {scheme:?}: only http and https are supported")]
    #[from(skip)]
    UnsupportedUrlScheme {
        /// The rejected scheme.
        scheme: String,
    },

    /// Fetching the specification over the network failed.
    ///
    /// Covers transport errors and non-success HTTP statuses; no document
    /// replacement happens on this path.
    #[display("fetching {url} failed: {source}")]
    #[from(skip)]
    FetchFailed {
        /// The URL that was being fetched.
        url: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The network fetch did not complete within the caller-specified bound.
    #[display("fetching {url} timed out after {timeout:?}")]
    #[from(skip)]
    FetchTimeout {
        /// The URL that was being fetched.
        url: String,
        /// The timeout that expired.
        timeout: Duration,
    },
}
