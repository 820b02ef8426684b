//! Loading OpenAPI documents from local files and remote URLs.
//!
//! The loader is responsible for format detection (YAML vs JSON), network
//! fetch with a caller-specified timeout, and parsing into the ordered tree.
//! A document is only ever handed to the caller after a fully successful
//! parse and loadability check, so a failed load never leaves a session with
//! a partially installed document.

use std::path::Path;
use std::time::Duration;

use mime::Mime;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::Document;
use crate::error::SliceError;

/// Textual format of a specification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// JSON payload.
    Json,
    /// YAML payload.
    Yaml,
}

/// Loads a specification from a local file.
///
/// The format is chosen from the file extension: `.yaml`/`.yml` parse as
/// YAML, `.json` as JSON.
///
/// # Errors
///
/// Returns [`SliceError::UnsupportedFileType`] for other extensions,
/// [`SliceError::Io`] when the file cannot be read, and the parse or
/// validation error otherwise.
pub fn load_path(path: impl AsRef<Path>) -> Result<Document, SliceError> {
    let path = path.as_ref();
    let Some(format) = format_for_extension(path) else {
        return Err(SliceError::UnsupportedFileType {
            path: path.display().to_string(),
        });
    };

    let text = std::fs::read_to_string(path).map_err(|source| SliceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let document = parse_text(&text, format)?;
    debug!(path = %path.display(), ?format, paths = document.path_count(), "loaded OpenAPI document from file");
    Ok(document)
}

/// Loads a specification from an HTTP or HTTPS URL.
///
/// The fetch is bounded by `timeout`; on expiry the load fails with
/// [`SliceError::FetchTimeout`] without any document being produced. The
/// format is chosen from the response content type or the URL path
/// extension, falling back to trying YAML then JSON.
///
/// # Errors
///
/// Returns [`SliceError::InvalidUrl`] or [`SliceError::UnsupportedUrlScheme`]
/// for unusable URLs, [`SliceError::FetchFailed`] on transport errors and
/// non-success statuses, [`SliceError::FetchTimeout`] on expiry, and the
/// parse or validation error otherwise.
pub async fn load_url(url: &str, timeout: Duration) -> Result<Document, SliceError> {
    let parsed = Url::parse(url)?;
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(SliceError::UnsupportedUrlScheme {
            scheme: scheme.to_string(),
        });
    }

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| fetch_error(url, timeout, source))?;

    let response = client
        .get(parsed.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|source| fetch_error(url, timeout, source))?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

    let text = response
        .text()
        .await
        .map_err(|source| fetch_error(url, timeout, source))?;

    let document = match detect_remote_format(&parsed, content_type.as_deref()) {
        Some(format) => parse_text(&text, format)?,
        None => parse_with_fallback(&text)?,
    };
    debug!(%url, paths = document.path_count(), "loaded OpenAPI document from URL");
    Ok(document)
}

fn parse_text(text: &str, format: SpecFormat) -> Result<Document, SliceError> {
    match format {
        SpecFormat::Json => Document::from_json_str(text),
        SpecFormat::Yaml => Document::from_yaml_str(text),
    }
}

/// Tries YAML first, then JSON. Only an actual YAML syntax error triggers
/// the fallback; a well-formed payload that fails the loadability check is
/// reported as-is.
fn parse_with_fallback(text: &str) -> Result<Document, SliceError> {
    match Document::from_yaml_str(text) {
        Ok(document) => Ok(document),
        Err(SliceError::Yaml(_)) => Document::from_json_str(text),
        Err(other) => Err(other),
    }
}

fn format_for_extension(path: &Path) -> Option<SpecFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => Some(SpecFormat::Yaml),
        "json" => Some(SpecFormat::Json),
        _ => None,
    }
}

fn detect_remote_format(url: &Url, content_type: Option<&str>) -> Option<SpecFormat> {
    if let Some(format) = content_type.and_then(format_for_content_type) {
        return Some(format);
    }
    format_for_extension(Path::new(url.path()))
}

fn format_for_content_type(content_type: &str) -> Option<SpecFormat> {
    let mime: Mime = content_type.parse().ok()?;
    if mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON) {
        return Some(SpecFormat::Json);
    }
    if mime.subtype() == "yaml" || mime.suffix().is_some_and(|suffix| suffix == "yaml") {
        return Some(SpecFormat::Yaml);
    }
    None
}

fn fetch_error(url: &str, timeout: Duration, source: reqwest::Error) -> SliceError {
    if source.is_timeout() {
        SliceError::FetchTimeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        SliceError::FetchFailed {
            url: url.to_string(),
            source,
        }
    }
}

/// Converts a YAML tree into the ordered JSON tree the document model uses.
///
/// Scalar mapping keys that are not strings are stringified; sequence and
/// mapping keys have no JSON equivalent and are rejected. YAML tags carry no
/// meaning for OpenAPI documents and are stripped.
pub(crate) fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, SliceError> {
    let converted = match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(flag) => Value::Bool(flag),
        serde_yaml::Value::Number(number) => yaml_number_to_json(&number)?,
        serde_yaml::Value::String(text) => Value::String(text),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, entry) in mapping {
                map.insert(yaml_key_to_string(key)?, yaml_to_json(entry)?);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    };
    Ok(converted)
}

fn yaml_number_to_json(number: &serde_yaml::Number) -> Result<Value, SliceError> {
    if let Some(value) = number.as_u64() {
        return Ok(Value::from(value));
    }
    if let Some(value) = number.as_i64() {
        return Ok(Value::from(value));
    }
    number
        .as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| SliceError::InvalidDocument {
            reason: format!("number {number} has no JSON representation"),
        })
}

fn yaml_key_to_string(key: serde_yaml::Value) -> Result<String, SliceError> {
    match key {
        serde_yaml::Value::String(text) => Ok(text),
        serde_yaml::Value::Number(number) => Ok(number.to_string()),
        serde_yaml::Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(SliceError::InvalidDocument {
            reason: format!("unsupported mapping key: {other:?}"),
        }),
    }
}
