//! Incoming request types and their validation gates
//!
//! Bodies are inspected as raw JSON so that each gate can report its own
//! message; the first failing gate wins.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Required scheme prefix for transcript URLs
pub const SECURE_SCHEME_PREFIX: &str = "https://";

/// Validated `/api/analyze` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Instruction for the model
    pub prompt: String,
    /// Share URLs of the transcript documents, in request order
    pub files: Vec<String>,
}

/// One presentation entry of a `/api/salesprep` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    /// Drive file ID or share URL
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
}

/// Validated `/api/salesprep` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesPrepRequest {
    /// Public profile URL to enrich
    #[serde(rename = "linkedinUrl")]
    pub linkedin_url: String,
    /// Instruction for the model
    pub prompt: String,
    /// Presentation documents, in request order
    pub presentations: Vec<Presentation>,
}

/// Decode a raw body into a non-empty JSON object
fn body_object(body: &[u8]) -> Result<Map<String, Value>> {
    let no_data = || Error::validation("No data provided");

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(no_data());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(no_data()),
    }
}

/// Non-empty string field, `None` when absent, empty, or not a string
fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Empty or zero-like JSON value: null, false, 0, "", [] or {}
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

impl AnalysisRequest {
    /// Validate a raw `/api/analyze` body
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let data = body_object(body)?;

        if !data.contains_key("files") {
            return Err(Error::validation("No files provided"));
        }

        let prompt = non_empty_str(&data, "prompt")
            .ok_or_else(|| Error::validation("Prompt is required"))?
            .to_string();

        let entries = match data.get("files") {
            Some(Value::Array(entries)) if !entries.is_empty() => entries,
            Some(value) if !is_blank(value) => return Err(Error::validation("Invalid file URL")),
            _ => return Err(Error::validation("No files selected")),
        };

        let files = entries
            .iter()
            .map(|entry| match entry.as_str() {
                Some(url) if url.starts_with(SECURE_SCHEME_PREFIX) => Ok(url.to_string()),
                _ => Err(Error::validation("Invalid file URL")),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { prompt, files })
    }
}

impl SalesPrepRequest {
    /// Validate a raw `/api/salesprep` body
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let data = body_object(body)?;

        let linkedin_url = non_empty_str(&data, "linkedinUrl")
            .ok_or_else(|| Error::validation("LinkedinURL is required"))?
            .to_string();

        let prompt = non_empty_str(&data, "prompt")
            .ok_or_else(|| Error::validation("Prompt is required"))?
            .to_string();

        let entries = match data.get("presentations") {
            Some(Value::Array(entries)) if !entries.is_empty() => entries,
            _ => return Err(Error::validation("No ppt/pdf file selected")),
        };

        let presentations = entries
            .iter()
            .map(|entry| {
                entry
                    .as_object()
                    .and_then(|obj| non_empty_str(obj, "downloadUrl"))
                    .map(|url| Presentation {
                        download_url: url.to_string(),
                    })
                    .ok_or_else(|| Error::validation("Invalid presentation entry"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            linkedin_url,
            prompt,
            presentations,
        })
    }
}

/// Resolve a storage file ID from a share URL or a bare ID
///
/// Share URLs use the `id` query parameter when present, otherwise the
/// second-to-last path segment (`.../file/d/<ID>/view`). Anything that is not
/// an `https://` URL is taken as the ID itself. IDs are limited to the Drive
/// alphabet (`A-Z a-z 0-9 _ -`).
pub fn resolve_file_id(reference: &str) -> Result<String> {
    let reference = reference.trim();
    let id = if reference.starts_with(SECURE_SCHEME_PREFIX) {
        id_from_share_url(reference)
    } else {
        Some(reference.to_string())
    };

    id.filter(|id| is_file_id(id))
        .ok_or_else(|| Error::validation("Invalid file URL"))
}

fn id_from_share_url(reference: &str) -> Option<String> {
    let url = Url::parse(reference).ok()?;

    if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "id") {
        if !id.is_empty() {
            return Some(id.into_owned());
        }
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    let index = segments.len().checked_sub(2)?;
    segments.get(index).map(|id| id.to_string())
}

fn is_file_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
