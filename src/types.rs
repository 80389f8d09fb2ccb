//! Request, result and wire types for the extract API.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// A page to read and the question to answer about it.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRequest {
    /// URL of the page to extract from.
    pub url: String,
    /// Natural-language question, sent as the extraction prompt.
    pub question: String,
}

impl ExtractionRequest {
    /// Create a new request.
    pub fn new(url: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            question: question.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() || self.question.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "Both URL and question are required parameters.".into(),
            ));
        }
        Ok(())
    }
}

/// API credentials supplied per call.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Wrap an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Short SHA-256 fingerprint of the key, safe to log.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.api_key.as_bytes());
        let result = hasher.finalize();
        // First 16 hex chars
        hex::encode(&result[..8])
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config(
                "API key is required. Please configure it in your settings.".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Outcome of a successful extraction.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Always `true` for a returned result.
    pub success: bool,
    /// Extracted payload, never null.
    pub data: Value,
    /// Human-readable summary.
    pub message: String,
    /// Number of one-interval polls it took, if the job was asynchronous.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u32>,
}

impl ExtractionResult {
    pub(crate) fn immediate(data: Value) -> Self {
        Self {
            success: true,
            data,
            message: "Information extracted successfully from the web page (completed immediately)."
                .into(),
            elapsed_seconds: None,
        }
    }

    pub(crate) fn polled(data: Value, attempts: u32) -> Self {
        Self {
            success: true,
            data,
            message: format!(
                "Information extracted successfully from the web page after {} attempts.",
                attempts
            ),
            elapsed_seconds: Some(attempts),
        }
    }
}

/// Identifier of a running remote job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    /// Job ID assigned by the API.
    pub id: String,
}

/// Result of the creation call on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The API answered synchronously with data.
    Completed(Value),
    /// The API queued a job to poll.
    Pending(JobHandle),
}

/// Body of the creation call.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateExtractBody<'a> {
    pub urls: [&'a str; 1],
    pub prompt: &'a str,
}

/// Response from the creation call.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateExtractResponse {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub success: bool,
    #[serde(default, deserialize_with = "truthy_value")]
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

impl CreateExtractResponse {
    /// Decide between synchronous completion and a job to poll.
    pub(crate) fn into_submission(self) -> Result<Submission> {
        let id = self.id.filter(|id| !id.is_empty());
        match (self.success, self.data, id) {
            (true, Some(data), None) => Ok(Submission::Completed(data)),
            (_, _, Some(id)) => Ok(Submission::Pending(JobHandle { id })),
            _ => Err(Error::Protocol(match self.error {
                Some(e) if !e.is_empty() => {
                    format!("No job ID received from the extract API: {}", e)
                }
                _ => "No job ID received from the extract API".into(),
            })),
        }
    }
}

/// Remote job status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobStatus {
    /// Job finished; check `success`.
    Completed,
    /// Job failed.
    Failed,
    /// Job was cancelled.
    Cancelled,
    /// Job is running.
    Processing,
    /// Job is queued.
    Pending,
    /// Any value this client does not recognise, including a missing or
    /// non-string status.
    #[default]
    Unknown,
}

impl JobStatus {
    fn from_wire(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("completed") => JobStatus::Completed,
            Some("failed") => JobStatus::Failed,
            Some("cancelled") => JobStatus::Cancelled,
            Some("processing") => JobStatus::Processing,
            Some("pending") => JobStatus::Pending,
            _ => JobStatus::Unknown,
        }
    }
}

/// Response from a status query.
///
/// Decoding never fails on odd field values: they fall back to `Unknown`,
/// `false` or `None` so the poll loop keeps going.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    /// Current job status.
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: JobStatus,
    /// Whether a completed job succeeded. Only a JSON `true` counts.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub success: bool,
    /// Extracted payload, present once completed.
    #[serde(default)]
    pub data: Option<Value>,
    /// Vendor error message, if it is a string.
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

fn lenient_status<'de, D>(deserializer: D) -> std::result::Result<JobStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(JobStatus::from_wire(value.as_ref()))
}

fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Keep a payload only if it is truthy: not null, `false`, `0` or `""`.
fn truthy_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| match v {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }))
}
