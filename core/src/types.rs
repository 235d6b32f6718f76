//! Data carried across the endpoint boundary.
//!
//! # Design
//! The endpoint answers with one flat JSON object in which `error` and the
//! success fields are mutually exclusive. That object is decoded into a
//! private `Envelope` first and then narrowed into `ResultPayload`, so the
//! rest of the crate never sees a half-populated response.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::HttpMethod;

/// What the user asked to inspect, captured at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Raw text, one `Name: Value` pair per line. Interpreted by the server.
    pub headers_text: String,
    pub body_text: String,
}

/// A cookie set by the inspected URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expires: None,
            http_only: false,
            secure: false,
        }
    }
}

/// A response header of the inspected URL with all of its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// The successful half of a `ResultPayload`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InspectionResult {
    pub status: String,
    pub cookies: Vec<Cookie>,
    pub headers: Vec<Header>,
    pub requested_url: Option<String>,
    pub method: Option<String>,
}

/// Decoded endpoint response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPayload {
    /// The server refused or failed the inspection; `error` is trusted text.
    Failure { error: String },
    Success(InspectionResult),
}

#[derive(Deserialize)]
struct Envelope {
    requested_url: Option<String>,
    method: Option<String>,
    status: Option<String>,
    cookies: Option<Vec<Cookie>>,
    headers: Option<Vec<Header>>,
    error: Option<String>,
}

impl ResultPayload {
    /// Decode the endpoint's JSON body.
    ///
    /// A non-empty `error` takes precedence over everything else. Missing or
    /// `null` cookie/header lists decode as empty.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let envelope: Envelope =
            serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;

        if let Some(error) = envelope.error.filter(|e| !e.is_empty()) {
            return Ok(ResultPayload::Failure { error });
        }

        let status = envelope
            .status
            .ok_or_else(|| ApiError::MalformedPayload("neither error nor status present".to_string()))?;

        Ok(ResultPayload::Success(InspectionResult {
            status,
            cookies: envelope.cookies.unwrap_or_default(),
            headers: envelope.headers.unwrap_or_default(),
            requested_url: envelope.requested_url,
            method: envelope.method,
        }))
    }
}
