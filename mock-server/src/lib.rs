//! Stand-in for the `/get-cookies` inspection endpoint.
//!
//! Validates submissions the way the real backend does, but instead of
//! performing the request it reflects the submitted headers back: the
//! `Cookie` header becomes the cookie list and every header becomes a
//! response header. Answers are always `200` with a JSON body.

use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, Multipart},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use url::Url;

pub const METHODS: [&str; 9] = [
    "GET", "POST", "PUT", "PATCH", "HEAD", "DELETE", "OPTIONS", "TRACE", "CONNECT",
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CookieInfo {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub expires: String,
    #[serde(rename = "httpOnly")]
    pub http_only: bool,
    pub secure: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderInfo {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inspection {
    pub requested_url: String,
    pub method: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cookies: Vec<CookieInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HeaderInfo>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// Form fields of one inspection request. Missing fields read as empty.
///
/// The `body` field is accepted on the wire but nothing is sent anywhere,
/// so it is not kept.
#[derive(Debug, Default)]
pub struct Submission {
    pub method: String,
    pub url: String,
    pub headers: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/get-cookies", post(get_cookies))
        .route("/health", get(|| async { "ok" }))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_cookies(mut multipart: Multipart) -> Result<Json<Inspection>, MultipartError> {
    let mut submission = Submission::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await?;
        match name.as_str() {
            "method" => submission.method = value,
            "url" => submission.url = value,
            "headers" => submission.headers = value,
            _ => {}
        }
    }

    let inspection = inspect(&submission);
    tracing::info!(
        method = %submission.method,
        url = %submission.url,
        error = %inspection.error,
        "inspection request"
    );
    Ok(Json(inspection))
}

/// Validate the submission and build the reflected result.
pub fn inspect(submission: &Submission) -> Inspection {
    match reflect(submission) {
        Ok(inspection) => inspection,
        Err(error) => Inspection {
            requested_url: submission.url.clone(),
            method: submission.method.clone(),
            error,
            ..Inspection::default()
        },
    }
}

fn reflect(submission: &Submission) -> Result<Inspection, String> {
    let url = validate_url(&submission.url)?;
    if !is_valid_method(&submission.method) {
        return Err("unsupported http method".to_string());
    }

    let headers = parse_headers(&submission.headers);
    let cookies = headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("cookie"))
        .flat_map(|(_, value)| parse_cookie_header(value, url.host_str().unwrap_or_default()))
        .collect();

    Ok(Inspection {
        requested_url: submission.url.clone(),
        method: submission.method.clone(),
        status: "200 OK".to_string(),
        cookies,
        headers: headers
            .into_iter()
            .map(|(name, value)| HeaderInfo {
                name,
                values: vec![value],
            })
            .collect(),
        error: String::new(),
    })
}

/// Accept absolute `http`/`https` URLs that do not point at this machine.
pub fn validate_url(target: &str) -> Result<Url, String> {
    let url = Url::parse(target).map_err(|_| "invalid url".to_string())?;
    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => return Err("invalid url".to_string()),
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err("unsupported scheme".to_string());
    }

    if host.starts_with("localhost") || host.contains("127.0.0.1") || host.contains("::1") {
        return Err("unsupported host".to_string());
    }

    Ok(url)
}

pub fn is_valid_method(method: &str) -> bool {
    METHODS.contains(&method.to_ascii_uppercase().as_str())
}

/// Parse newline-separated `Name: Value` lines. Lines without a colon are
/// skipped and a repeated name keeps its last value.
pub fn parse_headers(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

fn parse_cookie_header(value: &str, domain: &str) -> Vec<CookieInfo> {
    value
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| CookieInfo {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
            domain: domain.to_string(),
            path: "/".to_string(),
            expires: String::new(),
            http_only: false,
            secure: false,
        })
        .collect()
}
