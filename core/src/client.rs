//! Stateless request builder and response parser for the inspection endpoint.
//!
//! # Design
//! `InspectorClient` holds only the endpoint URL. `build_submission` turns a
//! `SubmissionRequest` into an `HttpRequest`, and `parse_result` turns the
//! host's `HttpResponse` into a `ResultPayload`. The round-trip in between is
//! the host's job.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::Form;
use crate::types::{ResultPayload, SubmissionRequest};

/// Builds and parses requests against the form's action URL.
#[derive(Debug, Clone)]
pub struct InspectorClient {
    action_url: String,
}

impl InspectorClient {
    pub fn new(action_url: &str) -> Self {
        Self {
            action_url: action_url.to_string(),
        }
    }

    pub fn action_url(&self) -> &str {
        &self.action_url
    }

    /// POST the submission as multipart fields `method`, `url`, `headers`,
    /// `body`, in that order.
    pub fn build_submission(&self, submission: &SubmissionRequest) -> HttpRequest {
        self.build_submission_with(Form::new(), submission)
    }

    /// Same as `build_submission` but with a caller-supplied (empty) form,
    /// which lets the boundary be pinned.
    pub fn build_submission_with(&self, form: Form, submission: &SubmissionRequest) -> HttpRequest {
        let form = form
            .text("method", submission.method.as_str())
            .text("url", submission.url.as_str())
            .text("headers", submission.headers_text.as_str())
            .text("body", submission.body_text.as_str());

        HttpRequest {
            method: HttpMethod::Post,
            path: self.action_url.clone(),
            headers: vec![("content-type".to_string(), form.content_type())],
            body: Some(form.into_body()),
        }
    }

    pub fn parse_result(&self, response: HttpResponse) -> Result<ResultPayload, ApiError> {
        check_status(&response, 200)?;
        ResultPayload::from_json(&response.body)
    }
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cookie;

    fn client() -> InspectorClient {
        InspectorClient::new("http://localhost:8080/get-cookies")
    }

    fn submission() -> SubmissionRequest {
        SubmissionRequest {
            method: HttpMethod::Put,
            url: "https://example.com/login".to_string(),
            headers_text: "User-Agent: HttpCookies.info/1.0\nAccept: */*".to_string(),
            body_text: "user=me".to_string(),
        }
    }

    #[test]
    fn build_submission_produces_multipart_post() {
        let req = client().build_submission_with(Form::with_boundary("B"), &submission());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/get-cookies");
        assert_eq!(req.header("content-type"), Some("multipart/form-data; boundary=B"));

        let body = req.body.unwrap();
        let names: Vec<_> = body
            .match_indices("name=\"")
            .map(|(i, _)| body[i + 6..].split('"').next().unwrap())
            .collect();
        assert_eq!(names, vec!["method", "url", "headers", "body"]);
        assert!(body.contains("\r\n\r\nPUT\r\n"));
        assert!(body.contains("\r\n\r\nuser=me\r\n"));
    }

    #[test]
    fn build_submission_keeps_empty_fields() {
        let mut sub = submission();
        sub.headers_text.clear();
        sub.body_text.clear();
        let body = client()
            .build_submission_with(Form::with_boundary("B"), &sub)
            .body
            .unwrap();
        assert!(body.contains("name=\"headers\"\r\n\r\n\r\n--B"));
        assert!(body.ends_with("name=\"body\"\r\n\r\n\r\n--B--\r\n"));
    }

    #[test]
    fn parse_result_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"status":"200 OK","cookies":[{"name":"a","value":"1"}]}"#.to_string(),
        };
        let ResultPayload::Success(result) = client().parse_result(response).unwrap() else {
            panic!("expected success");
        };
        assert_eq!(result.cookies, vec![Cookie::new("a", "1")]);
    }

    #[test]
    fn parse_result_wrong_status() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_result(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_result_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = client().parse_result(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
