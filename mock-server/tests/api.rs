use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Inspection};
use tower::ServiceExt;

const BOUNDARY: &str = "----test-boundary";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn form_request(fields: &[(&str, &str)]) -> Request<String> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/get-cookies")
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

// --- validation ---

#[tokio::test]
async fn invalid_url_is_reported_in_body() {
    let resp = app()
        .oneshot(form_request(&[("method", "GET"), ("url", "not a url")]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let result: Inspection = body_json(resp).await;
    assert_eq!(result.error, "invalid url");
    assert_eq!(result.requested_url, "not a url");
    assert!(result.status.is_empty());
}

#[tokio::test]
async fn localhost_is_rejected() {
    let resp = app()
        .oneshot(form_request(&[("method", "GET"), ("url", "http://localhost:8080/")]))
        .await
        .unwrap();

    let result: Inspection = body_json(resp).await;
    assert_eq!(result.error, "unsupported host");
}

#[tokio::test]
async fn unknown_method_is_rejected() {
    let resp = app()
        .oneshot(form_request(&[("method", "BREW"), ("url", "https://example.com")]))
        .await
        .unwrap();

    let result: Inspection = body_json(resp).await;
    assert_eq!(result.error, "unsupported http method");
    assert_eq!(result.method, "BREW");
}

#[tokio::test]
async fn missing_multipart_boundary_is_client_error() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/get-cookies")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

// --- reflection ---

#[tokio::test]
async fn submitted_headers_are_reflected() {
    let resp = app()
        .oneshot(form_request(&[
            ("method", "post"),
            ("url", "https://example.com/login"),
            ("headers", "User-Agent: HttpCookies.info/1.0\nCookie: sid=<abc>; theme=dark"),
            ("body", "user=me"),
        ]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: Inspection = body_json(resp).await;
    assert!(result.error.is_empty());
    assert_eq!(result.status, "200 OK");
    assert_eq!(result.method, "post");

    let cookies: Vec<_> = result
        .cookies
        .iter()
        .map(|c| (c.name.as_str(), c.value.as_str()))
        .collect();
    assert_eq!(cookies, vec![("sid", "<abc>"), ("theme", "dark")]);

    let names: Vec<_> = result.headers.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Cookie", "User-Agent"]);
    assert_eq!(result.headers[1].values, vec!["HttpCookies.info/1.0"]);
}

#[tokio::test]
async fn body_field_does_not_change_the_result() {
    let with_body = app()
        .oneshot(form_request(&[
            ("method", "PUT"),
            ("url", "https://example.com"),
            ("headers", "Cookie: a=1"),
            ("body", "{\"a\":2}"),
        ]))
        .await
        .unwrap();
    let without_body = app()
        .oneshot(form_request(&[
            ("method", "PUT"),
            ("url", "https://example.com"),
            ("headers", "Cookie: a=1"),
        ]))
        .await
        .unwrap();

    let with_body: Inspection = body_json(with_body).await;
    let without_body: Inspection = body_json(without_body).await;
    assert_eq!(with_body, without_body);
    assert_eq!(with_body.cookies.len(), 1);
}

#[tokio::test]
async fn no_headers_means_no_lists() {
    let resp = app()
        .oneshot(form_request(&[
            ("method", "GET"),
            ("url", "https://example.com"),
            ("headers", ""),
            ("body", ""),
        ]))
        .await
        .unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(raw.get("cookies").is_none());
    assert!(raw.get("headers").is_none());
    assert!(raw.get("error").is_none());
}

#[tokio::test]
async fn health_check() {
    let resp = app()
        .oneshot(Request::builder().uri("/health").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"ok");
}
