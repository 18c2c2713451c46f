use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_method_headers_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/echo")
                .header(http::header::CONTENT_TYPE, "application/json")
                .header("x-test", "1")
                .body(r#"{"a":1}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.header("content-type"), Some("application/json"));
    assert_eq!(echo.header("x-test"), Some("1"));
    assert_eq!(echo.body, r#"{"a":1}"#);
}

#[tokio::test]
async fn echo_accepts_custom_methods() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/echo")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_keeps_header_order() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo")
                .header("x-first", "1")
                .header("x-second", "2")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    let names: Vec<&str> = echo.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["x-first", "x-second"]);
}

// --- status ---

#[tokio::test]
async fn status_returns_requested_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/418").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_bytes(resp).await, "status 418");
}

#[tokio::test]
async fn status_rejects_out_of_range_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/1000").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_rejects_non_numeric_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/teapot").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- headers ---

#[tokio::test]
async fn headers_endpoint_sets_fixed_headers() {
    let resp = app()
        .oneshot(Request::builder().uri("/headers").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "text/plain");
    assert_eq!(resp.headers()["x-id"], "42");
    assert_eq!(body_bytes(resp).await, "fixed");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app()
        .oneshot(Request::builder().uri("/nowhere").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
