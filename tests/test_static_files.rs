//! Tests for the static file handler

mod common;

use cgilite::handler::StaticFiles;
use cgilite::http::request::Method;
use cgilite::http::response::{StatusCode, TEXT_HTML};

fn handler() -> StaticFiles {
    StaticFiles::new(&common::fixture().config().static_files)
}

fn body_text(response: &cgilite::http::response::Response) -> String {
    String::from_utf8_lossy(response.body.as_deref().unwrap_or_default()).into_owned()
}

#[tokio::test]
async fn test_get_existing_file() {
    let response = handler().handle(&Method::GET, "/index.html").await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.content_type, TEXT_HTML);
    assert_eq!(response.content_length, 2);
    assert_eq!(response.body.as_deref(), Some(&b"hi"[..]));
}

#[tokio::test]
async fn test_get_nested_file_is_still_text_html() {
    let response = handler().handle(&Method::GET, "/sub/page.txt").await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.content_type, "text/html");
    assert_eq!(body_text(&response), "plain text");
}

#[tokio::test]
async fn test_get_binary_file_is_byte_exact() {
    let response = handler().handle(&Method::GET, "/binary.bin").await;

    assert_eq!(response.body.as_deref(), Some(&[0u8, 1, 2, 255, 254][..]));
}

#[tokio::test]
async fn test_head_reports_size_without_body() {
    let response = handler().handle(&Method::HEAD, "/other.html").await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.content_length, "<p>other page</p>".len() as u64);
    assert!(response.body.is_none());
}

#[tokio::test]
async fn test_zero_length_file() {
    let response = handler().handle(&Method::GET, "/empty.html").await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.content_length, 0);
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let response = handler().handle(&Method::GET, "/missing.html").await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(body_text(&response).contains("File not found."));
}

#[tokio::test]
async fn test_query_string_is_part_of_file_name() {
    let response = handler().handle(&Method::GET, "/index.html?x=1").await;

    assert_eq!(response.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_dot_dot_is_forbidden_even_if_target_exists() {
    for path in ["/../secret.txt", "/sub/../index.html", "/..", "/a..b"] {
        let response = handler().handle(&Method::GET, path).await;
        assert_eq!(response.status, StatusCode::Forbidden, "path: {}", path);
        assert!(body_text(&response).contains("Access denied."));
    }
}

#[tokio::test]
async fn test_dot_dot_check_precedes_method_check() {
    let response = handler().handle(&Method::POST, "/../secret.txt").await;

    assert_eq!(response.status, StatusCode::Forbidden);
}

#[tokio::test]
async fn test_other_methods_are_not_implemented() {
    for method in [
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
        Method::PATCH,
        Method::Extension("BREW".to_string()),
    ] {
        let response = handler().handle(&method, "/index.html").await;
        assert_eq!(response.status, StatusCode::NotImplemented, "method: {:?}", method);
        assert!(body_text(&response).contains("Method not supported."));
    }
}

#[tokio::test]
async fn test_get_directory_is_internal_error() {
    let response = handler().handle(&Method::GET, "/sub").await;

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert!(body_text(&response).contains("Failed to open file."));
}

#[tokio::test]
async fn test_repeated_get_is_identical() {
    let first = handler().handle(&Method::GET, "/other.html").await;
    let second = handler().handle(&Method::GET, "/other.html").await;

    assert_eq!(first.body, second.body);
    assert_eq!(first.content_length, second.content_length);
}

#[test]
fn test_resolve_concatenates_root_and_path() {
    let files = handler();
    let root = common::fixture().www.display().to_string();

    assert_eq!(
        files.resolve("/index.html").display().to_string(),
        format!("{}/index.html", root)
    );
}
