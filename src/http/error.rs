//! Standard HTML error pages.

use crate::http::response::{Response, StatusCode, TEXT_HTML};

pub const MALFORMED_REQUEST: &str = "Malformed request line.";
pub const ACCESS_DENIED: &str = "Access denied.";
pub const FILE_NOT_FOUND: &str = "File not found.";
pub const FILE_OPEN_FAILED: &str = "Failed to open file.";
pub const METHOD_NOT_SUPPORTED: &str = "Method not supported.";
pub const CGI_NOT_FOUND: &str = "CGI program not found or not executable.";
pub const CGI_SPAWN_FAILED: &str = "Failed to start CGI program.";
pub const CGI_EXECUTION_FAILED: &str = "CGI execution failed.";

pub fn error_body(status: StatusCode, message: &str) -> String {
    format!(
        "<html><body><h1>{}</h1><p>{}</p></body></html>",
        status, message
    )
}

/// Builds a `text/html` error response for `status` with `message` as its text.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    Response::new(status, TEXT_HTML, error_body(status, message))
}
