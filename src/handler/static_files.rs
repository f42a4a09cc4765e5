//! Static file serving
//!
//! Files are looked up by plain concatenation of the document root and the
//! request path. Every successful reply is labelled `text/html`, whatever
//! the file holds.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::StaticFilesConfig;
use crate::http::error::{self, error_response};
use crate::http::request::Method;
use crate::http::response::{Response, StatusCode, TEXT_HTML};

/// Serves files below a fixed document root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(config: &StaticFilesConfig) -> Self {
        Self {
            root: config.root.clone(),
        }
    }

    /// Maps a request path onto the filesystem (`root + path`).
    pub fn resolve(&self, path: &str) -> PathBuf {
        let mut full = OsString::from(self.root.as_os_str());
        full.push(path);
        PathBuf::from(full)
    }

    pub async fn handle(&self, method: &Method, path: &str) -> Response {
        // Substring check only, no canonicalization
        if path.contains("..") {
            tracing::warn!(path, "Rejected path traversal attempt");
            return error_response(StatusCode::Forbidden, error::ACCESS_DENIED);
        }

        let file_path = self.resolve(path);

        let metadata = match tokio::fs::metadata(&file_path).await {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(file = %file_path.display(), error = %e, "File lookup failed");
                return error_response(StatusCode::NotFound, error::FILE_NOT_FOUND);
            }
        };

        match method {
            Method::HEAD => Response::headers_only(StatusCode::Ok, TEXT_HTML, metadata.len()),
            Method::GET => match tokio::fs::read(&file_path).await {
                Ok(contents) => Response::ok(contents),
                Err(e) => {
                    tracing::warn!(file = %file_path.display(), error = %e, "Failed to read file");
                    error_response(StatusCode::InternalServerError, error::FILE_OPEN_FAILED)
                }
            },
            _ => error_response(StatusCode::NotImplemented, error::METHOD_NOT_SUPPORTED),
        }
    }
}
