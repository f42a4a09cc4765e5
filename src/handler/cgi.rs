//! CGI-like program execution
//!
//! A program under the CGI root is run with the raw query string as its
//! only argument. Its standard output, up to the capture limit, becomes the
//! response body. Nothing else about the request is passed to the child.

use std::ffi::OsString;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::time::timeout;

use crate::config::CgiConfig;
use crate::handler::reaper::ChildRegistry;
use crate::http::error::{self, error_response};
use crate::http::response::{Response, StatusCode};

/// Runs programs from the CGI root on behalf of requests.
#[derive(Debug, Clone)]
pub struct CgiInvoker {
    root: PathBuf,
    capture_limit: usize,
    timeout: Duration,
    children: ChildRegistry,
}

impl CgiInvoker {
    pub fn new(config: &CgiConfig, children: ChildRegistry) -> Self {
        Self {
            root: config.root.clone(),
            capture_limit: config.capture_limit,
            timeout: config.timeout(),
            children,
        }
    }

    /// Maps a program segment onto the filesystem (`root + "/" + program`).
    pub fn resolve(&self, program: &str) -> PathBuf {
        let mut full = OsString::from(self.root.as_os_str());
        full.push("/");
        full.push(program);
        PathBuf::from(full)
    }

    pub fn children(&self) -> &ChildRegistry {
        &self.children
    }

    pub async fn invoke(&self, program: &str, query: Option<&str>) -> Response {
        if program.contains("..") {
            tracing::warn!(program, "Rejected path traversal attempt");
            return error_response(StatusCode::Forbidden, error::ACCESS_DENIED);
        }

        let program_path = self.resolve(program);
        if !is_executable(&program_path).await {
            tracing::debug!(program = %program_path.display(), "CGI program missing or not executable");
            return error_response(StatusCode::NotFound, error::CGI_NOT_FOUND);
        }

        let mut command = Command::new(&program_path);
        if let Some(query) = query {
            command.arg(query);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            // Mode bits passed but the kernel refused exec (noexec mount, ACL,
            // foreign owner, non-executable interpreter)
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::warn!(program = %program_path.display(), error = %e, "CGI program not executable");
                return error_response(StatusCode::NotFound, error::CGI_NOT_FOUND);
            }
            Err(e) => {
                tracing::warn!(program = %program_path.display(), error = %e, "Failed to spawn CGI program");
                return error_response(StatusCode::InternalServerError, error::CGI_SPAWN_FAILED);
            }
        };

        let pid = child.id();
        let _registration = self.children.register(pid);
        let outcome = timeout(self.timeout, collect(&mut child, self.capture_limit)).await;

        let captured = match outcome {
            Ok((captured, status)) => {
                match status {
                    Ok(status) => tracing::debug!(?pid, %status, "CGI program exited"),
                    Err(e) => tracing::warn!(?pid, error = %e, "Failed to wait for CGI program"),
                }
                captured
            }
            Err(_) => {
                tracing::warn!(
                    ?pid,
                    timeout_secs = self.timeout.as_secs(),
                    "CGI program timed out, killing it"
                );
                if let Err(e) = child.kill().await {
                    tracing::error!(?pid, error = %e, "Failed to kill CGI program");
                }
                return error_response(StatusCode::InternalServerError, error::CGI_EXECUTION_FAILED);
            }
        };

        match captured {
            Ok(body) if !body.is_empty() => Response::ok(body),
            Ok(_) => {
                tracing::warn!(program = %program_path.display(), "CGI program produced no output");
                error_response(StatusCode::InternalServerError, error::CGI_EXECUTION_FAILED)
            }
            Err(e) => {
                tracing::warn!(program = %program_path.display(), error = %e, "Failed to read CGI output");
                error_response(StatusCode::InternalServerError, error::CGI_EXECUTION_FAILED)
            }
        }
    }
}

async fn collect(child: &mut Child, limit: usize) -> (io::Result<Bytes>, io::Result<ExitStatus>) {
    let captured = match child.stdout.take() {
        Some(out) => capture_output(out, limit).await,
        None => Ok(Bytes::new()),
    };
    // The read end is closed by now, so a child still writing gets EPIPE
    let status = child.wait().await;
    (captured, status)
}

/// Reads until EOF or until `limit` bytes are held, whichever comes first.
/// Anything the reader has beyond `limit` is left unread.
pub async fn capture_output<R>(reader: R, limit: usize) -> io::Result<Bytes>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = BytesMut::with_capacity(limit);
    let mut reader = reader.take(limit as u64);

    loop {
        let n = reader.read_buf(&mut buffer).await?;
        if n == 0 {
            break;
        }
    }

    Ok(buffer.freeze())
}

/// Cheap pre-check on metadata. Directories are never programs; the final
/// word on execute permission belongs to `spawn`.
async fn is_executable(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(m) => m.is_file() && m.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
