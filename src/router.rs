//! Request dispatch
//!
//! Turns the raw bytes of a request into a [`RouteTarget`] and hands it to
//! the matching handler. The router never picks a status on its own apart
//! from rejecting an unparsable request line.

use crate::config::Config;
use crate::handler::{CgiInvoker, ChildRegistry, StaticFiles};
use crate::http::error::{self, error_response};
use crate::http::parser::parse_request_line;
use crate::http::request::RequestLine;
use crate::http::response::{Response, StatusCode};

/// Paths under this prefix name a program to run instead of a file.
pub const CGI_PREFIX: &str = "/cgi-like/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget<'a> {
    StaticFile {
        path: &'a str,
    },
    CgiInvocation {
        program: &'a str,
        query: Option<&'a str>,
    },
}

impl<'a> RouteTarget<'a> {
    /// Chooses the handler for a request path.
    ///
    /// For CGI paths the text after the prefix is split at the first `?`;
    /// the query stays absent when there is no `?` and empty when the `?`
    /// ends the path.
    pub fn from_path(path: &'a str) -> Self {
        match path.strip_prefix(CGI_PREFIX) {
            Some(rest) => match rest.split_once('?') {
                Some((program, query)) => RouteTarget::CgiInvocation {
                    program,
                    query: Some(query),
                },
                None => RouteTarget::CgiInvocation {
                    program: rest,
                    query: None,
                },
            },
            None => RouteTarget::StaticFile { path },
        }
    }
}

pub struct Router {
    static_files: StaticFiles,
    cgi: CgiInvoker,
}

impl Router {
    pub fn new(static_files: StaticFiles, cgi: CgiInvoker) -> Self {
        Self { static_files, cgi }
    }

    pub fn from_config(cfg: &Config, children: ChildRegistry) -> Self {
        Self::new(
            StaticFiles::new(&cfg.static_files),
            CgiInvoker::new(&cfg.cgi, children),
        )
    }

    /// Produces the response for the raw bytes received from a client.
    pub async fn dispatch(&self, raw: &[u8]) -> Response {
        let request = match parse_request_line(raw) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = ?e, "Malformed request line");
                return error_response(StatusCode::BadRequest, error::MALFORMED_REQUEST);
            }
        };

        let response = self.route(&request).await;

        tracing::info!(
            method = request.method.as_str(),
            path = %request.path,
            status = response.status.as_u16(),
            "Request handled"
        );

        response
    }

    async fn route(&self, request: &RequestLine) -> Response {
        match RouteTarget::from_path(&request.path) {
            RouteTarget::StaticFile { path } => self.static_files.handle(&request.method, path).await,
            RouteTarget::CgiInvocation { program, query } => {
                tracing::debug!(program, ?query, "Dispatching to CGI program");
                self.cgi.invoke(program, query).await
            }
        }
    }
}
