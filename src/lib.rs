//! cgilite - minimal HTTP/1.0 server
//!
//! Serves static files and runs CGI-like programs, one request per
//! connection.

pub mod config;
pub mod handler;
pub mod http;
pub mod router;
pub mod server;
