//! Request handlers
//!
//! - **`static_files`**: serves files below the document root
//! - **`cgi`**: runs programs below the CGI root and returns their output
//! - **`reaper`**: counts CGI children between spawn and reap

pub mod cgi;
pub mod reaper;
pub mod static_files;

pub use cgi::CgiInvoker;
pub use reaper::ChildRegistry;
pub use static_files::StaticFiles;
