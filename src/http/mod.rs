//! HTTP/1.0 protocol implementation.
//!
//! Only the request line is ever parsed; headers and bodies sent by the
//! client are ignored, and every connection carries exactly one exchange.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine driving read, dispatch and write
//! - **`parser`**: extracts the request line from the received bytes
//! - **`request`**: method and request-line types
//! - **`response`**: status codes and the response value
//! - **`error`**: standard HTML error pages
//! - **`writer`**: frames a response and writes it to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Line received (or peer closed → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route to file or CGI handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send status line, headers, body
//!        └──────┬───────────┘
//!               │
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod error;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
