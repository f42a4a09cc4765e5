use crate::http::request::{Method, RequestLine};

pub const MAX_METHOD_LEN: usize = 15;
pub const MAX_PATH_LEN: usize = 255;
pub const MAX_VERSION_LEN: usize = 15;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than three tokens on the first line
    MissingToken,
    /// A token exceeds its length cap
    TokenTooLong,
    /// First line is not valid UTF-8
    InvalidEncoding,
}

/// Parses the request line out of the bytes received so far.
///
/// Only the first line is inspected. Tokens are separated by ASCII
/// whitespace; tokens past the third are ignored.
pub fn parse_request_line(buf: &[u8]) -> Result<RequestLine, ParseError> {
    let line = match buf.iter().position(|&b| b == b'\n') {
        Some(end) => &buf[..end],
        None => buf,
    };

    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
    let mut parts = line.split_ascii_whitespace();

    let method = next_token(&mut parts, MAX_METHOD_LEN)?;
    let path = next_token(&mut parts, MAX_PATH_LEN)?;
    let version = next_token(&mut parts, MAX_VERSION_LEN)?;

    Ok(RequestLine {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
    })
}

fn next_token<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    max_len: usize,
) -> Result<&'a str, ParseError> {
    let token = parts.next().ok_or(ParseError::MissingToken)?;
    if token.len() > max_len {
        return Err(ParseError::TokenTooLong);
    }
    Ok(token)
}
