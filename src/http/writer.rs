use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.0";

/// Upper bound for the status line plus headers.
pub const MAX_HEADER_SIZE: usize = 512;

fn serialize_header(resp: &Response) -> anyhow::Result<Vec<u8>> {
    let header = format!(
        "{} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        HTTP_VERSION, resp.status, resp.content_type, resp.content_length
    );

    anyhow::ensure!(
        header.len() <= MAX_HEADER_SIZE,
        "response header is {} bytes, limit is {}",
        header.len(),
        MAX_HEADER_SIZE
    );

    Ok(header.into_bytes())
}

/// Serializes a response into its exact wire form.
///
/// The body is appended only when it is present and the announced length is
/// non-zero, so HEAD replies carry headers alone.
pub fn serialize_response(resp: &Response) -> anyhow::Result<Vec<u8>> {
    let mut buf = serialize_header(resp)?;

    if let Some(body) = &resp.body {
        if resp.content_length > 0 {
            buf.extend_from_slice(body);
        }
    }

    Ok(buf)
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> anyhow::Result<Self> {
        Ok(Self {
            buffer: serialize_response(response)?,
            written: 0,
        })
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
