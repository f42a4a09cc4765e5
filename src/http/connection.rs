use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Bytes buffered while looking for the end of the request line.
pub const MAX_REQUEST_HEAD: usize = 8192;

/// One client connection, served exactly once and then closed.
pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    buffer: Vec<u8>,
    state: ConnectionState,
    router: Arc<Router>,
    read_timeout: Duration,
}

pub enum ConnectionState {
    Reading,
    Processing(Vec<u8>),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, router: Arc<Router>, read_timeout: Duration) -> Self {
        Self {
            stream,
            peer,
            buffer: Vec::with_capacity(1024),
            state: ConnectionState::Reading,
            router,
            read_timeout,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(raw) => {
                        self.state = ConnectionState::Processing(raw);
                    }
                    None => {
                        tracing::debug!(peer = %self.peer, "Client closed before sending a request");
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(raw) => {
                    let response = self.router.dispatch(raw).await;
                    let writer = ResponseWriter::new(&response)?;
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // HTTP/1.0: one request per connection
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    let _ = self.stream.shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the first line is complete, the peer stops sending, or
    /// [`MAX_REQUEST_HEAD`] bytes are buffered.
    ///
    /// Returns `None` when the peer closed without sending anything.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Vec<u8>>> {
        loop {
            if self.buffer.contains(&b'\n') || self.buffer.len() >= MAX_REQUEST_HEAD {
                return Ok(Some(std::mem::take(&mut self.buffer)));
            }

            let mut temp = [0u8; 1024];
            let n = timeout(self.read_timeout, self.stream.read(&mut temp))
                .await
                .context("timed out waiting for request")??;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(std::mem::take(&mut self.buffer)));
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}
