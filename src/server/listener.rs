use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::handler::ChildRegistry;
use crate::http::connection::Connection;
use crate::router::Router;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.server).await?;
    info!("Listening on {}", cfg.server.listen_addr());

    serve(listener, cfg).await
}

/// Binds the listening socket with the configured backlog.
pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let listen_addr = cfg.listen_addr();
    let addr = tokio::net::lookup_host(listen_addr.as_str())
        .await
        .with_context(|| format!("failed to resolve {}", listen_addr))?
        .next()
        .with_context(|| format!("no address found for {}", listen_addr))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("failed to bind {}", addr))?;

    socket.listen(cfg.backlog).context("listen failed")
}

/// Accepts connections forever, one task per connection.
///
/// At most `max_connections` tasks run at once; beyond that the loop waits
/// and further clients queue in the backlog.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let children = ChildRegistry::new();
    let router = Arc::new(Router::from_config(cfg, children));
    let limiter = Arc::new(Semaphore::new(cfg.server.max_connections));
    let read_timeout = cfg.server.read_timeout();

    loop {
        let permit = Arc::clone(&limiter).acquire_owned().await?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Accept failed: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, peer, router, read_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}
