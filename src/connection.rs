//! One connection, one request, one response, then close.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::SystemTime;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::body;
use crate::config::Config;
use crate::dispatch;
use crate::error::{ConnectionError, FrameError};
use crate::request::read_request;
use crate::response::{self, Outcome, Status};

/// What was served on a connection, for the access log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub method: String,
    pub target: String,
    pub status: Status,
    pub body_bytes: u64,
}

/// Serves a single request on an accepted socket and closes it.
pub async fn serve<S>(mut stream: S, peer: SocketAddr, config: Arc<Config>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match handle_connection(&mut stream, &config).await {
        Ok(exchange) => info!(
            %peer,
            method = %exchange.method,
            target_uri = %exchange.target,
            status = exchange.status.code(),
            bytes = exchange.body_bytes,
            "request served"
        ),
        Err(ConnectionError::Frame(err @ FrameError::Incomplete { .. })) => {
            debug!(%peer, %err, "connection dropped before a request was framed");
        }
        Err(err) => warn!(%peer, %err, "connection aborted"),
    }

    // Best effort: the peer may already be gone.
    let _ = stream.shutdown().await;
}

/// Reads one request from `stream` and writes its response.
///
/// Framing errors that have a 4xx answer are answered; every other failure
/// is returned without anything having been written.
pub async fn handle_connection<S>(stream: &mut S, config: &Config) -> Result<Exchange, ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin + ?Sized,
{
    let limits = &config.limits;
    let framed = timeout(limits.read_timeout(), read_request(stream, limits.max_header_bytes))
        .await
        .map_err(|_| ConnectionError::Timeout {
            phase: "read",
            secs: limits.read_timeout_secs,
        })?;

    let request = match framed {
        Ok(request) => request,
        Err(err) => {
            let Some(outcome) = err.outcome() else {
                return Err(err.into());
            };
            debug!(%err, "rejecting unframeable request");
            let body_bytes = respond(stream, &outcome, config).await?;
            return Ok(Exchange {
                method: "-".to_owned(),
                target: "-".to_owned(),
                status: outcome.status(),
                body_bytes,
            });
        }
    };

    let outcome = dispatch::dispatch(&request, &config.server.root).await;
    let body_bytes = respond(stream, &outcome, config).await?;

    Ok(Exchange {
        method: request.method,
        target: request.target,
        status: outcome.status(),
        body_bytes,
    })
}

async fn respond<S>(stream: &mut S, outcome: &Outcome, config: &Config) -> Result<u64, ConnectionError>
where
    S: AsyncWrite + Unpin + ?Sized,
{
    let head = response::build(outcome, SystemTime::now());
    let limit = config.limits.write_timeout();

    body::within_write_deadline(limit, stream.write_all(&head.to_bytes())).await?;
    let written = match outcome.body() {
        Some(file) => body::stream_file(stream, &file.path, file.size, limit).await?,
        None => 0,
    };
    body::within_write_deadline(limit, stream.flush()).await?;

    Ok(written)
}
