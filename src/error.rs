//! Error types for framing, cache validation, connections and startup.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

use crate::response::Outcome;

/// Failure to turn the bytes of a connection into a [`Request`](crate::request::Request).
#[derive(Debug, Error)]
pub enum FrameError {
    /// The peer closed the connection before the blank line arrived.
    #[error("connection closed after {buffered} bytes, before the header section was complete")]
    Incomplete { buffered: usize },

    #[error("header section exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("malformed header line {0:?}")]
    MalformedHeader(String),

    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

impl FrameError {
    /// The response owed to the client for this error, or `None` when the
    /// connection should simply be dropped.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::TooLarge { .. } | Self::MalformedRequestLine | Self::MalformedHeader(_) => {
                Some(Outcome::BadRequest)
            }
            Self::Incomplete { .. } | Self::Io(_) => None,
        }
    }
}

/// A conditional header whose value is not an IMF-fixdate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid HTTP date {0:?}")]
pub struct DateParseError(pub String);

/// Why a connection ended without a complete exchange.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("transport failure: {0}")]
    Transport(#[from] io::Error),

    #[error("{phase} deadline of {secs}s expired")]
    Timeout { phase: &'static str, secs: u64 },
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid listen address {0:?}")]
    Address(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}
