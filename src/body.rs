use std::future::Future;
use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::error::ConnectionError;

pub const CHUNK_SIZE: usize = 4096;

/// Copies at most `len` bytes of the file at `path` to `writer`, one chunk at
/// a time, and returns how many were written.
///
/// `len` is the `Content-Length` already announced; a file that grew since
/// it was stat'ed is cut off there so the message framing stays intact.
/// Each chunk gets its own `write_timeout`, so a slow client that keeps
/// draining is never cut off, while one that stops reading is.
pub async fn stream_file<W>(
    writer: &mut W,
    path: &Path,
    len: u64,
    write_timeout: Duration,
) -> Result<u64, ConnectionError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut file = File::open(path).await?.take(len);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;

    loop {
        let n = file.read(&mut chunk).await?;
        if n == 0 {
            return Ok(written);
        }
        within_write_deadline(write_timeout, writer.write_all(&chunk[..n])).await?;
        written += n as u64;
    }
}

/// Runs one write under `limit`.
pub(crate) async fn within_write_deadline<F, T>(limit: Duration, write: F) -> Result<T, ConnectionError>
where
    F: Future<Output = io::Result<T>>,
{
    timeout(limit, write)
        .await
        .map_err(|_| ConnectionError::Timeout {
            phase: "write",
            secs: limit.as_secs(),
        })?
        .map_err(ConnectionError::Transport)
}
