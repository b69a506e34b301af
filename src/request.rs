//! Request framing: raw connection bytes in, [`Request`] out.

use rustc_hash::FxHashMap;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::FrameError;

/// Blank line ending the header section.
pub const HEADER_END: &[u8] = b"\r\n\r\n";

/// Default cap on the size of the request line plus headers.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 64 * 1024;

const READ_CHUNK: usize = 1024;

/// Ordered header map. Names are compared case-sensitively; inserting a name
/// that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
    // name -> position in `entries`
    index: FxHashMap<String, usize>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A framed request. `method` and `target` are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub target: String,
    pub headers: Headers,
    /// Whatever followed the blank line in the bytes read so far.
    pub body: Vec<u8>,
}

impl Request {
    /// Frames a request out of `buf`, holding the header section to
    /// `max_header_bytes` (terminator included).
    ///
    /// Returns `Ok(None)` while the header section is still incomplete.
    pub fn parse(buf: &[u8], max_header_bytes: usize) -> Result<Option<Self>, FrameError> {
        Self::frame(buf, 0, max_header_bytes)
    }

    // Bytes before `scan_from` are known not to start the terminator.
    fn frame(buf: &[u8], scan_from: usize, max_header_bytes: usize) -> Result<Option<Self>, FrameError> {
        match find_header_end(&buf[scan_from..]).map(|pos| pos + scan_from) {
            Some(end) if end + HEADER_END.len() > max_header_bytes => {
                Err(FrameError::TooLarge { limit: max_header_bytes })
            }
            Some(end) => Self::from_parts(&buf[..end], &buf[end + HEADER_END.len()..]).map(Some),
            None if buf.len() >= max_header_bytes => Err(FrameError::TooLarge { limit: max_header_bytes }),
            None => Ok(None),
        }
    }

    fn from_parts(head: &[u8], body: &[u8]) -> Result<Self, FrameError> {
        let head = std::str::from_utf8(head).map_err(|_| FrameError::MalformedRequestLine)?;
        let mut lines = head.split("\r\n");

        // Only the method and target are consulted; the version token is ignored.
        let mut tokens = lines.next().unwrap_or_default().split_whitespace();
        let (method, target) = match (tokens.next(), tokens.next()) {
            (Some(method), Some(target)) => (method, target),
            _ => return Err(FrameError::MalformedRequestLine),
        };

        let mut headers = Headers::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| FrameError::MalformedHeader(line.to_owned()))?;
            headers.insert(name, value.trim());
        }

        Ok(Self {
            method: method.to_owned(),
            target: target.to_owned(),
            headers,
            body: body.to_vec(),
        })
    }
}

/// Offset of the CRLF CRLF terminator in `buf`, if present.
pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_END.len()).position(|w| w == HEADER_END)
}

/// Reads from `reader` until a full header section has arrived.
///
/// Bytes may arrive in increments of any size. A header section longer than
/// `max_header_bytes` (terminator included) fails with
/// [`FrameError::TooLarge`]; end-of-stream before the terminator fails with
/// [`FrameError::Incomplete`].
pub async fn read_request<R>(reader: &mut R, max_header_bytes: usize) -> Result<Request, FrameError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(FrameError::Incomplete { buffered: buf.len() });
        }

        // The terminator may straddle the previous read.
        let scan_from = buf.len().saturating_sub(HEADER_END.len() - 1);
        buf.extend_from_slice(&chunk[..n]);

        if let Some(request) = Request::frame(&buf, scan_from, max_header_bytes)? {
            return Ok(request);
        }
    }
}
