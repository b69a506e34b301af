//! Response outcomes and the header blocks they produce.

use std::fmt;
use std::time::SystemTime;

use crate::files::ServedFile;

pub const SERVER_NAME: &str = concat!("plainhttpd/", env!("CARGO_PKG_VERSION"));
pub const CACHE_CONTROL: &str = "Private, max-age=0";

/// The single decision made for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Ok { file: ServedFile, with_body: bool },
    NotModified,
    BadRequest,
    NotFound,
    PreconditionFailed,
    NotImplemented,
}

impl Outcome {
    pub const fn status(&self) -> Status {
        match self {
            Self::Continue => Status::Continue,
            Self::Ok { .. } => Status::Ok,
            Self::NotModified => Status::NotModified,
            Self::BadRequest => Status::BadRequest,
            Self::NotFound => Status::NotFound,
            Self::PreconditionFailed => Status::PreconditionFailed,
            Self::NotImplemented => Status::NotImplemented,
        }
    }

    /// The file whose bytes follow the header block, if any.
    pub const fn body(&self) -> Option<&ServedFile> {
        match self {
            Self::Ok { file, with_body: true } => Some(file),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Ok,
    NotModified,
    BadRequest,
    NotFound,
    PreconditionFailed,
    NotImplemented,
}

impl Status {
    pub const fn code(self) -> u16 {
        match self {
            Self::Continue => 100,
            Self::Ok => 200,
            Self::NotModified => 304,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::PreconditionFailed => 412,
            Self::NotImplemented => 501,
        }
    }

    pub const fn reason(self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::Ok => "OK",
            Self::NotModified => "Not Modified",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::PreconditionFailed => "Precondition Failed",
            Self::NotImplemented => "Not Implemented",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// Status line plus header fields, written out in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    status: Status,
    fields: Vec<(&'static str, String)>,
}

impl HeaderBlock {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.fields.push((name, value.into()));
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for HeaderBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/1.1 {}\r\n", self.status)?;
        for (name, value) in &self.fields {
            write!(f, "{name}: {value}\r\n")?;
        }
        f.write_str("\r\n")
    }
}

/// Builds the header block for `outcome` as of `now`.
pub fn build(outcome: &Outcome, now: SystemTime) -> HeaderBlock {
    let mut head = HeaderBlock::new(outcome.status());
    let date = httpdate::fmt_http_date(now);

    match outcome {
        Outcome::Ok { file, .. } => {
            head.push("Date", date.clone());
            head.push("Server", SERVER_NAME);
            head.push("Cache-Control", CACHE_CONTROL);
            head.push("Expires", date);
            head.push("Content-Type", file.mime_type);
            head.push("Content-Length", file.size.to_string());
        }
        Outcome::NotModified => head.push("Date", date),
        Outcome::BadRequest | Outcome::NotFound => {
            head.push("Date", date);
            head.push("Server", SERVER_NAME);
        }
        Outcome::Continue | Outcome::PreconditionFailed | Outcome::NotImplemented => {}
    }

    head
}
