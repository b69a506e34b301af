//! If-Modified-Since / If-Unmodified-Since evaluation.

use std::time::{Duration, SystemTime};

use httpdate::HttpDate;

use crate::error::DateParseError;
use crate::request::Headers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    IfModifiedSince,
    IfUnmodifiedSince,
}

impl Precondition {
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::IfModifiedSince => "If-Modified-Since",
            Self::IfUnmodifiedSince => "If-Unmodified-Since",
        }
    }

    /// The precondition a request carries, with its raw value.
    /// If-Modified-Since wins when both are present.
    pub fn find(headers: &Headers) -> Option<(Self, &str)> {
        [Self::IfModifiedSince, Self::IfUnmodifiedSince]
            .into_iter()
            .find_map(|kind| headers.get(kind.header_name()).map(|value| (kind, value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    SendBody,
    NotModified,
    PreconditionFailed,
}

/// Parses an IMF-fixdate such as `Sun, 06 Nov 1994 08:49:37 GMT`.
///
/// Only the canonical form is accepted: the obsolete RFC 850 and asctime
/// forms, single-digit days and weekdays that disagree with the date are
/// all rejected.
pub fn parse_http_date(value: &str) -> Result<SystemTime, DateParseError> {
    let parsed = value
        .parse::<HttpDate>()
        .map_err(|_| DateParseError(value.to_owned()))?;
    if parsed.to_string() != value {
        return Err(DateParseError(value.to_owned()));
    }
    Ok(parsed.into())
}

/// Decides whether the body of a file last modified at `modified_at` must be
/// sent, given the value of the `precondition` header.
pub fn evaluate(
    precondition: Precondition,
    value: &str,
    modified_at: SystemTime,
) -> Result<Verdict, DateParseError> {
    let requested = whole_seconds(parse_http_date(value)?);
    let changed_since = requested < whole_seconds(modified_at);

    Ok(match (precondition, changed_since) {
        (Precondition::IfModifiedSince, true) => Verdict::SendBody,
        (Precondition::IfModifiedSince, false) => Verdict::NotModified,
        (Precondition::IfUnmodifiedSince, true) => Verdict::PreconditionFailed,
        (Precondition::IfUnmodifiedSince, false) => Verdict::SendBody,
    })
}

// HTTP dates carry no sub-second part, so neither may the file's mtime.
fn whole_seconds(time: SystemTime) -> u64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs()
}
