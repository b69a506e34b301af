//! Method dispatch: one [`Outcome`] per framed request.

use std::path::Path;

use tracing::debug;

use crate::conditional::{self, Precondition, Verdict};
use crate::files;
use crate::request::Request;
use crate::response::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
}

impl Method {
    /// Recognizes the standard method tokens. Matching is case-sensitive.
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "CONNECT" => Self::Connect,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            _ => return None,
        })
    }

    pub const fn is_served(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

/// Decides the response for `request` against the files under `root`.
pub async fn dispatch(request: &Request, root: &Path) -> Outcome {
    let method = match Method::parse(&request.method) {
        Some(method) if method.is_served() => method,
        Some(_) => return Outcome::NotImplemented,
        None => return Outcome::BadRequest,
    };

    // 100-continue is never negotiated.
    if request.headers.contains("Expect") {
        return Outcome::BadRequest;
    }

    let path = files::resolve_target(root, &request.target);
    let file = match files::locate(path).await {
        Ok(file) => file,
        Err(err) => {
            debug!(target_uri = %request.target, %err, "target not found");
            return Outcome::NotFound;
        }
    };

    if method == Method::Head {
        return Outcome::Ok { file, with_body: false };
    }

    let Some((precondition, value)) = Precondition::find(&request.headers) else {
        return Outcome::Ok { file, with_body: true };
    };

    match conditional::evaluate(precondition, value, file.modified_at) {
        Ok(Verdict::SendBody) => Outcome::Ok { file, with_body: true },
        Ok(Verdict::NotModified) => Outcome::NotModified,
        Ok(Verdict::PreconditionFailed) => Outcome::PreconditionFailed,
        Err(err) => {
            debug!(header = precondition.header_name(), %err, "rejecting conditional request");
            Outcome::BadRequest
        }
    }
}
