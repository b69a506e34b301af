pub mod body;
pub mod conditional;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod files;
pub mod mime;
pub mod request;
pub mod response;
pub mod server;

pub use crate::config::Config;
pub use error::{ConnectionError, DateParseError, FrameError, ServerError};
pub use mime::mime_type;
pub use request::{Headers, Request};
pub use response::{HeaderBlock, Outcome, Status};
pub use server::Server;
