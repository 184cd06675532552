// Failure taxonomy shared across the crate. Startup-phase variants
// (Config, Transport, Api, Decode) terminate the process from `main`;
// Command is caught at the session dispatch boundary and rendered.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or incomplete credentials file.
    #[error("config error: {0}")]
    Config(String),
    /// The request never produced a response (timeout, refused connection).
    #[error("network error: {0}")]
    Transport(String),
    /// The API answered with a non-success status code.
    #[error("API request returned status {0}")]
    Api(u16),
    /// The API answered 2xx but the body was not the expected shape.
    #[error("malformed API response: {0}")]
    Decode(String),
    /// Unrecognized input or unknown ticket id. Always recoverable.
    #[error("{0}")]
    Command(String),
}
