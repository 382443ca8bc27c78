//! Error types for counter lookups and proxy handling

use thiserror::Error;

/// Outcome of a share counter lookup
pub type CountResult = std::result::Result<u64, CountError>;

/// Reasons a share counter lookup can fail
#[derive(Error, Debug)]
pub enum CountError {
    /// The request could not be sent or returned a non-success status
    #[error("transport error: {0}")]
    Transport(String),

    #[error("empty response body")]
    EmptyBody,

    /// The body does not have the expected wrapper shape
    #[error("response does not match the expected pattern")]
    NoMatch,

    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing field `{0}` in response")]
    MissingField(String),

    /// Facebook answered for a different object than the one requested
    #[error("response id `{found}` does not match requested url `{expected}`")]
    IdMismatch { expected: String, found: String },

    #[error("invalid counter value: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("no proxy available: {0}")]
    ProxyUnavailable(#[from] ProxyError),

    #[error("gave up after {attempts} proxied attempts")]
    RetriesExhausted { attempts: usize },

    #[error("{0} does not expose a share counter")]
    Unsupported(String),
}

impl From<reqwest::Error> for CountError {
    fn from(err: reqwest::Error) -> Self {
        CountError::Transport(err.to_string())
    }
}

/// Errors raised by proxy suppliers and the proxy list parser
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("proxy pool is exhausted")]
    Exhausted,

    #[error("invalid proxy entry `{0}`")]
    InvalidEntry(String),

    #[error("unknown proxy type `{0}`, use: http, https, socks4, socks5")]
    UnknownType(String),

    #[error("failed to build client for proxy {proxy}: {reason}")]
    Client { proxy: String, reason: String },
}
