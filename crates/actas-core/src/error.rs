//! Error taxonomy: fatal roster errors and recoverable per-mesa fetch errors.

use std::fmt;
use std::path::PathBuf;

/// Roster could not be loaded. Ends the run before any request is made.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("roster file not found: {}", .path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("roster {} has no column named '{column}'", .path.display())]
    Schema { path: PathBuf, column: String },
    #[error("malformed roster {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Failure while fetching or saving one tally sheet. Never aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status.
    #[error("HTTP error {0}")]
    Http(u32),
    /// Connection, DNS, TLS or timeout failure reported by curl.
    #[error("connection/timeout error: {0}")]
    Network(#[source] curl::Error),
    #[error("failed to decode JSON response: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("failed to decode base64 image data: {0}")]
    InvalidBase64(#[source] base64::DecodeError),
    /// Response had no attachment or an empty image field.
    #[error("no base64 image data found")]
    MissingPayload,
    #[error("failed to write image: {0}")]
    Io(#[source] std::io::Error),
    #[error("unexpected error: {0}")]
    Unclassified(String),
}

/// Coarse failure classes used for reporting and the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    Http,
    Network,
    Decode,
    MissingPayload,
    Io,
    Unclassified,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Http(_) => FailureKind::Http,
            FetchError::Network(_) => FailureKind::Network,
            FetchError::InvalidJson(_) | FetchError::InvalidBase64(_) => FailureKind::Decode,
            FetchError::MissingPayload => FailureKind::MissingPayload,
            FetchError::Io(_) => FailureKind::Io,
            FetchError::Unclassified(_) => FailureKind::Unclassified,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Http => "http",
            FailureKind::Network => "network",
            FailureKind::Decode => "decode",
            FailureKind::MissingPayload => "missing-payload",
            FailureKind::Io => "io",
            FailureKind::Unclassified => "unclassified",
        };
        f.write_str(s)
    }
}

/// Map a curl error: transfer-level failures are network errors, setup failures are not.
pub fn classify_curl_error(e: curl::Error) -> FetchError {
    if e.is_operation_timedout()
        || e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return FetchError::Network(e);
    }
    FetchError::Unclassified(format!("curl: {e}"))
}
