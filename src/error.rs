// Error types for the kcnotif core.
// Separates transport, remote status, decode and local store failures.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KcError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    RemoteStatus { status: StatusCode, url: String },

    #[error("invalid JSON in response (HTTP {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored document '{name}' is corrupt: {source}")]
    CorruptStore {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("invalid path identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    #[error("JSON encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`KcError`], for callers that branch on
/// the failure category rather than the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    RemoteStatus,
    Decode,
    CorruptStore,
    MissingField,
    InvalidInput,
    Io,
}

impl KcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KcError::Network(_) => ErrorKind::Network,
            KcError::RemoteStatus { .. } => ErrorKind::RemoteStatus,
            KcError::Decode { .. } => ErrorKind::Decode,
            KcError::CorruptStore { .. } => ErrorKind::CorruptStore,
            KcError::MissingField(_) => ErrorKind::MissingField,
            KcError::UnknownService(_)
            | KcError::InvalidIdentifier(_)
            | KcError::InvalidUrl(_)
            | KcError::InvalidHeader(_)
            | KcError::Encode(_) => ErrorKind::InvalidInput,
            KcError::Io(_) => ErrorKind::Io,
        }
    }

    /// HTTP status attached to the failure, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            KcError::RemoteStatus { status, .. } | KcError::Decode { status, .. } => Some(*status),
            KcError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the failure was a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, KcError::Network(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, KcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_status() {
        let err = KcError::RemoteStatus {
            status: StatusCode::NOT_FOUND,
            url: "https://kemono.su/api/v1/creators.txt".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::RemoteStatus);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(!err.is_timeout());

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = KcError::CorruptStore {
            name: "saved_data".to_string(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::CorruptStore);
        assert_eq!(err.status(), None);
    }
}
