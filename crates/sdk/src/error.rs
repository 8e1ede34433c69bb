//! SDK Error Types
//!
//! Call failures coming back from the daemon carry Waitline wire codes;
//! they are mapped into typed variants so callers can match on queue
//! conditions (closed, empty, throttled) without comparing raw codes.

use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// Wire error codes assigned by the daemon
mod code {
    pub const VALIDATION: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const CONFLICT: i32 = 4002;
    pub const CLOSED: i32 = 4003;
    pub const QUEUE_EMPTY: i32 = 4004;
    pub const THROTTLED: i32 = 4005;
}

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Queue closed: {0}")]
    Closed(String),

    #[error("Queue empty: {0}")]
    QueueEmpty(String),

    #[error("Rate limited: {0}")]
    Throttled(String),

    /// Server-side failure (5xxx) or a code this SDK doesn't know
    #[error("Server error ({code}): {message}")]
    Server { code: i32, message: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<jsonrpsee::core::ClientError> for SdkError {
    fn from(e: jsonrpsee::core::ClientError) -> Self {
        match e {
            jsonrpsee::core::ClientError::Call(err) => {
                let message = err.message().to_string();
                match err.code() {
                    code::VALIDATION => SdkError::Validation(message),
                    code::NOT_FOUND => SdkError::NotFound(message),
                    code::CONFLICT => SdkError::Conflict(message),
                    code::CLOSED => SdkError::Closed(message),
                    code::QUEUE_EMPTY => SdkError::QueueEmpty(message),
                    code::THROTTLED => SdkError::Throttled(message),
                    other => SdkError::Server {
                        code: other,
                        message,
                    },
                }
            }
            jsonrpsee::core::ClientError::Transport(e) => SdkError::Transport(e.to_string()),
            jsonrpsee::core::ClientError::RestartNeeded(_) => {
                SdkError::Connection("Connection restart needed".to_string())
            }
            jsonrpsee::core::ClientError::ParseError(e) => {
                SdkError::Other(format!("Parse error: {}", e))
            }
            _ => SdkError::Other(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonrpsee::core::ClientError;
    use jsonrpsee::types::ErrorObject;

    fn call_error(code: i32, message: &str) -> SdkError {
        ClientError::Call(ErrorObject::owned(code, message, None::<()>)).into()
    }

    #[test]
    fn test_queue_codes_map_to_typed_variants() {
        assert!(matches!(call_error(4000, "bad slug"), SdkError::Validation(_)));
        assert!(matches!(call_error(4001, "no such business"), SdkError::NotFound(_)));
        assert!(matches!(call_error(4002, "slug taken"), SdkError::Conflict(_)));
        assert!(matches!(call_error(4003, "closed"), SdkError::Closed(_)));
        assert!(matches!(call_error(4004, "nobody waiting"), SdkError::QueueEmpty(_)));
        assert!(matches!(call_error(4005, "slow down"), SdkError::Throttled(_)));
    }

    #[test]
    fn test_unknown_code_falls_back_to_server_variant() {
        match call_error(5001, "database is locked") {
            SdkError::Server { code, message } => {
                assert_eq!(code, 5001);
                assert_eq!(message, "database is locked");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
