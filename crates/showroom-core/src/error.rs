// ── Core error types ──
//
// Errors surfaced by showroom-core. Consumers never match on HTTP
// statuses or JSON failures directly: `From<showroom_api::Error>` folds
// transport-layer errors into domain variants, and every variant maps to
// one `ErrorKind` used for banners and operation outcomes.

use std::time::Duration;

use thiserror::Error;

/// Coarse failure category shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ErrorKind {
    /// Backend unreachable or too slow. Never retried automatically.
    Network,
    /// Target row missing locally or on the backend (404 / 410).
    NotFound,
    /// Input refused, locally or by the backend (400 / 422).
    Validation,
    /// Backend failure or a response that breaks the contract.
    Server,
    /// Client configuration problem.
    Config,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the backend: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Backend did not answer within {timeout:?}")]
    Timeout { timeout: Duration },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("This {resource} no longer exists (id {id})")]
    NoLongerExists { resource: &'static str, id: i64 },

    // ── Validation errors ────────────────────────────────────────────
    #[error("Invalid identifier: {id}")]
    InvalidId { id: i64 },

    #[error("Required field is empty: {field}")]
    MissingField { field: &'static str },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Backend errors ───────────────────────────────────────────────
    #[error("Operation rejected by backend: {message}")]
    Rejected { message: String },

    #[error("Server error: {message}")]
    Server {
        message: String,
        /// Structured backend code, when the error body carried one.
        code: Option<String>,
        status: Option<u16>,
    },

    #[error("Unexpected response from backend: {message}")]
    UnexpectedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Category used for banners and [`Outcome::Failed`](crate::Outcome::Failed).
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => ErrorKind::Network,
            Self::NotFound { .. } | Self::NoLongerExists { .. } => ErrorKind::NotFound,
            Self::InvalidId { .. } | Self::MissingField { .. } | Self::ValidationFailed { .. } => {
                ErrorKind::Validation
            }
            Self::Rejected { .. } | Self::Server { .. } | Self::UnexpectedResponse { .. } => {
                ErrorKind::Server
            }
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Returns `true` when the error says the target row is gone.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<showroom_api::Error> for CoreError {
    fn from(err: showroom_api::Error) -> Self {
        use showroom_api::Error as Api;

        // Classification reads status and code only, never message text.
        let not_found = err.is_not_found();
        let validation = err.is_validation();

        match err {
            Api::InvalidId { id } => CoreError::InvalidId { id },
            Api::Transport(e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            Api::Timeout { timeout } => CoreError::Timeout { timeout },
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::Tls(message) => CoreError::Config {
                message: format!("TLS error: {message}"),
            },
            Api::InvalidApiKey { message } => CoreError::Config {
                message: format!("Invalid API key: {message}"),
            },
            Api::Api { message, .. } if not_found => CoreError::NotFound { message },
            Api::Api { message, .. } if validation => CoreError::ValidationFailed { message },
            Api::Api {
                status,
                message,
                code,
            } => CoreError::Server {
                message,
                code,
                status: Some(status),
            },
            Api::Rejected { message } => CoreError::Rejected { message },
            Api::UnexpectedResponse { message } | Api::Deserialization { message, .. } => {
                CoreError::UnexpectedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: Option<&str>) -> showroom_api::Error {
        showroom_api::Error::Api {
            status,
            message: "boom".into(),
            code: code.map(str::to_owned),
        }
    }

    #[test]
    fn statuses_map_to_kinds() {
        assert_eq!(CoreError::from(api(404, None)).kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::from(api(410, None)).kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::from(api(422, None)).kind(), ErrorKind::Validation);
        assert_eq!(CoreError::from(api(400, None)).kind(), ErrorKind::Validation);
        assert_eq!(CoreError::from(api(500, None)).kind(), ErrorKind::Server);
        assert_eq!(CoreError::from(api(503, None)).kind(), ErrorKind::Server);
    }

    #[test]
    fn structured_code_decides_over_status() {
        let err = CoreError::from(api(400, Some("gone")));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn message_text_is_not_used_for_classification() {
        let err = CoreError::from(showroom_api::Error::Api {
            status: 500,
            message: "row not found".into(),
            code: None,
        });
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn local_and_network_failures() {
        let invalid = CoreError::from(showroom_api::Error::InvalidId { id: 0 });
        assert_eq!(invalid.kind(), ErrorKind::Validation);

        let timeout = CoreError::from(showroom_api::Error::Timeout {
            timeout: Duration::from_secs(30),
        });
        assert_eq!(timeout.kind(), ErrorKind::Network);
        assert_eq!(timeout.to_string(), "Backend did not answer within 30s");
    }

    #[test]
    fn explicit_rejection_is_a_server_failure() {
        let err = CoreError::from(showroom_api::Error::Rejected {
            message: "refusé".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Server);
    }
}
