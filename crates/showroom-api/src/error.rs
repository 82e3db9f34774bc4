use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `showroom-api` crate.
///
/// Separates network-layer failures (the request never produced a usable
/// HTTP answer) from application-layer failures (the backend answered with
/// a non-success status or a body that breaks the response contract).
/// `showroom-core` maps these into user-facing categories.
#[derive(Debug, Error)]
pub enum Error {
    // ── Local pre-checks ────────────────────────────────────────────
    /// Identifier is zero or negative. Raised before any network call.
    #[error("Invalid identifier: {id} (must be a positive integer)")]
    InvalidId { id: i64 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request cancelled after exceeding the client-side time budget.
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Configured project key cannot be sent as a header value.
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Application ─────────────────────────────────────────────────
    /// Non-success status from a resource endpoint, with the parsed
    /// `{ error, code }` body when one was present.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// The backend answered 200 but explicitly reported `success: false`.
    #[error("Operation rejected: {message}")]
    Rejected { message: String },

    /// The body parsed as JSON but does not follow the response contract
    /// (missing `success` discriminant, missing collection key, ...).
    #[error("Unexpected response shape: {message}")]
    UnexpectedResponse { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

/// Backend codes meaning the target row does not exist (any more).
pub const NOT_FOUND_CODES: &[&str] = &["not_found", "gone"];

/// Backend codes meaning the request payload was refused.
pub const VALIDATION_CODES: &[&str] = &["validation_failed", "invalid_json", "invalid_id"];

/// Backend codes meaning the backend itself failed.
pub const SERVER_CODES: &[&str] = &["server_error", "misconfigured"];

// Unknown codes fall back to status-based classification.
fn known_code(code: Option<&str>) -> Option<&str> {
    code.filter(|c| {
        NOT_FOUND_CODES.contains(c) || VALIDATION_CODES.contains(c) || SERVER_CODES.contains(c)
    })
}

impl Error {
    /// Returns `true` if the request never reached a usable HTTP answer.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` for "not found" and "already deleted" answers.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status, code, .. } => match known_code(code.as_deref()) {
                Some(code) => NOT_FOUND_CODES.contains(&code),
                None => matches!(status, 404 | 410),
            },
            _ => false,
        }
    }

    /// Returns `true` when the payload or identifier itself was refused.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::InvalidId { .. } => true,
            Self::Api { status, code, .. } => match known_code(code.as_deref()) {
                Some(code) => VALIDATION_CODES.contains(&code),
                None => matches!(status, 400 | 422),
            },
            _ => false,
        }
    }

    /// HTTP status of an application-layer failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Extract the structured backend error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
