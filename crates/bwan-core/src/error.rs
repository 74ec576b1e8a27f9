// ── Core error types ──
//
// User-facing errors from bwan-core. Consumers never match on reqwest or
// serde errors directly; the `From<bwan_api::Error>` impl sorts
// transport-layer failures into network, status, and shape kinds.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Network errors ───────────────────────────────────────────────
    #[error("Cannot connect to tenant at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── API errors ───────────────────────────────────────────────────
    #[error("Tenant API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed tenant response: {message}")]
    MalformedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Control flow ─────────────────────────────────────────────────
    #[error("Operation cancelled")]
    Cancelled,
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<bwan_api::Error> for CoreError {
    fn from(err: bwan_api::Error) -> Self {
        match err {
            bwan_api::Error::InvalidApiToken { status } => CoreError::AuthenticationFailed {
                message: format!("tenant rejected the API token (HTTP {status})"),
            },
            bwan_api::Error::InvalidHeader(message) => CoreError::Config { message },
            bwan_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if let Some(status) = e.status() {
                    CoreError::Api {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                }
            }
            bwan_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            bwan_api::Error::Tls(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason,
            },
            bwan_api::Error::Api { status, message } => CoreError::Api { status, message },
            bwan_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}
