use thiserror::Error;

/// Top-level error type for the `bwan-api` crate.
///
/// Separates the three ways a tenant call can go wrong: the request never
/// completed (transport), the tenant answered with a non-2xx status, or the
/// body did not have the expected shape. `bwan-core` maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Tenant rejected the bearer token (HTTP 401 / 403).
    #[error("Invalid API token (HTTP {status})")]
    InvalidApiToken { status: u16 },

    /// Token contains bytes that cannot be sent in an HTTP header.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Tenant API ──────────────────────────────────────────────────
    /// Non-2xx response from the tenant API.
    #[error("Tenant API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization or shape check failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never reached a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// HTTP status attached to this error, if the tenant answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidApiToken { status } | Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
