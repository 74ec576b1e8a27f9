// ── Runtime connection configuration ──
//
// Describes *how* to reach a tenant. Carries credential data and
// connection tuning, never touches disk. `bwan-config` and the CLI build a
// `ServiceConfig` and hand it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Skip verification.
    DangerAcceptInvalid,
}

/// Configuration for talking to a single tenant.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Normalized tenant URL (e.g., `https://acme.api.goskope.com`).
    pub tenant_url: Url,
    /// Bearer token.
    pub api_token: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ServiceConfig {
    pub(crate) fn transport(&self) -> bwan_api::TransportConfig {
        bwan_api::TransportConfig {
            tls: match self.tls {
                TlsVerification::SystemDefaults => bwan_api::TlsMode::System,
                TlsVerification::DangerAcceptInvalid => bwan_api::TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
