//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use bwan_config::ConfigError;
use bwan_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const API: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to tenant at {url}")]
    #[diagnostic(
        code(bwan::connection_failed),
        help(
            "{reason}\n\
             Check the tenant URL and your network. For self-signed\n\
             certificates, try --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(bwan::timeout),
        help("Increase the timeout with --timeout or check tenant responsiveness.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(bwan::auth_failed),
        help(
            "Verify the API token in ~/.bwanEdges.conf or pass a new one\n\
             with --api_token (-t)."
        )
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(bwan::not_found),
        help("Run: bwan-edges {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Tenant API error (HTTP {status}): {message}")]
    #[diagnostic(code(bwan::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from tenant: {message}")]
    #[diagnostic(
        code(bwan::malformed_response),
        help("Make sure the tenant URL points at the API host, e.g. https://acme.api.goskope.com")
    )]
    MalformedResponse { message: String },

    #[error("Failed to delete {failed} of {total} edge(s)")]
    #[diagnostic(
        code(bwan::bulk_delete_failed),
        help("Failed IDs: {ids}\nRe-run with -r <ID> to retry them one at a time.")
    )]
    BulkDeleteFailed {
        failed: usize,
        total: usize,
        ids: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration value for {field}: {reason}")]
    #[diagnostic(
        code(bwan::invalid_config),
        help("Fix {field} on the command line or in the [bwan_config] section.")
    )]
    InvalidConfig { field: String, reason: String },

    #[error("No {field} configured")]
    #[diagnostic(
        code(bwan::missing_config),
        help(
            "Pass --{field} on the command line, or add it to the\n\
             [bwan_config] section of {path}"
        )
    )]
    MissingConfig { field: String, path: String },

    #[error("Configuration file not found")]
    #[diagnostic(code(bwan::no_config), help("Expected at: {path}"))]
    NoConfig { path: String },

    #[error("Can't parse configuration file: {message}")]
    #[diagnostic(
        code(bwan::config),
        help("Expected INI: a [bwan_config] section with tenant_url=... and api_token=... lines.")
    )]
    ConfigParse { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(bwan::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Interrupted")]
    #[diagnostic(code(bwan::interrupted))]
    Interrupted,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    #[diagnostic(code(bwan::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode YAML: {0}")]
    #[diagnostic(code(bwan::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write CSV: {0}")]
    #[diagnostic(code(bwan::csv))]
    Csv(#[from] csv::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. }
            | Self::ApiError { .. }
            | Self::MalformedResponse { .. }
            | Self::BulkDeleteFailed { .. } => exit_code::API,
            Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Interrupted => exit_code::INTERRUPTED,
            Self::InvalidConfig { .. }
            | Self::MissingConfig { .. }
            | Self::NoConfig { .. }
            | Self::ConfigParse { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Yaml(_)
            | Self::Csv(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError ─────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { url } => Self::Timeout { url },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Api { status, message } => Self::ApiError { status, message },
            CoreError::MalformedResponse { message } => Self::MalformedResponse { message },
            CoreError::Config { message } => Self::InvalidConfig {
                field: "tenant_url/api_token".into(),
                reason: message,
            },
            CoreError::Cancelled => Self::Interrupted,
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::InvalidConfig { field, reason },
            ConfigError::MissingField { field, path } => Self::MissingConfig { field, path },
            err @ (ConfigError::Parse { .. }
            | ConfigError::MissingSection { .. }
            | ConfigError::Figment(_)) => Self::ConfigParse {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let cases = [
            (
                CoreError::AuthenticationFailed {
                    message: "no".into(),
                },
                exit_code::AUTH,
            ),
            (
                CoreError::Api {
                    status: 500,
                    message: "boom".into(),
                },
                exit_code::API,
            ),
            (
                CoreError::ConnectionFailed {
                    url: "https://x".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (CoreError::Cancelled, exit_code::INTERRUPTED),
        ];

        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn missing_config_is_general_failure() {
        let err = CliError::from(ConfigError::MissingField {
            field: "api_token".into(),
            path: "~/.bwanEdges.conf".into(),
        });
        assert!(matches!(err, CliError::MissingConfig { .. }));
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn invalid_config_values_are_general_failures() {
        let bad_url = CliError::from(ConfigError::Validation {
            field: "tenant_url".into(),
            reason: "relative URL without a base".into(),
        });
        assert!(matches!(bad_url, CliError::InvalidConfig { .. }), "{bad_url:?}");
        assert_eq!(bad_url.exit_code(), exit_code::GENERAL);

        let bad_header = CliError::from(CoreError::Config {
            message: "Invalid header value".into(),
        });
        assert_eq!(bad_header.exit_code(), exit_code::GENERAL);

        let unparsable = CliError::from(ConfigError::MissingSection {
            path: "~/.bwanEdges.conf".into(),
        });
        assert!(matches!(unparsable, CliError::ConfigParse { .. }), "{unparsable:?}");
        assert_eq!(unparsable.exit_code(), exit_code::GENERAL);
    }
}
