//! Configuration for the bwan-edges CLI.
//!
//! Loads the `[bwan_config]` section from `~/.bwanEdges.conf` (INI),
//! layers command-line overrides on top, normalizes the tenant URL, and
//! produces a `bwan_core::ServiceConfig`. Nothing here touches the network.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use directories::BaseDirs;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use ini::{Ini, Properties};
use regex::Regex;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::{Host, Url};

use bwan_core::{ServiceConfig, TlsVerification};

/// File name of the config file, relative to the home directory.
pub const CONFIG_FILENAME: &str = ".bwanEdges.conf";

/// Older file name, still read when the current one is absent.
pub const LEGACY_CONFIG_FILENAME: &str = ".bwanCapp.conf";

/// Section holding the tenant credentials.
pub const SECTION: &str = "bwan_config";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {field} configured (looked in flags, environment, and {path})")]
    MissingField { field: String, path: String },

    #[error("{path}: {message}")]
    Parse { path: String, message: String },

    #[error("{path} doesn't contain a [{SECTION}] section")]
    MissingSection { path: String },

    #[error("can't merge configuration: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structs ──────────────────────────────────────────────────

/// Top-level file layout.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub bwan_config: TenantSection,
}

/// The `[bwan_config]` section.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TenantSection {
    /// Tenant URL, with or without the `api` host label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_url: Option<String>,

    /// API token (plaintext).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

impl TenantSection {
    fn from_properties(props: &Properties) -> Result<Self, ConfigError> {
        let text = |key: &str| props.get(key).map(str::to_owned);

        let timeout = props
            .get("timeout")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| ConfigError::Validation {
                    field: "timeout".into(),
                    reason: format!("'{raw}' is not a number of seconds: {e}"),
                })
            })
            .transpose()?;

        let insecure = props.get("insecure").map(parse_flag).transpose()?;

        Ok(Self {
            tenant_url: text("tenant_url"),
            api_token: text("api_token"),
            timeout,
            insecure,
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::Validation {
            field: "insecure".into(),
            reason: format!("'{raw}' is not a boolean"),
        }),
    }
}

/// Values supplied on the command line (or their environment fallbacks).
/// Each one wins over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub tenant_url: Option<String>,
    pub api_token: Option<String>,
    pub timeout: Option<u64>,
    pub insecure: bool,
}

// ── Config file path ────────────────────────────────────────────────

/// `~/.bwanEdges.conf`, or `~/.bwanCapp.conf` when only that one exists.
pub fn config_path() -> PathBuf {
    let home = BaseDirs::new().map_or_else(
        || PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into())),
        |dirs| dirs.home_dir().to_path_buf(),
    );
    config_path_in(&home)
}

fn config_path_in(home: &Path) -> PathBuf {
    let current = home.join(CONFIG_FILENAME);
    let legacy = home.join(LEGACY_CONFIG_FILENAME);
    if !current.exists() && legacy.exists() {
        legacy
    } else {
        current
    }
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config file at `path`, plus `BWAN_TIMEOUT` / `BWAN_INSECURE`.
///
/// The file is INI: `key=value` lines under `[bwan_config]`, `#` or `;`
/// comments, values quoted or not. A missing file is not an error
/// (everything may come from flags); a file that exists but cannot be
/// parsed, or lacks the section, is.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let section = if path.exists() {
        read_section(path)?
    } else {
        TenantSection::default()
    };

    let figment = Figment::new()
        .merge(Serialized::defaults(Config {
            bwan_config: section,
        }))
        .merge(
            Env::prefixed("BWAN_")
                .only(&["timeout", "insecure"])
                .map(|key| format!("{SECTION}.{key}").into()),
        );

    Ok(figment.extract()?)
}

fn read_section(path: &Path) -> Result<TenantSection, ConfigError> {
    let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let props = ini
        .section(Some(SECTION))
        .ok_or_else(|| ConfigError::MissingSection {
            path: path.display().to_string(),
        })?;

    TenantSection::from_properties(props)
}

// ── Resolution ──────────────────────────────────────────────────────

/// Merge `overrides` over the file `section` into a `ServiceConfig`.
///
/// Both the URL and the token must be present and non-empty somewhere;
/// `path` only names the file in the error.
pub fn resolve(
    section: &TenantSection,
    overrides: &Overrides,
    path: &Path,
) -> Result<ServiceConfig, ConfigError> {
    let tenant_url = pick("tenant_url", &overrides.tenant_url, &section.tenant_url, path)?;
    let api_token = pick("api_token", &overrides.api_token, &section.api_token, path)?;

    let tls = if overrides.insecure || section.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = overrides
        .timeout
        .or(section.timeout)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ServiceConfig {
        tenant_url: normalize_tenant_url(tenant_url)?,
        api_token: SecretString::from(api_token.to_owned()),
        tls,
        timeout: Duration::from_secs(timeout),
    })
}

fn pick<'a>(
    field: &str,
    flag: &'a Option<String>,
    file: &'a Option<String>,
    path: &Path,
) -> Result<&'a str, ConfigError> {
    [flag, file]
        .into_iter()
        .filter_map(|v| v.as_deref().map(str::trim))
        .find(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingField {
            field: field.into(),
            path: path.display().to_string(),
        })
}

// ── Tenant URL normalization ────────────────────────────────────────

static HOST_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(://[^./]+)").expect("host boundary pattern is valid"));

/// Insert the `api` label after the tenant name unless the URL already
/// mentions `api`.
///
/// `https://acme.goskope.com` becomes `https://acme.api.goskope.com`.
/// IP literals and `localhost` have no tenant label and are left alone.
pub fn normalize_tenant_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim().trim_end_matches('/');
    let rewritten = if raw.contains("api") || !has_tenant_label(raw) {
        Cow::Borrowed(raw)
    } else {
        HOST_BOUNDARY.replacen(raw, 1, "${1}.api")
    };

    Url::parse(&rewritten).map_err(|e| ConfigError::Validation {
        field: "tenant_url".into(),
        reason: format!("'{rewritten}' is not a valid URL: {e}"),
    })
}

fn has_tenant_label(raw: &str) -> bool {
    match Url::parse(raw).as_ref().map(Url::host) {
        Ok(Some(Host::Domain(domain))) => domain != "localhost",
        Ok(Some(Host::Ipv4(_) | Host::Ipv6(_))) => false,
        _ => true,
    }
}
