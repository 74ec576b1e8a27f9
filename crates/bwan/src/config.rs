//! Turn `GlobalOpts` plus `~/.bwanEdges.conf` into a `ServiceConfig`.
//!
//! File parsing and precedence live in `bwan-config`; this module only
//! picks the path and feeds the command-line values in as overrides.

use std::path::PathBuf;

use tracing::{debug, warn};

use bwan_config::{Overrides, load_config};
use bwan_core::ServiceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// `--config` if given, else `~/.bwanEdges.conf`.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(bwan_config::config_path)
}

/// Resolve the tenant connection for this invocation.
///
/// An explicit `--config` that does not exist is an error; a missing
/// default file only means everything has to come from flags.
pub fn resolve_service_config(global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    let path = config_path(global);

    if path.exists() {
        debug!(path = %path.display(), "loading config file");
    } else if global.config.is_some() {
        return Err(CliError::NoConfig {
            path: path.display().to_string(),
        });
    } else {
        warn!(
            "Config file {} doesn't exist, will look into CLI arguments",
            path.display()
        );
    }

    let cfg = load_config(&path)?;
    let overrides = Overrides {
        tenant_url: global.tenant_url.clone(),
        api_token: global.api_token.clone(),
        timeout: global.timeout,
        insecure: global.insecure,
    };

    Ok(bwan_config::resolve(&cfg.bwan_config, &overrides, &path)?)
}
