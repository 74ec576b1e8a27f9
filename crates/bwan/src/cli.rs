//! Clap derive structures for the `bwan-edges` CLI.
//!
//! The tool is flag-driven: connection flags, output flags, and the three
//! actions (list, dump, remove) all live on the top-level command.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_complete::Shell;

/// `--remove_client` value meaning "every edge of the selected model".
pub const REMOVE_ALL_SENTINEL: &str = "0";

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bwan-edges -- list and remove Borderless SDWAN edges
#[derive(Debug, Parser)]
#[command(
    name = "bwan-edges",
    version,
    about = "List, dump, and remove Borderless SDWAN edges from the command line",
    long_about = "Query a Borderless SDWAN tenant for edges of a given model (Client by\n\
        default), print them as a table, dump them to CSV, and delete them one\n\
        by one or in bulk after confirmation.\n\n\
        Credentials come from ~/.bwanEdges.conf (INI, [bwan_config] section;\n\
        ~/.bwanCapp.conf is read when only that exists) or from\n\
        --tenant_url / --api_token."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(flatten)]
    pub actions: ActionOpts,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// BWAN tenant URL
    #[arg(
        long = "tenant_url",
        short = 'u',
        visible_alias = "tenant-url",
        env = "BWAN_TENANT_URL"
    )]
    pub tenant_url: Option<String>,

    /// BWAN tenant API token
    #[arg(
        long = "api_token",
        short = 't',
        visible_alias = "api-token",
        env = "BWAN_API_TOKEN",
        hide_env_values = true
    )]
    pub api_token: Option<String>,

    /// INI config file (default: ~/.bwanEdges.conf, or ~/.bwanCapp.conf if only that exists)
    #[arg(long, short = 'c', env = "BWAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Edge model to operate on
    #[arg(long, short = 'm', default_value = "Client")]
    pub model: String,

    /// Output format for listings
    #[arg(long, short = 'o', default_value = "table")]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long)]
    pub timeout: Option<u64>,
}

// ── Actions ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ActionOpts {
    /// List BWAN clients
    #[arg(long = "list_clients", short = 'l', visible_alias = "list-clients")]
    pub list_clients: bool,

    /// Remove a client by ID, 0 for all
    #[arg(
        long = "remove_client",
        short = 'r',
        visible_alias = "remove-client",
        value_name = "CLIENT_ID",
        value_parser = parse_remove_target
    )]
    pub remove_client: Option<RemoveTarget>,

    /// Dump clients to CSV file
    #[arg(
        long = "dump_clients",
        short = 'd',
        visible_alias = "dump-clients",
        value_name = "FILENAME"
    )]
    pub dump_clients: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl ActionOpts {
    /// Whether any edge action was requested.
    pub fn any(&self) -> bool {
        self.list_clients || self.remove_client.is_some() || self.dump_clients.is_some()
    }
}

/// What `--remove_client` should delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// One edge by ID.
    One(String),
    /// Every edge of the selected model (the `0` sentinel).
    All,
}

fn parse_remove_target(raw: &str) -> Result<RemoveTarget, String> {
    match raw.trim() {
        "" => Err("edge ID must not be empty".into()),
        REMOVE_ALL_SENTINEL => Ok(RemoveTarget::All),
        id => Ok(RemoveTarget::One(id.to_owned())),
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Grid table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Edge IDs, one per line (scripting)
    Plain,
}
