//! Edge listing and removal for a Borderless SDWAN tenant.
//!
//! - **[`EdgeService`]** — wraps one [`bwan_api::EdgeClient`] for a single
//!   invocation. [`list_edges`](EdgeService::list_edges) fetches and filters
//!   by model, [`remove_edge`](EdgeService::remove_edge) deletes one ID, and
//!   [`remove_edges`](EdgeService::remove_edges) deletes a list sequentially
//!   into a [`BulkDeleteReport`]. All requests observe a
//!   `CancellationToken` supplied by the caller.
//!
//! - **[`columns`]** — declarative per-model column mapping shared by table
//!   and CSV output.
//!
//! - **[`CoreError`]** — network, status, and shape failures as distinct
//!   variants.

pub mod columns;
pub mod config;
pub mod error;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bwan_api::Edge;
pub use columns::{CLIENT_MODEL, Column, columns_for};
pub use config::{ServiceConfig, TlsVerification};
pub use error::CoreError;
pub use service::{BulkDeleteReport, DeleteFailure, EdgeService, edge_ids, filter_by_model};
