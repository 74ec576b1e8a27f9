//! Edge command handlers: list, dump, remove.

use std::path::Path;

use tracing::{info, warn};

use bwan_core::{CoreError, Edge, EdgeService, columns_for, edge_ids};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::commands::util::Confirmer;
use crate::error::CliError;
use crate::output;

/// Fetch the edges of `--model`, print them, and return their IDs.
pub async fn list(service: &EdgeService, global: &GlobalOpts) -> Result<Vec<String>, CliError> {
    let edges = fetch_and_print(service, global).await?;
    Ok(edge_ids(&edges))
}

/// Fetch the edges of `--model` and write them to `path` as CSV.
pub async fn dump(
    service: &EdgeService,
    global: &GlobalOpts,
    path: &Path,
) -> Result<(), CliError> {
    let model = &global.model;
    let edges = service.list_edges(model).await?;

    output::write_csv(path, columns_for(model), &edges)?;
    info!(
        "Dumped {} {model} edge(s) to {}",
        edges.len(),
        path.display()
    );
    Ok(())
}

/// Delete one edge by ID.
pub async fn remove_one(service: &EdgeService, id: &str) -> Result<(), CliError> {
    match service.remove_edge(id).await {
        Ok(()) => Ok(()),
        Err(CoreError::Api { status: 404, .. }) => Err(CliError::NotFound {
            resource_type: "edge".into(),
            identifier: id.into(),
            list_command: "--list_clients".into(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Delete every edge of `--model` after confirmation.
///
/// Deletion is best-effort: a failed DELETE is reported and the rest
/// still run. Any failure makes the whole command fail.
pub async fn remove_all<C: Confirmer>(
    service: &EdgeService,
    global: &GlobalOpts,
    confirmer: &mut C,
) -> Result<(), CliError> {
    let model = &global.model;
    let ids = list(service, global).await?;

    if ids.is_empty() {
        info!("No {model} edge found. Nothing to delete.");
        return Ok(());
    }

    info!("{} {model} edge(s) will be deleted", ids.len());
    if !confirmer.confirm("Do you want to continue?").await? {
        info!("No {model} edge deleted. Exiting...");
        return Ok(());
    }

    let report = service.remove_edges(&ids).await;
    info!(
        "Deleted {} of {} {model} edge(s), {} failed",
        report.deleted.len(),
        report.requested,
        report.failed.len()
    );

    if report.interrupted {
        warn!("{} edge(s) not attempted", report.skipped());
        return Err(CliError::Interrupted);
    }
    if !report.failed.is_empty() {
        return Err(CliError::BulkDeleteFailed {
            failed: report.failed.len(),
            total: report.requested,
            ids: report
                .failed
                .iter()
                .map(|f| f.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        });
    }
    Ok(())
}

async fn fetch_and_print(
    service: &EdgeService,
    global: &GlobalOpts,
) -> Result<Vec<Edge>, CliError> {
    let model = &global.model;
    let edges = service.list_edges(model).await?;

    let mut rendered = output::render_edges(global.output, &edges, columns_for(model))?;
    if global.output == OutputFormat::Table {
        rendered.push_str(&format!("\nTotal edges ({model}) is {}", edges.len()));
    }
    output::print_output(&rendered)?;

    Ok(edges)
}
