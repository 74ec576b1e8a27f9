//! Per-model column mapping for edge listings.
//!
//! Table and CSV output both read these, so the two always agree on
//! headers and projections.

use bwan_api::Edge;

/// Model name of roaming client edges.
pub const CLIENT_MODEL: &str = "Client";

/// Placeholder for a value the tenant did not send.
pub const MISSING: &str = "-";

/// One output column: a header and how to pull its value out of an edge.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    project: fn(&Edge) -> Option<&str>,
}

impl Column {
    pub const fn new(header: &'static str, project: fn(&Edge) -> Option<&str>) -> Self {
        Self { header, project }
    }

    pub fn value(&self, edge: &Edge) -> String {
        (self.project)(edge).unwrap_or(MISSING).to_owned()
    }
}

fn id(edge: &Edge) -> Option<&str> {
    Some(edge.id.as_str())
}

fn name(edge: &Edge) -> Option<&str> {
    edge.name.as_deref()
}

fn model(edge: &Edge) -> Option<&str> {
    edge.model.as_deref()
}

const CLIENT_COLUMNS: &[Column] = &[
    Column::new("ID", id),
    Column::new("Name", name),
    Column::new("User", Edge::creator_name),
    Column::new("Assigned VIP", Edge::assigned_vip),
];

const DEFAULT_COLUMNS: &[Column] = &[
    Column::new("ID", id),
    Column::new("Name", name),
    Column::new("Model", model),
    Column::new("User", Edge::creator_name),
];

/// Columns used to render edges of `model`.
pub fn columns_for(model: &str) -> &'static [Column] {
    if model == CLIENT_MODEL {
        CLIENT_COLUMNS
    } else {
        DEFAULT_COLUMNS
    }
}

/// Headers of [`columns_for`]`(model)`.
pub fn headers(columns: &[Column]) -> Vec<&'static str> {
    columns.iter().map(|c| c.header).collect()
}

/// Project one edge into a row of cell values.
pub fn row(columns: &[Column], edge: &Edge) -> Vec<String> {
    columns.iter().map(|c| c.value(edge)).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    fn edge(value: serde_json::Value) -> Edge {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn client_columns_project_user_and_vip() {
        let columns = columns_for(CLIENT_MODEL);
        let e = edge(json!({
            "id": "c-1",
            "name": "laptop",
            "model": "Client",
            "createdBy": { "name": "alice" },
            "clientConfiguration": { "assignedVirtualIPAddress": "100.64.0.1" }
        }));

        assert_eq!(headers(columns), ["ID", "Name", "User", "Assigned VIP"]);
        assert_eq!(row(columns, &e), ["c-1", "laptop", "alice", "100.64.0.1"]);
    }

    #[test]
    fn other_models_get_default_columns() {
        let columns = columns_for("Edge");
        let e = edge(json!({ "id": "g-1", "model": "Edge" }));

        assert_eq!(headers(columns), ["ID", "Name", "Model", "User"]);
        assert_eq!(row(columns, &e), ["g-1", "-", "Edge", "-"]);
    }

    #[test]
    fn model_lookup_is_case_sensitive() {
        assert_eq!(headers(columns_for("client")), headers(DEFAULT_COLUMNS));
    }
}
