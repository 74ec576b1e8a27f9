// Wire types for the tenant `edges` endpoint.
//
// Only the fields the tool reads are typed. Everything else the tenant
// sends is kept in `extra` so structured output reproduces the record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{"data": [...]}` envelope returned by `GET /edges`.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeList {
    pub data: Vec<Edge>,
}

/// A managed SDWAN edge (gateway, client, ...) as returned by the tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Device classification, e.g. `"Client"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CreatedBy>,

    /// Present on `Client` edges only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_configuration: Option<ClientConfiguration>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedBy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfiguration {
    #[serde(
        rename = "assignedVirtualIPAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_virtual_ip_address: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    /// Exact, case-sensitive model match.
    pub fn is_model(&self, model: &str) -> bool {
        self.model.as_deref() == Some(model)
    }

    pub fn creator_name(&self) -> Option<&str> {
        self.created_by.as_ref()?.name.as_deref()
    }

    pub fn assigned_vip(&self) -> Option<&str> {
        self.client_configuration
            .as_ref()?
            .assigned_virtual_ip_address
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn client_edge_exposes_nested_fields() {
        let edge: Edge = serde_json::from_value(json!({
            "id": "e-1",
            "name": "laptop-42",
            "model": "Client",
            "createdBy": { "name": "alice", "id": "u-9" },
            "clientConfiguration": { "assignedVirtualIPAddress": "100.64.0.7" },
            "swversion": "R6.1"
        }))
        .unwrap();

        assert!(edge.is_model("Client"));
        assert!(!edge.is_model("client"));
        assert_eq!(edge.creator_name(), Some("alice"));
        assert_eq!(edge.assigned_vip(), Some("100.64.0.7"));
        assert_eq!(edge.extra["swversion"], "R6.1");
    }

    #[test]
    fn gateway_edge_without_client_configuration() {
        let edge: Edge = serde_json::from_value(json!({
            "id": "g-1",
            "model": "Edge"
        }))
        .unwrap();

        assert_eq!(edge.name, None);
        assert_eq!(edge.creator_name(), None);
        assert_eq!(edge.assigned_vip(), None);
    }

    #[test]
    fn extra_fields_survive_serialization() {
        let raw = json!({
            "id": "e-2",
            "model": "Client",
            "clientConfiguration": { "assignedVirtualIPAddress": "100.64.0.8", "mode": "full" },
            "site": "hq"
        });
        let edge: Edge = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&edge).unwrap(), raw);
    }
}
