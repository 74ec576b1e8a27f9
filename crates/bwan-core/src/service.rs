// ── Edge service ──
//
// Thin facade over `EdgeClient` for one CLI invocation: lists edges of a
// model and removes them one by one. Every request races the injected
// cancellation token so an interrupt stops work between or during calls.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use bwan_api::{Edge, EdgeClient};

use crate::config::ServiceConfig;
use crate::error::CoreError;

/// Outcome of deleting a list of edges.
#[derive(Debug, Default)]
pub struct BulkDeleteReport {
    /// Number of IDs handed in.
    pub requested: usize,
    /// IDs deleted, in request order.
    pub deleted: Vec<String>,
    /// IDs whose DELETE failed, with the reason.
    pub failed: Vec<DeleteFailure>,
    /// Set when cancellation stopped the loop early.
    pub interrupted: bool,
}

#[derive(Debug)]
pub struct DeleteFailure {
    pub id: String,
    pub error: CoreError,
}

impl BulkDeleteReport {
    fn new(requested: usize) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    /// IDs never attempted because the run was interrupted.
    pub fn skipped(&self) -> usize {
        self.requested - self.deleted.len() - self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.interrupted
    }
}

/// Keep edges whose model equals `model` exactly, preserving server order.
pub fn filter_by_model(edges: Vec<Edge>, model: &str) -> Vec<Edge> {
    edges.into_iter().filter(|e| e.is_model(model)).collect()
}

/// IDs of `edges`, in order.
pub fn edge_ids(edges: &[Edge]) -> Vec<String> {
    edges.iter().map(|e| e.id.clone()).collect()
}

/// Lists and removes edges on one tenant.
pub struct EdgeService {
    client: EdgeClient,
    cancel: CancellationToken,
}

impl EdgeService {
    /// Build the HTTP client from `config`.
    pub fn new(config: &ServiceConfig, cancel: CancellationToken) -> Result<Self, CoreError> {
        let client = EdgeClient::from_api_token(
            config.tenant_url.as_str(),
            &config.api_token,
            &config.transport(),
        )?;
        Ok(Self::with_client(client, cancel))
    }

    pub fn with_client(client: EdgeClient, cancel: CancellationToken) -> Self {
        Self { client, cancel }
    }

    pub fn tenant_url(&self) -> &url::Url {
        self.client.base_url()
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fetch all edges and keep those of `model`.
    pub async fn list_edges(&self, model: &str) -> Result<Vec<Edge>, CoreError> {
        info!("Getting edges with model: {model}");
        let edges = self.cancellable(self.client.list_edges()).await?;
        Ok(filter_by_model(edges, model))
    }

    /// Delete a single edge. Logs one success line on 2xx.
    pub async fn remove_edge(&self, id: &str) -> Result<(), CoreError> {
        self.cancellable(self.client.delete_edge(id)).await?;
        info!(edge_id = %id, "Edge {id} deleted successfully");
        Ok(())
    }

    /// Delete `ids` sequentially, in order.
    ///
    /// A failed DELETE is logged and recorded, then the loop moves on to the
    /// next ID. Cancellation stops the loop before the next request.
    pub async fn remove_edges(&self, ids: &[String]) -> BulkDeleteReport {
        let mut report = BulkDeleteReport::new(ids.len());

        for id in ids {
            if self.cancel.is_cancelled() {
                report.interrupted = true;
                break;
            }
            match self.remove_edge(id).await {
                Ok(()) => report.deleted.push(id.clone()),
                Err(CoreError::Cancelled) => {
                    report.interrupted = true;
                    break;
                }
                Err(err) => {
                    error!(edge_id = %id, "Failed to delete edge {id}: {err}");
                    report.failed.push(DeleteFailure {
                        id: id.clone(),
                        error: err,
                    });
                }
            }
        }

        report
    }

    async fn cancellable<T>(
        &self,
        fut: impl Future<Output = Result<T, bwan_api::Error>>,
    ) -> Result<T, CoreError> {
        tokio::select! {
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            res = fut => res.map_err(CoreError::from),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::TlsVerification;

    async fn setup() -> (MockServer, EdgeService) {
        let server = MockServer::start().await;
        let config = ServiceConfig {
            tenant_url: server.uri().parse().unwrap(),
            api_token: SecretString::from("tok".to_string()),
            tls: TlsVerification::SystemDefaults,
            timeout: Duration::from_secs(5),
        };
        let service = EdgeService::new(&config, CancellationToken::new()).unwrap();
        (server, service)
    }

    fn mixed_edges() -> serde_json::Value {
        json!({
            "data": [
                { "id": "c-1", "model": "Client" },
                { "id": "g-1", "model": "Edge" },
                { "id": "c-2", "model": "Client" },
                { "id": "x-1", "model": "client" },
                { "id": "n-1" }
            ]
        })
    }

    #[tokio::test]
    async fn list_filters_by_exact_model_in_server_order() {
        let (server, service) = setup().await;
        Mock::given(method("GET"))
            .and(path("/edges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mixed_edges()))
            .mount(&server)
            .await;

        let clients = service.list_edges("Client").await.unwrap();
        assert_eq!(edge_ids(&clients), ["c-1", "c-2"]);

        let gateways = service.list_edges("Edge").await.unwrap();
        assert_eq!(edge_ids(&gateways), ["g-1"]);

        assert!(service.list_edges("Gateway").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_surfaces_status_errors() {
        let (server, service) = setup().await;
        Mock::given(method("GET"))
            .and(path("/edges"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = service.list_edges("Client").await.unwrap_err();
        assert!(matches!(err, CoreError::Api { status: 503, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn list_surfaces_shape_errors() {
        let (server, service) = setup().await;
        Mock::given(method("GET"))
            .and(path("/edges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "nope" })))
            .mount(&server)
            .await;

        let err = service.list_edges("Client").await.unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn remove_edges_deletes_every_id_in_order() {
        let (server, service) = setup().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(3)
            .mount(&server)
            .await;

        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let report = service.remove_edges(&ids).await;

        assert!(report.is_success());
        assert_eq!(report.deleted, ids);

        let paths: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| r.url.path().to_owned())
            .collect();
        assert_eq!(paths, ["/edges/a", "/edges/b", "/edges/c"]);
    }

    #[tokio::test]
    async fn remove_edges_continues_past_failures() {
        let (server, service) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/edges/b"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "locked" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let report = service.remove_edges(&ids).await;

        assert!(!report.is_success());
        assert_eq!(report.deleted, ["a", "c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "b");
        assert_eq!(report.skipped(), 0);
    }

    #[tokio::test]
    async fn remove_edges_stops_when_cancelled() {
        let (server, service) = setup().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        service.cancel_token().cancel();
        let ids = vec!["a".to_string(), "b".to_string()];
        let report = service.remove_edges(&ids).await;

        assert!(report.interrupted);
        assert!(report.deleted.is_empty());
        assert_eq!(report.skipped(), 2);
    }

    #[tokio::test]
    async fn remove_edge_reports_single_failure() {
        let (server, service) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/edges/gone"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = service.remove_edge("gone").await.unwrap_err();
        assert!(matches!(err, CoreError::Api { status: 404, .. }), "{err:?}");
    }
}
