// Async HTTP client for the tenant REST API.
//
// Base path: the tenant URL, e.g. https://acme.api.goskope.com/api/v2
// Auth: `Authorization: Bearer <token>` default header

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Edge, EdgeList};
use crate::transport::TransportConfig;

/// Collection endpoint for edges, relative to the tenant URL.
pub const EDGES_ENDPOINT: &str = "edges";

// ── Error response shape from the tenant API ─────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the tenant edge API.
///
/// Holds one `reqwest::Client` for the whole invocation so every call
/// reuses the same connection pool and default headers.
pub struct EdgeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EdgeClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a tenant URL, API token, and transport config.
    ///
    /// Injects `Authorization: Bearer <token>` (marked sensitive) and
    /// `Content-Type: application/json` as default headers.
    pub fn from_api_token(
        base_url: &str,
        api_token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_token.expose_secret()))
            .map_err(|e| Error::InvalidHeader(format!("API token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The tenant base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `base_url + "/" + endpoint`, with exactly one separator between them
    /// no matter how either side is slashed.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{endpoint}"))?)
    }

    // ── Raw verbs ────────────────────────────────────────────────────

    /// GET `endpoint` and hand back the response untouched.
    pub async fn get_raw(&self, endpoint: &str) -> Result<reqwest::Response, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!("GET {url}");
        Ok(self.http.get(url).send().await?)
    }

    /// DELETE `endpoint` and hand back the response untouched.
    pub async fn delete_raw(&self, endpoint: &str) -> Result<reqwest::Response, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!("DELETE {url}");
        Ok(self.http.delete(url).send().await?)
    }

    // ── Edges ────────────────────────────────────────────────────────

    /// Fetch every edge on the tenant, in server order.
    pub async fn list_edges(&self) -> Result<Vec<Edge>, Error> {
        let resp = self.get_raw(EDGES_ENDPOINT).await?;
        let list: EdgeList = handle_response(resp).await?;
        Ok(list.data)
    }

    /// Delete one edge by ID.
    pub async fn delete_edge(&self, id: &str) -> Result<(), Error> {
        let resp = self.delete_raw(&format!("{EDGES_ENDPOINT}/{id}")).await?;
        handle_empty(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Error::InvalidApiToken {
            status: status.as_u16(),
        };
    }

    let raw = resp.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorResponse>(&raw)
        .ok()
        .and_then(|err| err.message.or(err.error))
        .or_else(|| (!raw.trim().is_empty()).then(|| raw.chars().take(200).collect()))
        .unwrap_or_else(|| status.to_string());

    Error::Api {
        status: status.as_u16(),
        message,
    }
}
