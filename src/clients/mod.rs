/// External API clients module
use crate::domain::{VesselDetail, VesselSummary};
use crate::errors::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Read-only source of vessel records
#[async_trait]
pub trait ShipSource: Send + Sync {
    /// Fetch every vessel for the list screen
    async fn fetch_ships(&self) -> ApiResult<Vec<VesselSummary>>;

    /// Fetch a single vessel for the detail screen
    async fn fetch_ship(&self, id: &str) -> ApiResult<VesselDetail>;
}

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fleet-board/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// SpaceX v3 ships client
pub struct SpaceXClient {
    http_client: HttpClient,
    base_url: Url,
}

impl SpaceXClient {
    pub fn new(base_url: String, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("invalid API URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("API URL {base_url} cannot take a path")));
        }

        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn ships_url(&self) -> Url {
        self.with_segments(&["v3", "ships"])
    }

    /// The id is pushed as one path segment, so `?`, `#` and `/` are percent-encoded
    fn ship_url(&self, id: &str) -> Url {
        self.with_segments(&["v3", "ships", id])
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, url: Url) -> ApiResult<Value> {
        debug!(url = %url, "GET");
        let resp = self.http_client.get_client().get(url.clone()).send().await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Upstream(status));
        }

        let body = resp.bytes().await?;
        let json = serde_json::from_slice::<Value>(&body)?;
        Ok(json)
    }
}

#[async_trait]
impl ShipSource for SpaceXClient {
    async fn fetch_ships(&self) -> ApiResult<Vec<VesselSummary>> {
        let json = self.get_json(self.ships_url()).await?;
        decode_ships(json)
    }

    async fn fetch_ship(&self, id: &str) -> ApiResult<VesselDetail> {
        let json = self.get_json(self.ship_url(id)).await?;
        decode_ship(id, json)
    }
}

/// Decode the list payload; `null` is an empty fleet, anything but an array is malformed
pub fn decode_ships(json: Value) -> ApiResult<Vec<VesselSummary>> {
    if json.is_null() {
        return Ok(Vec::new());
    }

    let ships: Vec<VesselSummary> = serde_json::from_value(json)?;
    Ok(ships)
}

/// Decode the detail payload; `null` or a record without an id is NotFound
pub fn decode_ship(id: &str, json: Value) -> ApiResult<VesselDetail> {
    if json.is_null() {
        return Err(ApiError::NotFound(format!("ship {id}")));
    }

    let detail: VesselDetail = serde_json::from_value(json)?;
    if detail.summary.id.is_empty() {
        return Err(ApiError::NotFound(format!("ship {id}")));
    }

    Ok(detail)
}
