//! Signed HTTP client for the BrickLink store API.

use super::codecs::{ItemType, WireCode};
use super::envelope::parse_response;
use super::models::{
    split_item_sequence, Inventory, PartOutQuery, PartOutValue, PriceGuide, PriceGuideQuery, UpdateInventory,
};
use crate::config::Config;
use crate::error::{BricklinkError, Result};
use crate::oauth::{percent_encode, sign, Credentials, NonceSource, SystemNonceSource};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use wreq::{Client, Method};

/// BrickLink operations - enables mocking for tests.
#[async_trait]
pub trait BricklinkApi: Send + Sync {
    /// Part-out valuation of a set, minifig or gear item. `"1610-2"` selects sequence 2.
    async fn get_part_out_value(&self, item_no: &str, query: &PartOutQuery) -> Result<PartOutValue>;

    /// Price guide for a catalog item.
    async fn get_price_guide(
        &self,
        item_type: ItemType,
        item_no: &str,
        query: &PriceGuideQuery,
    ) -> Result<PriceGuide>;

    /// A single lot of the authenticated store.
    async fn get_inventory(&self, inventory_id: u64) -> Result<Inventory>;

    /// Updates a lot and returns its new state.
    async fn update_inventory(&self, inventory_id: u64, update: &UpdateInventory) -> Result<Inventory>;
}

/// BrickLink API client.
///
/// Cheap to clone; clones share the connection pool and the immutable configuration.
#[derive(Clone)]
pub struct BricklinkClient {
    client: Client,
    config: Arc<Config>,
    credentials: Arc<Credentials>,
    nonces: Arc<dyn NonceSource>,
}

impl BricklinkClient {
    /// Creates a client. Fails if any credential is missing.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_nonce_source(config, Arc::new(SystemNonceSource))
    }

    /// Creates a client with a custom nonce/timestamp source (for testing).
    pub fn with_nonce_source(config: Config, nonces: Arc<dyn NonceSource>) -> Result<Self> {
        config.validate()?;
        let credentials = config.credentials()?;

        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|e| BricklinkError::configuration(format!("Invalid proxy {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, config: Arc::new(config), credentials: Arc::new(credentials), nonces })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds `base_url + path` with the given query parameters.
    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let raw = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw)
            .map_err(|e| BricklinkError::configuration(format!("Invalid request URL {}: {}", raw, e)))?;

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }

        Ok(url.into())
    }

    /// Signs and sends one request, returning the body text whatever the status.
    ///
    /// `body` is sent as JSON. Dropping the returned future cancels the request; the
    /// configured timeout bounds it otherwise. Nothing is retried.
    pub async fn execute_request<B>(&self, url: &str, method: Method, body: Option<&B>) -> Result<String>
    where
        B: Serialize + ?Sized + Sync,
    {
        let header = sign(&self.credentials, url, method.as_str(), self.nonces.as_ref())?;

        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .header("Authorization", header.to_string())
            .header("Accept", "application/json");

        if let Some(body) = body {
            let json = serde_json::to_string(body).map_err(|e| {
                BricklinkError::configuration(format!("Failed to serialize request body: {}", e))
            })?;
            request = request.header("Content-Type", "application/json").body(json);
        }

        let response = request.send().await?;
        debug!("Response status: {}", response.status());

        Ok(response.text().await?)
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let url = self.url(path, params)?;
        self.execute_request::<()>(&url, Method::GET, None).await
    }
}

#[async_trait]
impl BricklinkApi for BricklinkClient {
    async fn get_part_out_value(&self, item_no: &str, query: &PartOutQuery) -> Result<PartOutValue> {
        let (number, item_seq) = split_item_sequence(item_no.trim());
        if number.is_empty() {
            return Err(BricklinkError::configuration("Item number must not be empty"));
        }

        info!("Fetching part-out value: {} ({}, seq {})", number, query.item_type, item_seq);

        let path =
            format!("/items/{}/{}/partout", query.item_type.item_type().code(), percent_encode(number));
        let body = self.get(&path, &query.to_params(item_seq)).await?;
        parse_response(&body)
    }

    async fn get_price_guide(
        &self,
        item_type: ItemType,
        item_no: &str,
        query: &PriceGuideQuery,
    ) -> Result<PriceGuide> {
        let item_no = item_no.trim();
        if item_no.is_empty() {
            return Err(BricklinkError::configuration("Item number must not be empty"));
        }

        info!("Fetching price guide: {} {} ({})", item_type, item_no, query.guide_type);

        let path = format!("/items/{}/{}/price", item_type.code(), percent_encode(item_no));
        let body = self.get(&path, &query.to_params()).await?;
        parse_response(&body)
    }

    async fn get_inventory(&self, inventory_id: u64) -> Result<Inventory> {
        info!("Fetching inventory: {}", inventory_id);

        let body = self.get(&format!("/inventories/{}", inventory_id), &[]).await?;
        parse_response(&body)
    }

    async fn update_inventory(&self, inventory_id: u64, update: &UpdateInventory) -> Result<Inventory> {
        update.validate()?;
        info!("Updating inventory: {}", inventory_id);

        let url = self.url(&format!("/inventories/{}", inventory_id), &[])?;
        let body = self.execute_request(&url, Method::PUT, Some(update)).await?;
        parse_response(&body)
    }
}
