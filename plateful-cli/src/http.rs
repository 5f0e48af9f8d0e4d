//! REST client for the catalog, favorites and orders endpoints.
//!
//! Implements the engine's remote traits on top of [`reqwest`]:
//! `GET /foods/{id}`, `POST /favorites` and `POST /orders`.

use async_trait::async_trait;
use plateful_core::{
    CatalogFood, CatalogSource, FavoriteRecord, FavoritesStore, OrderPayload, OrdersStore,
};
use serde::Serialize;

/// HTTP client for a single API host.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum HttpApiError {
    /// The HTTP request itself failed (network, DNS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
}

impl HttpBackend {
    /// `api_url` is the base URL, e.g. `http://localhost:3333`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<(), HttpApiError> {
        let url = format!("{}/{path}", self.api_url);
        log::debug!("POST {url}");
        let response = self.client.post(url).json(body).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Return the response unchanged on success, or an [`HttpApiError::Api`]
    /// carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, HttpApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HttpApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CatalogSource for HttpBackend {
    type Error = HttpApiError;

    async fn fetch_food(&self, food_id: u64) -> Result<CatalogFood, Self::Error> {
        let url = format!("{}/foods/{food_id}", self.api_url);
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<CatalogFood>().await?)
    }
}

#[async_trait]
impl FavoritesStore for HttpBackend {
    type Error = HttpApiError;

    async fn add_favorite(&self, record: &FavoriteRecord) -> Result<(), Self::Error> {
        self.post("favorites", record).await
    }
}

#[async_trait]
impl OrdersStore for HttpBackend {
    type Error = HttpApiError;

    async fn place_order(&self, order: &OrderPayload) -> Result<(), Self::Error> {
        self.post("orders", order).await
    }
}
