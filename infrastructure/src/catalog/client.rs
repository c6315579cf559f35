//! HTTP client for the inventory REST API.
//!
//! Failures never reach the caller: they are logged and become an empty
//! list (or `None`), so the assistant can still answer "no products".

use crate::config::FileCatalogConfig;
use aida_application::CatalogPort;
use aida_domain::Product;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
enum CatalogError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// [`CatalogPort`] over `GET {base_url}/products[/{id}]`
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &FileCatalogConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.base_url, config.timeout())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, CatalogError> {
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) if source.is_timeout() => return Err(CatalogError::Timeout { url }),
            Err(source) => return Err(CatalogError::Transport { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url,
                status: status.as_u16(),
            });
        }

        match response.json::<T>().await {
            Ok(value) => Ok(value),
            Err(source) if source.is_timeout() => Err(CatalogError::Timeout { url }),
            Err(source) => Err(CatalogError::Decode { url, source }),
        }
    }
}

#[async_trait]
impl CatalogPort for HttpCatalogClient {
    async fn fetch_products(&self) -> Vec<Product> {
        let url = format!("{}/products", self.base_url);
        match self.get_json::<Vec<Product>>(url).await {
            Ok(products) => {
                debug!(count = products.len(), "Fetched products");
                products
            }
            Err(e) => {
                error!(error = %e, "Error fetching products");
                Vec::new()
            }
        }
    }

    async fn fetch_product(&self, id: &str) -> Option<Product> {
        let url = format!("{}/products/{}", self.base_url, id);
        match self.get_json::<Product>(url).await {
            Ok(product) => Some(product),
            Err(e) => {
                error!(product_id = id, error = %e, "Error fetching product");
                None
            }
        }
    }
}
