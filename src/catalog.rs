//! Read-only access to the remote stock catalog.
//!
//! The [`CatalogReader`] trait is the synchroniser's seam to the outside
//! world; [`SupabaseCatalog`] implements it against the Supabase PostgREST
//! surface. Nothing here mutates the catalog.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;

/// One record of the remote `stock_items` collection. The catalog owns and
/// mutates these; this system only reads them.
#[derive(Debug, Clone, Deserialize)]
pub struct StockItem {
    /// Opaque primary key, kept as raw JSON so the catalog is free to use
    /// UUIDs or integers without breaking us.
    pub id: serde_json::Value,
    /// The assigned barcode identifier, absent for items not yet labelled.
    #[serde(default)]
    pub barcode: Option<String>,
}

impl StockItem {
    /// The identifier to encode, if one is assigned and non-empty.
    pub fn identifier(&self) -> Option<&str> {
        self.barcode.as_deref().filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog rejected the request with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("catalog returned a malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Read-only capability over the stock catalog.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Fetches the full item collection, in the catalog's own order.
    async fn list_items(&self) -> Result<Vec<StockItem>, CatalogError>;
}

/// PostgREST client for a Supabase-hosted catalog.
#[derive(Debug, Clone)]
pub struct SupabaseCatalog {
    client: reqwest::Client,
    rest_url: String,
    service_role_key: String,
}

impl SupabaseCatalog {
    pub fn new(config: &Config) -> Self {
        let rest_url = format!(
            "{}/rest/v1/stock_items?select=id,barcode",
            config.supabase_url.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::new(),
            rest_url,
            service_role_key: config.service_role_key.clone(),
        }
    }
}

#[async_trait]
impl CatalogReader for SupabaseCatalog {
    async fn list_items(&self) -> Result<Vec<StockItem>, CatalogError> {
        info!(url = %self.rest_url, "Fetching stock items from catalog");

        let response = self
            .client
            .get(&self.rest_url)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, "Catalog rejected the list request");
            return Err(CatalogError::Status { status, body });
        }

        let body = response.text().await?;
        let items: Vec<StockItem> = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Catalog response was not a stock item array");
            CatalogError::Decode(e)
        })?;
        info!(count = items.len(), "Fetched stock items");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialises_postgrest_rows() {
        let body = r#"[
            {"id": "3f6c0a54-0a4e-4f3e-9d5d-2f6a8f6f2f10", "barcode": "A100"},
            {"id": 7, "barcode": ""},
            {"id": 8, "barcode": null},
            {"id": 9}
        ]"#;
        let items: Vec<StockItem> = serde_json::from_str(body).expect("valid rows");
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].identifier(), Some("A100"));
        // Empty, null and missing barcodes all mean "no identifier assigned".
        assert!(items[1..].iter().all(|item| item.identifier().is_none()));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = serde_json::from_str::<Vec<StockItem>>("{\"not\": \"an array\"}")
            .map_err(CatalogError::Decode)
            .expect_err("object is not a row array");
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
