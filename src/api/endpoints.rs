// Backend API endpoint functions.
// Typed methods returning complete record sets, validated at the fetch
// boundary: a rejected or malformed envelope is a fetch failure, never
// silently accepted.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, StockroomError};

use super::client::ApiClient;
use super::types::{Courier, Product};

/// Standard response envelope for list endpoints.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the record set, mapping a rejected envelope to an error.
    pub fn into_records(self) -> Result<Vec<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(StockroomError::Rejected(
                self.message.unwrap_or_else(|| "no reason given".to_string()),
            ))
        }
    }
}

impl ApiClient {
    /// Get the full inventory catalog.
    pub async fn get_products(&self) -> Result<Vec<Product>> {
        self.get_list("/products").await
    }

    /// Get the full delivery-personnel roster.
    pub async fn get_couriers(&self) -> Result<Vec<Courier>> {
        self.get_list("/couriers").await
    }

    /// Fetch a list endpoint and validate its envelope.
    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let response = self.get(endpoint).await?;
        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope.into_records()
    }
}
