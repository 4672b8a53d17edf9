// Record sources.
// The producer seam the cache fetches through; production sources call the
// REST endpoints, tests substitute scripted stubs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

use super::client::ApiClient;
use super::types::{Courier, Product};

/// Producer of a resource's complete record set.
#[async_trait]
pub trait RecordSource<T>: Send + Sync {
    /// Fetch the full snapshot from the backend.
    async fn fetch(&self) -> Result<Vec<T>>;
}

/// Source for the inventory catalog.
pub struct ProductSource {
    client: Arc<ApiClient>,
}

impl ProductSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource<Product> for ProductSource {
    async fn fetch(&self) -> Result<Vec<Product>> {
        self.client.get_products().await
    }
}

/// Source for the delivery-personnel roster.
pub struct CourierSource {
    client: Arc<ApiClient>,
}

impl CourierSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource<Courier> for CourierSource {
    async fn fetch(&self) -> Result<Vec<Courier>> {
        self.client.get_couriers().await
    }
}
