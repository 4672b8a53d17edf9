// Backend API module.
// HTTP client, typed endpoints, and the record-source seam the cache
// fetches through.

pub mod client;
pub mod endpoints;
pub mod source;
pub mod types;

pub use client::ApiClient;
pub use endpoints::ApiEnvelope;
pub use source::{CourierSource, ProductSource, RecordSource};
pub use types::{Courier, Product};
