use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// One HTTP round trip against the bridge. The client is generic over this
/// so endpoint wrappers can be exercised without a live sidecar.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value>;
    async fn post(&self, path: &str, body: Value, timeout: Duration) -> Result<Value>;
}
