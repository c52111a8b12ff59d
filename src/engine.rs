use crate::types::{CreditApplication, ModelInfo};
use anyhow::Result;
use async_trait::async_trait;

/// A loaded classifier. Implementations are shared read-only across
/// requests, so `predict` takes `&self` and must not mutate state.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Scores one application and returns its class code.
    async fn predict(&self, application: &CreditApplication) -> Result<i64>;

    fn info(&self) -> ModelInfo;
}
