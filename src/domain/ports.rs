use crate::core::weights::{ScoringConfig, ValidationMode};
use crate::domain::batch::{BatchOutcome, SurveyRecord};
use crate::domain::catalog::Yacht;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key-value persistence port. Values are opaque blobs.
pub trait KeyValueStore: Send + Sync {
    fn save(
        &self,
        key: &str,
        value: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn load(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
}

pub trait CatalogRepository: Send + Sync {
    fn yachts(&self) -> Result<Vec<Yacht>>;
}

pub trait ConfigProvider: Send + Sync {
    fn scoring(&self) -> &ScoringConfig;
    fn validation_mode(&self) -> ValidationMode;
    fn input_key(&self) -> &str;
    fn output_prefix(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SurveyRecord>>;
    async fn transform(&self, data: Vec<SurveyRecord>) -> Result<BatchOutcome>;
    async fn load(&self, outcome: BatchOutcome) -> Result<String>;
}
