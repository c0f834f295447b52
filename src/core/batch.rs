use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct BatchRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting batch scoring");

        let records = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} survey records", records.len());

        let outcome = self.pipeline.transform(records).await?;
        tracing::info!(
            "🧮 Scored {} records ({} skipped)",
            outcome.report.scored,
            outcome.report.skipped
        );
        for (modality, count) in &outcome.report.distribution {
            tracing::info!("   {}: {}", modality, count);
        }

        let output_key = self.pipeline.load(outcome).await?;
        tracing::info!(
            "📁 Output saved to: {} in {:?}",
            output_key,
            started.elapsed()
        );

        Ok(output_key)
    }
}
