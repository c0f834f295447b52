pub use crate::app::pipelines::batch_pipeline::{BatchPipeline, CSV_HEADER};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::core::weights::{ScoringConfig, ValidationMode};
    use crate::core::{ConfigProvider, KeyValueStore, Pipeline};
    use crate::domain::model::Modality;
    use crate::utils::error::AdvisorError;

    struct MockConfig {
        scoring: ScoringConfig,
        mode: ValidationMode,
        input_key: String,
        output_prefix: String,
    }

    impl MockConfig {
        fn new(mode: ValidationMode) -> Self {
            Self {
                scoring: ScoringConfig::default(),
                mode,
                input_key: "input.csv".to_string(),
                output_prefix: "reports".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn scoring(&self) -> &ScoringConfig {
            &self.scoring
        }

        fn validation_mode(&self) -> ValidationMode {
            self.mode
        }

        fn input_key(&self) -> &str {
            &self.input_key
        }

        fn output_prefix(&self) -> &str {
            &self.output_prefix
        }
    }

    const HEADER: &str = "respondent_id,goals,budget_min,budget_max,monthly_payment_comfort,open_to_financing,usage_vs_yield,geo_preference,expected_usage_days";

    async fn store_with(rows: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        let mut content = vec![HEADER];
        content.extend_from_slice(rows);
        store
            .save("input.csv", content.join("\n").as_bytes())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_extract_parses_rows() {
        let store = store_with(&[
            "r1,own_boat,200000,400000,3000,true,lifestyle,near_me,150",
            "r2,share_ownership;reduce_costs,40000,90000,800,true,lifestyle_plus_income,region,60",
            "r3,,80000,120000,0,false,,,50",
        ])
        .await;
        let pipeline = BatchPipeline::new(store, MockConfig::new(ValidationMode::Clamp));

        let records = pipeline.extract().await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].answers.goals.len(), 2);
        assert_eq!(records[2].answers.usage_vs_yield, None);
        assert!(records[2].answers.goals.is_empty());
    }

    #[tokio::test]
    async fn test_extract_skips_malformed_rows_in_clamp_mode() {
        let store = store_with(&[
            "r1,own_boat,200000,400000,3000,true,lifestyle,near_me,150",
            "r2,buy_island,200000,400000,3000,true,lifestyle,near_me,150",
            "r3,own_boat,lots,400000,3000,true,lifestyle,near_me,150",
        ])
        .await;
        let pipeline = BatchPipeline::new(store, MockConfig::new(ValidationMode::Clamp));

        let records = pipeline.extract().await.unwrap();
        assert_eq!(records.len(), 1);

        let outcome = pipeline.transform(records).await.unwrap();
        assert_eq!(outcome.report.skipped, 2);
        assert_eq!(outcome.report.scored, 1);
    }

    #[tokio::test]
    async fn test_extract_fails_on_malformed_row_in_strict_mode() {
        let store = store_with(&[
            "r1,own_boat,200000,400000,3000,true,lifestyle,near_me,150",
            "r2,buy_island,200000,400000,3000,true,lifestyle,near_me,150",
        ])
        .await;
        let pipeline = BatchPipeline::new(store, MockConfig::new(ValidationMode::Strict));

        let err = pipeline.extract().await.unwrap_err();
        match err {
            AdvisorError::ProcessingError { message } => assert!(message.starts_with("row 3")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transform_names_respondent_in_strict_mode() {
        let store = store_with(&[
            "r1,own_boat,200000,400000,3000,true,lifestyle,near_me,150",
            "r7,own_boat,200000,400000,3000,true,lifestyle,near_me,400",
        ])
        .await;
        let pipeline = BatchPipeline::new(store, MockConfig::new(ValidationMode::Strict));

        let records = pipeline.extract().await.unwrap();
        let err = pipeline.transform(records).await.unwrap_err();
        match err {
            AdvisorError::ProcessingError { message } => {
                assert!(message.starts_with("respondent r7:"));
                assert!(message.contains("expectedUsageDays"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_input_is_an_error() {
        let pipeline = BatchPipeline::new(MemoryStore::new(), MockConfig::new(ValidationMode::Clamp));
        assert!(pipeline.extract().await.is_err());
    }

    #[tokio::test]
    async fn test_transform_writes_confidences() {
        let store = store_with(&[
            "r1,own_boat,200000,400000,3000,true,lifestyle,near_me,150",
            "r2,financial_investment,500000,1000000,0,false,pure_investment,anywhere,0",
        ])
        .await;
        let pipeline = BatchPipeline::new(store, MockConfig::new(ValidationMode::Clamp));

        let records = pipeline.extract().await.unwrap();
        let outcome = pipeline.transform(records).await.unwrap();

        let lines: Vec<&str> = outcome.csv_output.lines().collect();
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert_eq!(lines[1], "r1,OWN,91,91,9,0,0");
        assert!(lines[2].starts_with("r2,INVEST,"));
        assert_eq!(outcome.report.distribution.get(&Modality::Own), Some(&1));
        assert_eq!(outcome.report.distribution.get(&Modality::Invest), Some(&1));
    }

    #[tokio::test]
    async fn test_load_writes_csv_and_json_under_prefix() {
        let store = store_with(&["r1,own_boat,200000,400000,3000,true,lifestyle,near_me,150"]).await;
        let pipeline = BatchPipeline::new(store.clone(), MockConfig::new(ValidationMode::Clamp));

        let records = pipeline.extract().await.unwrap();
        let outcome = pipeline.transform(records).await.unwrap();
        let key = pipeline.load(outcome).await.unwrap();

        assert_eq!(key, "reports/recommendations.csv");
        assert!(store.get("reports/recommendations.csv").await.is_some());

        let json = store.get("reports/recommendations.json").await.unwrap();
        let report: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(report["scored"], 1);
        assert_eq!(report["distribution"]["OWN"], 1);
        assert_eq!(report["results"][0]["respondentId"], "r1");
    }
}
