use crate::core::recommender::Recommender;
use crate::core::weights::ValidationMode;
use crate::core::{BatchOutcome, ConfigProvider, KeyValueStore, Pipeline, SurveyRecord};
use crate::domain::batch::{BatchReport, ScoredRecord};
use crate::domain::model::{GeoPreference, Goal, Modality, SurveyAnswers, UsagePriority};
use crate::utils::error::{AdvisorError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const CSV_HEADER: [&str; 7] = [
    "respondent_id",
    "primary",
    "confidence",
    "own",
    "co_own",
    "earn",
    "invest",
];

/// 匯出檔的一列，列舉欄位先以字串讀入再轉換
#[derive(Debug, Deserialize)]
struct SurveyRow {
    respondent_id: String,
    #[serde(default)]
    goals: String,
    budget_min: i64,
    budget_max: i64,
    #[serde(default)]
    monthly_payment_comfort: i64,
    #[serde(default)]
    open_to_financing: bool,
    #[serde(default)]
    usage_vs_yield: String,
    #[serde(default)]
    geo_preference: String,
    expected_usage_days: i64,
}

impl SurveyRow {
    fn into_record(self) -> std::result::Result<SurveyRecord, String> {
        let mut goals = BTreeSet::new();
        for tag in self.goals.split(';').map(str::trim).filter(|t| !t.is_empty()) {
            let goal = Goal::parse(tag).ok_or_else(|| format!("unknown goal '{}'", tag))?;
            goals.insert(goal);
        }

        let usage_vs_yield = match self.usage_vs_yield.trim() {
            "" => None,
            value => Some(
                UsagePriority::parse(value)
                    .ok_or_else(|| format!("unknown usage_vs_yield '{}'", value))?,
            ),
        };

        let geo_preference = match self.geo_preference.trim() {
            "" => GeoPreference::default(),
            value => GeoPreference::parse(value)
                .ok_or_else(|| format!("unknown geo_preference '{}'", value))?,
        };

        Ok(SurveyRecord {
            respondent_id: self.respondent_id,
            answers: SurveyAnswers {
                goals,
                budget_min: self.budget_min,
                budget_max: self.budget_max,
                monthly_payment_comfort: self.monthly_payment_comfort,
                open_to_financing: self.open_to_financing,
                usage_vs_yield,
                geo_preference,
                expected_usage_days: self.expected_usage_days,
            },
        })
    }
}

/// Scores a CSV export of onboarding answers in one pass.
pub struct BatchPipeline<S: KeyValueStore, C: ConfigProvider> {
    pub(crate) store: S,
    pub(crate) config: C,
    pub(crate) recommender: Recommender,
    skipped: AtomicUsize,
}

impl<S: KeyValueStore, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(store: S, config: C) -> Self {
        let recommender = Recommender::new(*config.scoring(), config.validation_mode());
        Self {
            store,
            config,
            recommender,
            skipped: AtomicUsize::new(0),
        }
    }

    fn output_key(&self, name: &str) -> String {
        let prefix = self.config.output_prefix().trim_end_matches('/');
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        }
    }

    fn reject_row(&self, row: usize, reason: String) -> Result<()> {
        match self.config.validation_mode() {
            ValidationMode::Strict => Err(AdvisorError::ProcessingError {
                message: format!("row {}: {}", row, reason),
            }),
            ValidationMode::Clamp => {
                tracing::warn!("⚠️ Skipping row {}: {}", row, reason);
                self.skipped.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: KeyValueStore, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SurveyRecord>> {
        let key = self.config.input_key();
        tracing::debug!("Reading survey export from: {}", key);

        let data = self
            .store
            .load(key)
            .await?
            .ok_or_else(|| AdvisorError::ProcessingError {
                message: format!("input '{}' not found", key),
            })?;

        self.skipped.store(0, Ordering::Relaxed);
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<SurveyRow>().enumerate() {
            // 第 1 列是標題
            let line = index + 2;
            match row.map_err(|e| e.to_string()).and_then(SurveyRow::into_record) {
                Ok(record) => records.push(record),
                Err(reason) => self.reject_row(line, reason)?,
            }
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<SurveyRecord>) -> Result<BatchOutcome> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        let mut distribution: BTreeMap<Modality, usize> = BTreeMap::new();
        let mut results = Vec::with_capacity(data.len());

        for record in data {
            let result = self.recommender.recommend(&record.answers).map_err(|e| {
                tracing::error!("❌ Respondent {} rejected: {}", record.respondent_id, e);
                AdvisorError::ProcessingError {
                    message: format!("respondent {}: {}", record.respondent_id, e),
                }
            })?;

            writer.write_record([
                record.respondent_id.clone(),
                result.primary.tag().to_string(),
                result.confidence.to_string(),
                result.confidence_for(Modality::Own).to_string(),
                result.confidence_for(Modality::CoOwn).to_string(),
                result.confidence_for(Modality::Earn).to_string(),
                result.confidence_for(Modality::Invest).to_string(),
            ])?;

            *distribution.entry(result.primary).or_insert(0) += 1;
            results.push(ScoredRecord {
                respondent_id: record.respondent_id,
                result,
            });
        }

        let bytes = writer.into_inner().map_err(|e| AdvisorError::ProcessingError {
            message: format!("failed to flush CSV output: {}", e),
        })?;
        let csv_output = String::from_utf8(bytes).map_err(|e| AdvisorError::ProcessingError {
            message: format!("CSV output is not UTF-8: {}", e),
        })?;

        Ok(BatchOutcome {
            report: BatchReport {
                scored: results.len(),
                skipped: self.skipped.load(Ordering::Relaxed),
                distribution,
                results,
            },
            csv_output,
        })
    }

    async fn load(&self, outcome: BatchOutcome) -> Result<String> {
        let csv_key = self.output_key("recommendations.csv");
        let json_key = self.output_key("recommendations.json");

        self.store
            .save(&csv_key, outcome.csv_output.as_bytes())
            .await?;

        let json_data = serde_json::to_vec_pretty(&outcome.report)?;
        tracing::debug!("Writing JSON report ({} bytes)", json_data.len());
        self.store.save(&json_key, &json_data).await?;

        Ok(csv_key)
    }
}
