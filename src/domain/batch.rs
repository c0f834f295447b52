use crate::domain::model::{Modality, RecommendationResult, SurveyAnswers};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub respondent_id: String,
    pub answers: SurveyAnswers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    pub respondent_id: String,
    pub result: RecommendationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub scored: usize,
    pub skipped: usize,
    pub distribution: BTreeMap<Modality, usize>,
    pub results: Vec<ScoredRecord>,
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub report: BatchReport,
    pub csv_output: String,
}
