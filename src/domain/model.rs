use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the four yacht-access business models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Own,
    Earn,
    CoOwn,
    Invest,
}

impl Modality {
    /// Evaluation order; also the tie-break priority.
    pub const EVALUATION_ORDER: [Modality; 4] =
        [Modality::Own, Modality::CoOwn, Modality::Earn, Modality::Invest];

    pub fn tag(&self) -> &'static str {
        match self {
            Modality::Own => "OWN",
            Modality::Earn => "EARN",
            Modality::CoOwn => "CO_OWN",
            Modality::Invest => "INVEST",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "OWN" => Some(Modality::Own),
            "EARN" => Some(Modality::Earn),
            "CO_OWN" => Some(Modality::CoOwn),
            "INVEST" => Some(Modality::Invest),
            _ => None,
        }
    }

    pub(crate) fn priority(&self) -> usize {
        Self::EVALUATION_ORDER
            .iter()
            .position(|m| m == self)
            .unwrap_or(Self::EVALUATION_ORDER.len())
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    OwnBoat,
    ReduceCosts,
    ShareOwnership,
    FinancialInvestment,
}

impl Goal {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "own_boat" => Some(Goal::OwnBoat),
            "reduce_costs" => Some(Goal::ReduceCosts),
            "share_ownership" => Some(Goal::ShareOwnership),
            "financial_investment" => Some(Goal::FinancialInvestment),
            _ => None,
        }
    }
}

/// Trade-off between personal usage and yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsagePriority {
    Lifestyle,
    LifestylePlusIncome,
    MostlyIncome,
    PureInvestment,
}

impl UsagePriority {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "lifestyle" => Some(UsagePriority::Lifestyle),
            "lifestyle_plus_income" => Some(UsagePriority::LifestylePlusIncome),
            "mostly_income" => Some(UsagePriority::MostlyIncome),
            "pure_investment" => Some(UsagePriority::PureInvestment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoPreference {
    NearMe,
    Region,
    #[default]
    Anywhere,
}

impl GeoPreference {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "near_me" => Some(GeoPreference::NearMe),
            "region" => Some(GeoPreference::Region),
            "anywhere" => Some(GeoPreference::Anywhere),
            _ => None,
        }
    }
}

/// Answers collected by the onboarding questionnaire.
///
/// Numeric fields are signed so that out-of-range client input can be
/// clamped or rejected instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnswers {
    #[serde(default)]
    pub goals: BTreeSet<Goal>,
    pub budget_min: i64,
    pub budget_max: i64,
    #[serde(default)]
    pub monthly_payment_comfort: i64,
    #[serde(default)]
    pub open_to_financing: bool,
    #[serde(default)]
    pub usage_vs_yield: Option<UsagePriority>,
    #[serde(default)]
    pub geo_preference: GeoPreference,
    pub expected_usage_days: i64,
}

/// A scoring rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Goal(Goal),
    UsagePriority(UsagePriority),
    HighUsageDays,
    MidUsageDays,
    LowUsageDays,
    FractionalBudget,
    FullPurchaseBudget,
    Financing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalContribution {
    pub signal: Signal,
    pub modality: Modality,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalityScore {
    pub modality: Modality,
    pub raw_score: u32,
    pub normalized_confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub modality: Modality,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub primary: Modality,
    pub confidence: u8,
    pub alternatives: Vec<Alternative>,
    /// All four scores in evaluation order.
    pub scores: Vec<ModalityScore>,
    pub signals: Vec<SignalContribution>,
    pub fallback: bool,
}

impl RecommendationResult {
    pub fn score_for(&self, modality: Modality) -> Option<&ModalityScore> {
        self.scores.iter().find(|s| s.modality == modality)
    }

    pub fn confidence_for(&self, modality: Modality) -> u8 {
        self.score_for(modality)
            .map(|s| s.normalized_confidence)
            .unwrap_or(0)
    }
}

/// Blob persisted after onboarding completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecommendation {
    pub answers: SurveyAnswers,
    pub result: RecommendationResult,
    pub completed_at: DateTime<Utc>,
}
