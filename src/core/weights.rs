use serde::{Deserialize, Serialize};

/// Points added to a modality when a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub goal: u32,
    pub usage_priority: u32,
    /// EARN credit for `mostly_income`, next to the full INVEST credit.
    pub usage_priority_secondary: u32,
    pub usage_days: u32,
    pub budget: u32,
    pub financing: u32,
}

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    goal: 3,
    usage_priority: 2,
    usage_priority_secondary: 1,
    usage_days: 2,
    budget: 2,
    financing: 1,
};

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    /// At or below: low usage.
    pub low_usage_days: i64,
    /// At or above: high usage.
    pub high_usage_days: i64,
    pub max_usage_days: i64,
    /// Boundary between fractional share pricing and outright purchase.
    pub full_purchase_budget: i64,
}

pub const DEFAULT_THRESHOLDS: ScoringThresholds = ScoringThresholds {
    low_usage_days: 20,
    high_usage_days: 100,
    max_usage_days: 180,
    full_purchase_budget: 150_000,
};

impl Default for ScoringThresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub thresholds: ScoringThresholds,
}

/// How out-of-range survey answers are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    Clamp,
    Strict,
}
