//! Ownership-modality recommendation.
//!
//! Scoring is additive: every rule that fires credits a fixed weight to one
//! modality. Intent signals (stated goals and the usage/yield priority)
//! decide whether the answers say anything at all; the refining signals
//! (usage days, budget, financing) only sharpen an expressed intent. When
//! no intent signal fires every modality receives the same base score and
//! the result is a flat split.

use crate::core::weights::{ScoringConfig, ValidationMode};
use crate::domain::model::{
    Alternative, Goal, Modality, ModalityScore, RecommendationResult, Signal, SignalContribution,
    SurveyAnswers, UsagePriority,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_input_range;
use std::cmp::Reverse;

const FALLBACK_BASE_SCORE: u32 = 1;

#[derive(Debug, Clone, Default)]
pub struct Recommender {
    config: ScoringConfig,
    mode: ValidationMode,
}

impl Recommender {
    pub fn new(config: ScoringConfig, mode: ValidationMode) -> Self {
        Self { config, mode }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Score `answers`. Only fails in strict mode, on out-of-range input.
    pub fn recommend(&self, answers: &SurveyAnswers) -> Result<RecommendationResult> {
        let prepared = self.prepare(answers)?;
        Ok(self.score(&prepared))
    }

    /// Clamp or validate the answers according to the configured mode.
    pub fn prepare(&self, answers: &SurveyAnswers) -> Result<SurveyAnswers> {
        match self.mode {
            ValidationMode::Clamp => Ok(self.clamp(answers)),
            ValidationMode::Strict => {
                self.check(answers)?;
                Ok(answers.clone())
            }
        }
    }

    fn clamp(&self, answers: &SurveyAnswers) -> SurveyAnswers {
        let mut clamped = answers.clone();
        let max_days = self.config.thresholds.max_usage_days.max(0);

        clamped.expected_usage_days = answers.expected_usage_days.clamp(0, max_days);
        clamped.monthly_payment_comfort = answers.monthly_payment_comfort.max(0);

        let low = answers.budget_min.max(0);
        let high = answers.budget_max.max(0);
        clamped.budget_min = low.min(high);
        clamped.budget_max = low.max(high);

        if clamped != *answers {
            tracing::debug!("Clamped out-of-range survey answers: {:?}", clamped);
        }
        clamped
    }

    fn check(&self, answers: &SurveyAnswers) -> Result<()> {
        let max_days = self.config.thresholds.max_usage_days;
        validate_input_range("expectedUsageDays", answers.expected_usage_days, 0, max_days)?;
        validate_input_range("budgetMin", answers.budget_min, 0, i64::MAX)?;
        validate_input_range("budgetMax", answers.budget_max, answers.budget_min, i64::MAX)?;
        validate_input_range("monthlyPaymentComfort", answers.monthly_payment_comfort, 0, i64::MAX)?;
        Ok(())
    }

    fn score(&self, answers: &SurveyAnswers) -> RecommendationResult {
        let weights = &self.config.weights;
        let thresholds = &self.config.thresholds;
        let mut sheet = ScoreSheet::default();

        for goal in &answers.goals {
            let modality = match goal {
                Goal::OwnBoat => Modality::Own,
                Goal::ReduceCosts => Modality::Earn,
                Goal::ShareOwnership => Modality::CoOwn,
                Goal::FinancialInvestment => Modality::Invest,
            };
            sheet.credit(Signal::Goal(*goal), modality, weights.goal);
        }

        if let Some(priority) = answers.usage_vs_yield {
            let signal = Signal::UsagePriority(priority);
            match priority {
                UsagePriority::Lifestyle => sheet.credit(signal, Modality::Own, weights.usage_priority),
                UsagePriority::LifestylePlusIncome => {
                    sheet.credit(signal, Modality::Earn, weights.usage_priority)
                }
                UsagePriority::MostlyIncome => {
                    sheet.credit(signal, Modality::Invest, weights.usage_priority);
                    sheet.credit(signal, Modality::Earn, weights.usage_priority_secondary);
                }
                UsagePriority::PureInvestment => {
                    sheet.credit(signal, Modality::Invest, weights.usage_priority)
                }
            }
        }

        if sheet.total() > 0 {
            let days = answers.expected_usage_days;
            if days >= thresholds.high_usage_days {
                sheet.credit(Signal::HighUsageDays, Modality::Own, weights.usage_days);
            } else if days <= thresholds.low_usage_days {
                sheet.credit(Signal::LowUsageDays, Modality::Invest, weights.usage_days);
            } else {
                sheet.credit(Signal::MidUsageDays, Modality::CoOwn, weights.usage_days);
            }

            if answers.budget_max < thresholds.full_purchase_budget {
                sheet.credit(Signal::FractionalBudget, Modality::CoOwn, weights.budget);
            }
            if answers.budget_min >= thresholds.full_purchase_budget {
                sheet.credit(Signal::FullPurchaseBudget, Modality::Own, weights.budget);
            }

            if answers.open_to_financing {
                sheet.credit(Signal::Financing, Modality::Own, weights.financing);
                sheet.credit(Signal::Financing, Modality::CoOwn, weights.financing);
            }
        } else {
            tracing::debug!("No intent signal in survey answers, using flat fallback");
        }

        sheet.finish()
    }
}

#[derive(Debug, Default)]
struct ScoreSheet {
    raw: [u32; 4],
    signals: Vec<SignalContribution>,
}

impl ScoreSheet {
    fn credit(&mut self, signal: Signal, modality: Modality, weight: u32) {
        if weight == 0 {
            return;
        }
        let slot = &mut self.raw[modality.priority()];
        *slot = slot.saturating_add(weight);
        self.signals.push(SignalContribution {
            signal,
            modality,
            weight,
        });
    }

    fn total(&self) -> u64 {
        self.raw.iter().map(|&r| u64::from(r)).sum()
    }

    fn finish(self) -> RecommendationResult {
        let fallback = self.total() == 0;
        let basis = if fallback {
            [FALLBACK_BASE_SCORE; 4]
        } else {
            self.raw
        };
        let total = basis.iter().map(|&b| u64::from(b)).sum::<u64>() as f64;

        let scores: Vec<ModalityScore> = Modality::EVALUATION_ORDER
            .iter()
            .zip(self.raw.iter().zip(basis.iter()))
            .map(|(&modality, (&raw, &base))| ModalityScore {
                modality,
                raw_score: raw,
                normalized_confidence: (100.0 * f64::from(base) / total).round() as u8,
            })
            .collect();

        // 同分時依評估順序決定
        let mut ranked = scores.clone();
        ranked.sort_by_key(|s| (Reverse(s.raw_score), s.modality.priority()));

        let primary = &ranked[0];
        let alternatives = ranked[1..]
            .iter()
            .map(|s| Alternative {
                modality: s.modality,
                score: s.normalized_confidence,
            })
            .collect();

        RecommendationResult {
            primary: primary.modality,
            confidence: primary.normalized_confidence,
            alternatives,
            scores,
            signals: self.signals,
            fallback,
        }
    }
}

/// Score with the default weights, clamping out-of-range answers.
pub fn recommend(answers: &SurveyAnswers) -> RecommendationResult {
    let recommender = Recommender::default();
    let prepared = recommender.clamp(answers);
    recommender.score(&prepared)
}
