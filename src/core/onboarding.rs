use crate::domain::model::{GeoPreference, Goal, SurveyAnswers, UsagePriority};
use crate::utils::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    Goals,
    Budget,
    Usage,
    Geography,
    Result,
}

impl OnboardingStep {
    const ORDER: [OnboardingStep; 6] = [
        OnboardingStep::Welcome,
        OnboardingStep::Goals,
        OnboardingStep::Budget,
        OnboardingStep::Usage,
        OnboardingStep::Geography,
        OnboardingStep::Result,
    ];

    /// Number of questionnaire steps before the result.
    pub const QUESTION_COUNT: usize = 5;

    pub fn index(&self) -> usize {
        Self::ORDER.iter().position(|s| s == self).unwrap_or(0)
    }

    fn next(&self) -> Self {
        Self::ORDER
            .get(self.index() + 1)
            .copied()
            .unwrap_or(OnboardingStep::Result)
    }

    fn previous(&self) -> Self {
        self.index()
            .checked_sub(1)
            .map(|i| Self::ORDER[i])
            .unwrap_or(OnboardingStep::Welcome)
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OnboardingStep::Welcome => "welcome",
            OnboardingStep::Goals => "goals",
            OnboardingStep::Budget => "budget",
            OnboardingStep::Usage => "usage",
            OnboardingStep::Geography => "geography",
            OnboardingStep::Result => "result",
        };
        f.write_str(name)
    }
}

/// Answer submitted for a single questionnaire step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepAnswer {
    Welcome,
    Goals {
        goals: BTreeSet<Goal>,
    },
    Budget {
        budget_min: i64,
        budget_max: i64,
        monthly_payment_comfort: i64,
        open_to_financing: bool,
    },
    Usage {
        usage_vs_yield: Option<UsagePriority>,
        expected_usage_days: i64,
    },
    Geography {
        geo_preference: GeoPreference,
    },
}

impl StepAnswer {
    pub fn step(&self) -> OnboardingStep {
        match self {
            StepAnswer::Welcome => OnboardingStep::Welcome,
            StepAnswer::Goals { .. } => OnboardingStep::Goals,
            StepAnswer::Budget { .. } => OnboardingStep::Budget,
            StepAnswer::Usage { .. } => OnboardingStep::Usage,
            StepAnswer::Geography { .. } => OnboardingStep::Geography,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Draft {
    goals: Option<BTreeSet<Goal>>,
    budget: Option<(i64, i64, i64, bool)>,
    usage: Option<(Option<UsagePriority>, i64)>,
    geography: Option<GeoPreference>,
}

/// Questionnaire state for one onboarding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingSession {
    step: OnboardingStep,
    draft: Draft,
}

impl Default for OnboardingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingSession {
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Welcome,
            draft: Draft::default(),
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    /// Answered steps out of `QUESTION_COUNT`.
    pub fn progress(&self) -> (usize, usize) {
        (self.step.index(), OnboardingStep::QUESTION_COUNT)
    }

    pub fn is_complete(&self) -> bool {
        self.step == OnboardingStep::Result
    }

    pub fn apply(&mut self, answer: StepAnswer) -> Result<OnboardingStep> {
        let submitted = answer.step();
        if submitted != self.step {
            return Err(AdvisorError::StepOutOfOrder {
                expected: self.step.to_string(),
                actual: submitted.to_string(),
            });
        }

        match answer {
            StepAnswer::Welcome => {}
            StepAnswer::Goals { goals } => self.draft.goals = Some(goals),
            StepAnswer::Budget {
                budget_min,
                budget_max,
                monthly_payment_comfort,
                open_to_financing,
            } => {
                self.draft.budget = Some((
                    budget_min,
                    budget_max,
                    monthly_payment_comfort,
                    open_to_financing,
                ))
            }
            StepAnswer::Usage {
                usage_vs_yield,
                expected_usage_days,
            } => self.draft.usage = Some((usage_vs_yield, expected_usage_days)),
            StepAnswer::Geography { geo_preference } => {
                self.draft.geography = Some(geo_preference)
            }
        }

        self.step = self.step.next();
        tracing::debug!("Onboarding advanced to {}", self.step);
        Ok(self.step)
    }

    /// Step back so the previous answer can be changed.
    pub fn back(&mut self) -> OnboardingStep {
        self.step = self.step.previous();
        self.step
    }

    pub fn answers(&self) -> Result<SurveyAnswers> {
        if !self.is_complete() {
            return Err(AdvisorError::IncompleteSurvey {
                step: self.step.to_string(),
            });
        }

        let incomplete = |step: OnboardingStep| AdvisorError::IncompleteSurvey {
            step: step.to_string(),
        };
        let goals = self
            .draft
            .goals
            .clone()
            .ok_or_else(|| incomplete(OnboardingStep::Goals))?;
        let (budget_min, budget_max, monthly_payment_comfort, open_to_financing) = self
            .draft
            .budget
            .ok_or_else(|| incomplete(OnboardingStep::Budget))?;
        let (usage_vs_yield, expected_usage_days) = self
            .draft
            .usage
            .ok_or_else(|| incomplete(OnboardingStep::Usage))?;
        let geo_preference = self
            .draft
            .geography
            .ok_or_else(|| incomplete(OnboardingStep::Geography))?;

        Ok(SurveyAnswers {
            goals,
            budget_min,
            budget_max,
            monthly_payment_comfort,
            open_to_financing,
            usage_vs_yield,
            geo_preference,
            expected_usage_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_session() -> OnboardingSession {
        let mut session = OnboardingSession::new();
        session.apply(StepAnswer::Welcome).unwrap();
        session
            .apply(StepAnswer::Goals {
                goals: [Goal::ShareOwnership].into_iter().collect(),
            })
            .unwrap();
        session
            .apply(StepAnswer::Budget {
                budget_min: 40_000,
                budget_max: 90_000,
                monthly_payment_comfort: 1_500,
                open_to_financing: true,
            })
            .unwrap();
        session
            .apply(StepAnswer::Usage {
                usage_vs_yield: Some(UsagePriority::LifestylePlusIncome),
                expected_usage_days: 60,
            })
            .unwrap();
        session
            .apply(StepAnswer::Geography {
                geo_preference: GeoPreference::Region,
            })
            .unwrap();
        session
    }

    #[test]
    fn test_complete_flow_builds_answers() {
        let session = complete_session();
        assert!(session.is_complete());
        assert_eq!(session.progress(), (5, 5));

        let answers = session.answers().unwrap();
        assert!(answers.goals.contains(&Goal::ShareOwnership));
        assert_eq!(answers.budget_max, 90_000);
        assert_eq!(answers.expected_usage_days, 60);
        assert_eq!(answers.geo_preference, GeoPreference::Region);
    }

    #[test]
    fn test_out_of_order_answer_is_rejected() {
        let mut session = OnboardingSession::new();
        let err = session
            .apply(StepAnswer::Geography {
                geo_preference: GeoPreference::NearMe,
            })
            .unwrap_err();

        assert!(matches!(
            err,
            AdvisorError::StepOutOfOrder { ref expected, ref actual }
                if expected == "welcome" && actual == "geography"
        ));
        assert_eq!(session.step(), OnboardingStep::Welcome);
    }

    #[test]
    fn test_answers_before_result_is_incomplete() {
        let mut session = OnboardingSession::new();
        session.apply(StepAnswer::Welcome).unwrap();
        assert!(matches!(
            session.answers(),
            Err(AdvisorError::IncompleteSurvey { .. })
        ));
    }

    #[test]
    fn test_back_allows_changing_an_answer() {
        let mut session = complete_session();
        assert_eq!(session.back(), OnboardingStep::Geography);
        assert_eq!(session.back(), OnboardingStep::Usage);

        session
            .apply(StepAnswer::Usage {
                usage_vs_yield: Some(UsagePriority::Lifestyle),
                expected_usage_days: 120,
            })
            .unwrap();
        session
            .apply(StepAnswer::Geography {
                geo_preference: GeoPreference::Region,
            })
            .unwrap();

        let answers = session.answers().unwrap();
        assert_eq!(answers.usage_vs_yield, Some(UsagePriority::Lifestyle));
        assert_eq!(answers.expected_usage_days, 120);
    }

    #[test]
    fn test_back_at_welcome_stays() {
        let mut session = OnboardingSession::new();
        assert_eq!(session.back(), OnboardingStep::Welcome);
    }

    #[test]
    fn test_step_answer_json() {
        let json = r#"{"step": "usage", "usage_vs_yield": "mostly_income", "expected_usage_days": 14}"#;
        let answer: StepAnswer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.step(), OnboardingStep::Usage);
    }
}
