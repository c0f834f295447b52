use crate::core::onboarding::OnboardingSession;
use crate::core::recommender::Recommender;
use crate::domain::model::{Modality, StoredRecommendation, SurveyAnswers};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use chrono::Utc;

pub fn result_key(user: &str) -> String {
    format!("onboarding/{}/result.json", user)
}

pub fn completed_key(user: &str) -> String {
    format!("onboarding/{}/completed", user)
}

pub fn segment_key(user: &str) -> String {
    format!("onboarding/{}/segment", user)
}

/// Runs the recommender for finished onboarding sessions and remembers the
/// outcome per user through the injected store.
pub struct OnboardingAdvisor<S: KeyValueStore> {
    recommender: Recommender,
    store: S,
}

impl<S: KeyValueStore> OnboardingAdvisor<S> {
    pub fn new(recommender: Recommender, store: S) -> Self {
        Self { recommender, store }
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub async fn complete(
        &self,
        user: &str,
        session: &OnboardingSession,
    ) -> Result<StoredRecommendation> {
        let answers = session.answers()?;
        self.complete_answers(user, &answers).await
    }

    pub async fn complete_answers(
        &self,
        user: &str,
        answers: &SurveyAnswers,
    ) -> Result<StoredRecommendation> {
        let prepared = self.recommender.prepare(answers)?;
        let result = self.recommender.recommend(&prepared)?;

        tracing::info!(
            "🧭 Recommended {} for {} ({}% confidence)",
            result.primary,
            user,
            result.confidence
        );

        let stored = StoredRecommendation {
            answers: prepared,
            result,
            completed_at: Utc::now(),
        };

        let blob = serde_json::to_vec_pretty(&stored)?;
        self.store.save(&result_key(user), &blob).await?;
        self.store
            .save(&segment_key(user), stored.result.primary.tag().as_bytes())
            .await?;
        // 完成旗標最後寫入
        self.store.save(&completed_key(user), b"true").await?;

        tracing::debug!("Persisted onboarding result for {}", user);
        Ok(stored)
    }

    pub async fn last_result(&self, user: &str) -> Result<Option<StoredRecommendation>> {
        match self.store.load(&result_key(user)).await? {
            Some(blob) => Ok(Some(serde_json::from_slice(&blob)?)),
            None => Ok(None),
        }
    }

    pub async fn is_completed(&self, user: &str) -> Result<bool> {
        let flag = self.store.load(&completed_key(user)).await?;
        Ok(flag.as_deref() == Some(b"true".as_slice()))
    }

    pub async fn segment(&self, user: &str) -> Result<Option<Modality>> {
        let tag = self.store.load(&segment_key(user)).await?;
        Ok(tag.and_then(|bytes| Modality::from_tag(&String::from_utf8_lossy(&bytes))))
    }
}
