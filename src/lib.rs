pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{catalog::StaticCatalog, storage::MemoryStore};
pub use config::{cli::LocalStore, toml_config::AdvisorConfig};
pub use crate::core::{
    advisor::OnboardingAdvisor,
    batch::BatchRunner,
    onboarding::{OnboardingSession, OnboardingStep, StepAnswer},
    pipeline::BatchPipeline,
    recommender::{recommend, Recommender},
};
pub use domain::model::{
    Modality, RecommendationResult, StoredRecommendation, SurveyAnswers,
};
pub use utils::error::{AdvisorError, Result};
