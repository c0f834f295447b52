pub mod advisor;
pub mod batch;
pub mod listings;
pub mod onboarding;
pub mod pipeline;
pub mod recommender;
pub mod weights;

pub use crate::domain::batch::{BatchOutcome, SurveyRecord};
pub use crate::domain::ports::{CatalogRepository, ConfigProvider, KeyValueStore, Pipeline};
pub use crate::utils::error::Result;
