//! Degree audit and next-semester recommendation engine.

pub mod progress;
pub mod recommend;

pub use progress::{CompletedCourse, GraduationProgress, ProgressThresholds};
pub use recommend::{
    DEFAULT_MAX_CREDITS, DEFAULT_POOL_LIMIT, Recommendation, RecommendationEngine,
    RecommendationOutcome,
};
