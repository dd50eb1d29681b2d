pub mod core;
pub mod models;
pub mod platform;

pub use core::config::Config;
pub use core::exercises::analyze_exercise;
pub use core::form_analyzer::{analyze, FormAnalyzer};
pub use models::analysis::{
    AnalysisError, AnalysisRequest, AnalysisResult, AngleValue, ExerciseType, HealthStatus,
    Position, Posture, Verdict,
};
pub use models::pose::{BodyLandmark, Landmark, PoseError};

/// Liveness probe payload
pub fn health_check() -> HealthStatus {
    HealthStatus {
        status: "ok".to_string(),
        message: "Exercise analysis API is running".to_string(),
    }
}
