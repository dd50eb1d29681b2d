// Exercise dispatch: picks the rule set for a tag and handles inbound requests

use crate::core::config::Config;
use crate::core::exercises::analyze_exercise;
use crate::models::analysis::{
    AnalysisError, AnalysisRequest, AnalysisResult, ExerciseType, Verdict,
};
use crate::models::pose::Landmark;
use crate::platform::pose::LandmarkBridge;
use tracing::{debug, info};

/// Analyze one frame for the exercise named by `exercise` (case-insensitive).
///
/// An absent or empty landmark set yields the "no body" verdict before the tag
/// is looked at. Unknown tags are returned as errors, never as verdicts.
pub fn analyze(exercise: &str, landmarks: Option<&[Landmark]>) -> AnalysisResult<Verdict> {
    let landmarks = match landmarks {
        Some(landmarks) if !landmarks.is_empty() => landmarks,
        _ => {
            debug!(exercise, "No landmarks in frame");
            return Ok(Verdict::no_body());
        }
    };

    let exercise: ExerciseType = exercise.parse()?;
    Ok(analyze_exercise(exercise, landmarks))
}

/// Request-level front end over [`analyze`]
#[derive(Debug, Clone)]
pub struct FormAnalyzer {
    default_exercise: ExerciseType,
}

impl FormAnalyzer {
    pub fn new(config: &Config) -> AnalysisResult<Self> {
        Ok(Self {
            default_exercise: config.default_exercise.parse()?,
        })
    }

    pub fn default_exercise(&self) -> ExerciseType {
        self.default_exercise
    }

    /// Analyze a decoded request; a missing tag falls back to the configured default
    pub fn analyze_request(&self, request: &AnalysisRequest) -> AnalysisResult<Verdict> {
        let exercise = request
            .exercise_type
            .as_deref()
            .unwrap_or(self.default_exercise.as_str());

        analyze(exercise, request.landmarks.as_deref())
    }

    /// Decode a JSON request and analyze it. Malformed JSON is an `InvalidRequest`.
    pub fn analyze_request_json(&self, json: &str) -> AnalysisResult<Verdict> {
        let request: AnalysisRequest = serde_json::from_str(json)?;
        self.analyze_request(&request)
    }

    /// Run the detector on a raw frame, then analyze whatever it found
    pub fn analyze_frame<B: LandmarkBridge>(
        &self,
        bridge: &B,
        frame_data: &[u8],
        exercise: Option<&str>,
    ) -> AnalysisResult<Verdict> {
        let detection = bridge.process_frame(frame_data).map_err(AnalysisError::from)?;
        info!(
            detected = detection.landmarks.is_some(),
            processing_time_ms = detection.processing_time_ms,
            "Landmark detection finished"
        );

        let exercise = exercise.unwrap_or(self.default_exercise.as_str());
        analyze(exercise, detection.landmarks.as_deref())
    }
}
