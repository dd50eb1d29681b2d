// Data models for exercise form analysis: tags, verdicts, requests, errors

use crate::models::pose::{Landmark, PoseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Shown when the detector found no body in the frame
pub const NO_BODY_MESSAGE: &str = "No body detected. Please make sure your full body is visible.";

// ==============================================================================
// Exercise Types
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseType {
    #[serde(rename = "push-up")]
    PushUp,
    #[serde(rename = "squat")]
    Squat,
    #[serde(rename = "sit-up")]
    SitUp,
    #[serde(rename = "pull-up")]
    PullUp,
    #[serde(rename = "walk")]
    Walk,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 5] = [
        ExerciseType::PushUp,
        ExerciseType::Squat,
        ExerciseType::SitUp,
        ExerciseType::PullUp,
        ExerciseType::Walk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::PushUp => "push-up",
            ExerciseType::Squat => "squat",
            ExerciseType::SitUp => "sit-up",
            ExerciseType::PullUp => "pull-up",
            ExerciseType::Walk => "walk",
        }
    }
}

impl std::fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = AnalysisError;

    /// Tags are matched case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.to_lowercase();
        ExerciseType::ALL
            .into_iter()
            .find(|exercise| exercise.as_str() == tag)
            .ok_or(AnalysisError::UnsupportedExercise(tag))
    }
}

// ==============================================================================
// Verdict
// ==============================================================================

/// Movement phase of a repetition-based exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Up,
    Down,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Up => "up",
            Position::Down => "down",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posture {
    pub correct: bool,
    pub message: String,
}

impl Posture {
    pub fn good(message: &str) -> Self {
        Self {
            correct: true,
            message: message.to_string(),
        }
    }

    pub fn incorrect(message: &str) -> Self {
        Self {
            correct: false,
            message: message.to_string(),
        }
    }

    /// Mark the posture wrong; the latest flagged message replaces any earlier one
    pub fn flag(&mut self, message: &str) {
        self.correct = false;
        self.message.clear();
        self.message.push_str(message);
    }
}

/// A reported angle diagnostic: whole degrees, or a percentage metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleValue {
    Degrees(i64),
    Percent(f64),
}

impl AngleValue {
    /// Whole degrees, truncated toward zero
    pub fn degrees(angle: f64) -> Self {
        AngleValue::Degrees(angle.trunc() as i64)
    }

    /// Percentage rounded to one decimal place, ties to even
    pub fn percent(value: f64) -> Self {
        AngleValue::Percent((value * 10.0).round_ties_even() / 10.0)
    }
}

pub type AngleReport = BTreeMap<String, AngleValue>;

/// Result of analyzing one frame. Built fresh per call; never depends on earlier frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub posture: Posture,
    /// 1 while the frame is in the exercise's active phase, else 0
    pub rep_count: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angles: Option<AngleReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Verdict {
    pub fn no_body() -> Self {
        Self {
            posture: Posture::incorrect(NO_BODY_MESSAGE),
            rep_count: 0,
            position: None,
            angles: None,
            error: None,
        }
    }

    /// Frame could not be analyzed; `diagnostic` says why
    pub fn degraded(message: &str, diagnostic: String) -> Self {
        Self {
            posture: Posture::incorrect(message),
            rep_count: 0,
            position: None,
            angles: None,
            error: Some(diagnostic),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    pub fn angle(&self, name: &str) -> Option<AngleValue> {
        self.angles.as_ref().and_then(|angles| angles.get(name).copied())
    }
}

// ==============================================================================
// DTOs
// ==============================================================================

/// Inbound analysis request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Landmark>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

// ==============================================================================
// Error Types
// ==============================================================================

/// Errors surfaced to the caller, as opposed to degraded verdicts
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Unsupported exercise type: {0}")]
    UnsupportedExercise(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Landmark detection failed: {0}")]
    Detection(#[from] PoseError),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::InvalidRequest(err.to_string())
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_tag_is_case_insensitive() {
        assert_eq!("Push-Up".parse::<ExerciseType>().unwrap(), ExerciseType::PushUp);
        assert_eq!("SQUAT".parse::<ExerciseType>().unwrap(), ExerciseType::Squat);
        assert_eq!("walk".parse::<ExerciseType>().unwrap(), ExerciseType::Walk);
    }

    #[test]
    fn test_unknown_exercise_tag() {
        match "Lunge".parse::<ExerciseType>() {
            Err(AnalysisError::UnsupportedExercise(tag)) => assert_eq!(tag, "lunge"),
            other => panic!("expected unsupported exercise, got {:?}", other),
        }
    }

    #[test]
    fn test_angle_value_conversions() {
        assert_eq!(AngleValue::degrees(89.999), AngleValue::Degrees(89));
        assert_eq!(AngleValue::degrees(160.2), AngleValue::Degrees(160));
        assert_eq!(AngleValue::percent(6.000000238), AngleValue::Percent(6.0));
        assert_eq!(AngleValue::percent(3.46), AngleValue::Percent(3.5));
        assert_eq!(AngleValue::percent(6.25), AngleValue::Percent(6.2));
        assert_eq!(AngleValue::percent(0.75), AngleValue::Percent(0.8));
    }

    #[test]
    fn test_posture_flag_overwrites_message() {
        let mut posture = Posture::good("fine");
        posture.flag("first");
        posture.flag("second");
        assert!(!posture.correct);
        assert_eq!(posture.message, "second");
    }

    #[test]
    fn test_no_body_verdict_shape() {
        let json = serde_json::to_value(Verdict::no_body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "posture": { "correct": false, "message": NO_BODY_MESSAGE },
                "repCount": 0
            })
        );
    }

    #[test]
    fn test_verdict_serialization_field_names() {
        let mut angles = AngleReport::new();
        angles.insert("upperBody".to_string(), AngleValue::Degrees(172));
        angles.insert("hipAlignment".to_string(), AngleValue::Percent(6.0));
        let verdict = Verdict {
            posture: Posture::good("ok"),
            rep_count: 1,
            position: Some(Position::Down),
            angles: Some(angles),
            error: None,
        };

        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains(r#""repCount":1"#));
        assert!(json.contains(r#""position":"down""#));
        assert!(json.contains(r#""hipAlignment":6.0"#));
        assert!(json.contains(r#""upperBody":172"#));
        assert!(!json.contains("error"));

        let parsed: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, verdict);
    }

    #[test]
    fn test_request_defaults() {
        let request: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert!(request.exercise_type.is_none());
        assert!(request.landmarks.is_none());

        let err: AnalysisError = serde_json::from_str::<AnalysisRequest>(r#"{"landmarks": 5}"#)
            .unwrap_err()
            .into();
        assert!(matches!(err, AnalysisError::InvalidRequest(_)));
    }
}
