// Landmark detector bridge
// Abstracts the external pose model that turns a frame into body landmarks.
// The model runs elsewhere (browser MediaPipe, a Python sidecar, ...); this
// crate only consumes its output.

use crate::core::config::Config;
use crate::models::pose::{Landmark, PoseError, PoseResult};
use serde::Deserialize;
use tracing::debug;

/// Detector output for one frame
#[derive(Debug, Clone, Default)]
pub struct DetectionResult {
    /// `None` when no body was found
    pub landmarks: Option<Vec<Landmark>>,
    pub processing_time_ms: u64,
}

/// Landmark bridge trait
/// Implement this for each detector backend
pub trait LandmarkBridge: Send + Sync {
    /// Initialize the detector
    fn new(config: &Config) -> PoseResult<Self>
    where
        Self: Sized;

    /// Run detection on one frame
    fn process_frame(&self, frame_data: &[u8]) -> PoseResult<DetectionResult>;

    /// Check if the detector is ready
    fn is_initialized(&self) -> bool;

    /// Get detector info
    fn get_model_info(&self) -> String;
}

// ==============================================================================
// JSON Implementation (detector output serialized by the client)
// ==============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetectorPayload {
    Bare(Vec<Landmark>),
    Wrapped(ScoredDetection),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScoredDetection {
    #[serde(default)]
    score: Option<f32>,
    #[serde(default)]
    landmarks: Option<Vec<Landmark>>,
}

/// Accepts landmarks that a client-side detector already produced, as JSON:
/// either a bare landmark array or `{"score": 0.9, "landmarks": [...]}`
pub struct JsonLandmarkBridge {
    min_detection_confidence: f32,
}

impl LandmarkBridge for JsonLandmarkBridge {
    fn new(config: &Config) -> PoseResult<Self> {
        if !(0.0..=1.0).contains(&config.min_detection_confidence) {
            return Err(PoseError::InferenceFailed(format!(
                "Invalid detection confidence: {}",
                config.min_detection_confidence
            )));
        }

        Ok(Self {
            min_detection_confidence: config.min_detection_confidence,
        })
    }

    fn process_frame(&self, frame_data: &[u8]) -> PoseResult<DetectionResult> {
        let start_time = std::time::Instant::now();

        let payload: DetectorPayload = serde_json::from_slice(frame_data).map_err(|e| {
            PoseError::InferenceFailed(format!("Failed to parse detector output: {}", e))
        })?;

        let landmarks = match payload {
            DetectorPayload::Bare(landmarks) => Some(landmarks),
            DetectorPayload::Wrapped(ScoredDetection { score, landmarks }) => match score {
                Some(score) if score < self.min_detection_confidence => {
                    debug!(
                        score,
                        threshold = self.min_detection_confidence,
                        "Detection below confidence threshold"
                    );
                    None
                }
                _ => landmarks,
            },
        };

        Ok(DetectionResult {
            landmarks: landmarks.filter(|l| !l.is_empty()),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    fn is_initialized(&self) -> bool {
        true
    }

    fn get_model_info(&self) -> String {
        format!(
            "JSON landmark bridge (client-side detector) - min detection confidence: {}",
            self.min_detection_confidence
        )
    }
}

// ==============================================================================
// Default Backend Selection
// ==============================================================================

pub type DefaultLandmarkBridge = JsonLandmarkBridge;

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge() -> JsonLandmarkBridge {
        JsonLandmarkBridge::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_bare_array() {
        let result = bridge()
            .process_frame(br#"[{"x":0.1,"y":0.2},{"x":0.3,"y":0.4,"visibility":0.9}]"#)
            .unwrap();
        let landmarks = result.landmarks.unwrap();
        assert_eq!(landmarks.len(), 2);
        assert_eq!(landmarks[1].visibility, Some(0.9));
    }

    #[test]
    fn test_wrapped_with_score() {
        let bridge = bridge();

        let confident = bridge
            .process_frame(br#"{"score":0.93,"landmarks":[{"x":0.5,"y":0.5}]}"#)
            .unwrap();
        assert!(confident.landmarks.is_some());

        let weak = bridge
            .process_frame(br#"{"score":0.2,"landmarks":[{"x":0.5,"y":0.5}]}"#)
            .unwrap();
        assert!(weak.landmarks.is_none());
    }

    #[test]
    fn test_empty_detection_is_no_body() {
        let bridge = bridge();
        assert!(bridge.process_frame(b"[]").unwrap().landmarks.is_none());
        assert!(bridge.process_frame(br#"{"landmarks":null}"#).unwrap().landmarks.is_none());
        assert!(bridge.process_frame(b"{}").unwrap().landmarks.is_none());
    }

    #[test]
    fn test_malformed_payload() {
        let err = bridge().process_frame(b"not json").unwrap_err();
        assert!(matches!(err, PoseError::InferenceFailed(_)));

        let err = bridge().process_frame(br#"[{"x":"left"}]"#).unwrap_err();
        assert!(matches!(err, PoseError::InferenceFailed(_)));
    }

    #[test]
    fn test_misspelled_field_is_rejected() {
        let err = bridge()
            .process_frame(br#"{"score":0.9,"landmark":[{"x":0.5,"y":0.5}]}"#)
            .unwrap_err();
        assert!(matches!(err, PoseError::InferenceFailed(_)));
    }

    #[test]
    fn test_model_info() {
        let bridge = bridge();
        assert!(bridge.is_initialized());
        assert!(bridge.get_model_info().contains("0.5"));
    }
}
