// Pose detector integration
// Provides the landmark bridge between external detectors and the analyzers

pub mod landmark_bridge;

pub use landmark_bridge::{
    DefaultLandmarkBridge, DetectionResult, JsonLandmarkBridge, LandmarkBridge,
};
