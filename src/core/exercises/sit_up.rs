// Sit-up form rules

use super::{ExerciseRules, FormRule};
use crate::core::geometry::calculate_angle;
use crate::core::landmarks::PoseLandmarks;
use crate::models::analysis::{AngleReport, AngleValue, ExerciseType, Position};
use crate::models::pose::{BodyLandmark, PoseResult};

/// Torso angle below which the sit-up is in the up phase
pub const UP_TORSO_ANGLE: f64 = 130.0;
/// Acceptable knee bend range
pub const MIN_LEG_ANGLE: f64 = 30.0;
pub const MAX_LEG_ANGLE: f64 = 110.0;
/// Nose visibility required before the neck is checked
pub const NECK_CHECK_VISIBILITY: f64 = 0.8;
/// Nose-shoulder-hip angle below which the neck is being pulled
pub const MIN_NECK_ANGLE: f64 = 140.0;

pub const KNEES_MESSAGE: &str = "Keep your knees bent at about 90 degrees.";
pub const NECK_MESSAGE: &str = "Keep your neck neutral. Don't pull with your neck.";

pub struct SitUp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SitUpMetrics {
    pub torso_angle: f64,
    pub leg_angle: f64,
    /// Only measured when the nose is confidently visible
    pub neck_angle: Option<f64>,
}

fn knees_not_bent(m: &SitUpMetrics, _: Option<Position>) -> bool {
    m.leg_angle < MIN_LEG_ANGLE || m.leg_angle > MAX_LEG_ANGLE
}

fn neck_pulled(m: &SitUpMetrics, _: Option<Position>) -> bool {
    m.neck_angle.map_or(false, |angle| angle < MIN_NECK_ANGLE)
}

impl ExerciseRules for SitUp {
    type Metrics = SitUpMetrics;

    const EXERCISE: ExerciseType = ExerciseType::SitUp;

    // The nose is optional: it is only read when confidently visible
    const REQUIRED_LANDMARKS: &'static [BodyLandmark] = &[
        BodyLandmark::LeftShoulder,
        BodyLandmark::LeftHip,
        BodyLandmark::LeftKnee,
        BodyLandmark::LeftAnkle,
    ];

    const GOOD_FORM_MESSAGE: &'static str = "Good sit-up form! Keep your core engaged.";

    const CANNOT_ANALYZE_MESSAGE: &'static str =
        "Could not analyze sit-up form. Make sure your upper body is visible.";

    const ACTIVE_POSITION: Option<Position> = Some(Position::Up);

    const RULES: &'static [FormRule<SitUpMetrics>] = &[
        FormRule {
            name: "knee_bend",
            message: KNEES_MESSAGE,
            violated: knees_not_bent,
        },
        FormRule {
            name: "neck_neutral",
            message: NECK_MESSAGE,
            violated: neck_pulled,
        },
    ];

    fn measure(pose: &PoseLandmarks<'_>) -> PoseResult<SitUpMetrics> {
        let shoulder = pose.get(BodyLandmark::LeftShoulder)?;
        let hip = pose.get(BodyLandmark::LeftHip)?;
        let knee = pose.get(BodyLandmark::LeftKnee)?;
        let ankle = pose.get(BodyLandmark::LeftAnkle)?;

        let neck_angle = if pose.is_confident(BodyLandmark::Nose, NECK_CHECK_VISIBILITY) {
            Some(calculate_angle(&pose.get(BodyLandmark::Nose)?, &shoulder, &hip))
        } else {
            None
        };

        Ok(SitUpMetrics {
            torso_angle: calculate_angle(&shoulder, &hip, &knee),
            leg_angle: calculate_angle(&hip, &knee, &ankle),
            neck_angle,
        })
    }

    fn position(m: &SitUpMetrics) -> Option<Position> {
        if m.torso_angle < UP_TORSO_ANGLE {
            Some(Position::Up)
        } else {
            Some(Position::Down)
        }
    }

    fn angles(m: &SitUpMetrics) -> AngleReport {
        AngleReport::from([
            ("torso".to_string(), AngleValue::degrees(m.torso_angle)),
            ("legs".to_string(), AngleValue::degrees(m.leg_angle)),
        ])
    }
}
