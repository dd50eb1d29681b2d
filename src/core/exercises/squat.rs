// Squat form rules

use super::{ExerciseRules, FormRule};
use crate::core::geometry::calculate_angle;
use crate::core::landmarks::PoseLandmarks;
use crate::models::analysis::{AngleReport, AngleValue, ExerciseType, Position};
use crate::models::pose::{BodyLandmark, PoseResult};

/// Knee angle below which the squat is in the down phase
pub const DOWN_KNEE_ANGLE: f64 = 120.0;
/// How far (normalized x) the knee may travel past the ankle
pub const KNEE_OVER_TOE_TOLERANCE: f64 = 0.1;
/// Shoulder-hip-right hip angle below which the back is rounding
pub const MIN_BACK_ANGLE: f64 = 160.0;
/// Knee angle above which a down-phase squat is too shallow
pub const SHALLOW_KNEE_ANGLE: f64 = 140.0;

pub const KNEES_MESSAGE: &str = "Keep your knees behind your toes. Push through your heels.";
pub const BACK_MESSAGE: &str = "Keep your back straighter. Chest up, look forward.";
pub const DEPTH_MESSAGE: &str = "Try to squat deeper, but maintain proper form.";

pub struct Squat;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquatMetrics {
    pub knee_angle: f64,
    pub hip_angle: f64,
    pub back_angle: f64,
    pub knee_x: f64,
    pub ankle_x: f64,
}

fn knees_past_toes(m: &SquatMetrics, _: Option<Position>) -> bool {
    m.knee_x > m.ankle_x + KNEE_OVER_TOE_TOLERANCE
}

fn back_rounded(m: &SquatMetrics, _: Option<Position>) -> bool {
    m.back_angle < MIN_BACK_ANGLE
}

// Can only fire if the down threshold is ever raised above the shallow one
fn too_shallow(m: &SquatMetrics, position: Option<Position>) -> bool {
    m.knee_angle > SHALLOW_KNEE_ANGLE && position == Some(Position::Down)
}

impl ExerciseRules for Squat {
    type Metrics = SquatMetrics;

    const EXERCISE: ExerciseType = ExerciseType::Squat;

    const REQUIRED_LANDMARKS: &'static [BodyLandmark] = &[
        BodyLandmark::LeftShoulder,
        BodyLandmark::LeftHip,
        BodyLandmark::RightHip,
        BodyLandmark::LeftKnee,
        BodyLandmark::LeftAnkle,
    ];

    const GOOD_FORM_MESSAGE: &'static str = "Good squat form! Keep your weight in your heels.";

    const CANNOT_ANALYZE_MESSAGE: &'static str =
        "Could not analyze squat form. Make sure your full body is visible.";

    const ACTIVE_POSITION: Option<Position> = Some(Position::Down);

    const RULES: &'static [FormRule<SquatMetrics>] = &[
        FormRule {
            name: "knees_over_toes",
            message: KNEES_MESSAGE,
            violated: knees_past_toes,
        },
        FormRule {
            name: "back_angle",
            message: BACK_MESSAGE,
            violated: back_rounded,
        },
        FormRule {
            name: "depth",
            message: DEPTH_MESSAGE,
            violated: too_shallow,
        },
    ];

    fn measure(pose: &PoseLandmarks<'_>) -> PoseResult<SquatMetrics> {
        let shoulder = pose.get(BodyLandmark::LeftShoulder)?;
        let hip = pose.get(BodyLandmark::LeftHip)?;
        let right_hip = pose.get(BodyLandmark::RightHip)?;
        let knee = pose.get(BodyLandmark::LeftKnee)?;
        let ankle = pose.get(BodyLandmark::LeftAnkle)?;

        Ok(SquatMetrics {
            knee_angle: calculate_angle(&hip, &knee, &ankle),
            hip_angle: calculate_angle(&shoulder, &hip, &knee),
            back_angle: calculate_angle(&shoulder, &hip, &right_hip),
            knee_x: f64::from(knee.x),
            ankle_x: f64::from(ankle.x),
        })
    }

    fn position(m: &SquatMetrics) -> Option<Position> {
        if m.knee_angle < DOWN_KNEE_ANGLE {
            Some(Position::Down)
        } else {
            Some(Position::Up)
        }
    }

    fn angles(m: &SquatMetrics) -> AngleReport {
        AngleReport::from([
            ("knee".to_string(), AngleValue::degrees(m.knee_angle)),
            ("hip".to_string(), AngleValue::degrees(m.hip_angle)),
        ])
    }
}
