// Walking posture rules

use super::{ExerciseRules, FormRule};
use crate::core::geometry::{calculate_angle, vertical_offset};
use crate::core::landmarks::PoseLandmarks;
use crate::models::analysis::{AngleReport, AngleValue, ExerciseType, Position};
use crate::models::pose::{BodyLandmark, PoseResult};

/// Nose-shoulder-hip angle below which the walker leans forward
pub const MIN_UPPER_BODY_ANGLE: f64 = 150.0;
/// Largest normalized height difference between the hips
pub const MAX_HIP_OFFSET: f64 = 0.05;
/// Elbow angle below which an arm is held bent instead of swinging
pub const ARM_SWING_ANGLE: f64 = 130.0;

pub const LEANING_MESSAGE: &str = "Stand up straighter. Don't lean forward too much.";
pub const HIPS_MESSAGE: &str = "Try to keep your hips level as you walk.";
pub const ARMS_MESSAGE: &str = "Let your arms swing naturally as you walk.";

pub struct Walk;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkMetrics {
    pub upper_body_angle: f64,
    pub hip_offset: f64,
    pub left_arm_angle: f64,
    pub right_arm_angle: f64,
}

fn leaning_forward(m: &WalkMetrics, _: Option<Position>) -> bool {
    m.upper_body_angle < MIN_UPPER_BODY_ANGLE
}

fn hips_uneven(m: &WalkMetrics, _: Option<Position>) -> bool {
    m.hip_offset > MAX_HIP_OFFSET
}

fn arms_held(m: &WalkMetrics, _: Option<Position>) -> bool {
    m.left_arm_angle < ARM_SWING_ANGLE && m.right_arm_angle < ARM_SWING_ANGLE
}

impl ExerciseRules for Walk {
    type Metrics = WalkMetrics;

    const EXERCISE: ExerciseType = ExerciseType::Walk;

    // Knees and ankles are not measured but a usable walking frame must contain them
    const REQUIRED_LANDMARKS: &'static [BodyLandmark] = &[
        BodyLandmark::Nose,
        BodyLandmark::LeftShoulder,
        BodyLandmark::RightShoulder,
        BodyLandmark::LeftElbow,
        BodyLandmark::RightElbow,
        BodyLandmark::LeftWrist,
        BodyLandmark::RightWrist,
        BodyLandmark::LeftHip,
        BodyLandmark::RightHip,
        BodyLandmark::LeftKnee,
        BodyLandmark::RightKnee,
        BodyLandmark::LeftAnkle,
        BodyLandmark::RightAnkle,
    ];

    const GOOD_FORM_MESSAGE: &'static str =
        "Good walking posture! Keep your head up and shoulders back.";

    const CANNOT_ANALYZE_MESSAGE: &'static str =
        "Could not analyze walking form. Make sure your full body is visible.";

    // Steps span several frames, so a single frame never counts
    const ACTIVE_POSITION: Option<Position> = None;

    const RULES: &'static [FormRule<WalkMetrics>] = &[
        FormRule {
            name: "upright",
            message: LEANING_MESSAGE,
            violated: leaning_forward,
        },
        FormRule {
            name: "hips_level",
            message: HIPS_MESSAGE,
            violated: hips_uneven,
        },
        FormRule {
            name: "arm_swing",
            message: ARMS_MESSAGE,
            violated: arms_held,
        },
    ];

    fn measure(pose: &PoseLandmarks<'_>) -> PoseResult<WalkMetrics> {
        let nose = pose.get(BodyLandmark::Nose)?;
        let left_shoulder = pose.get(BodyLandmark::LeftShoulder)?;
        let right_shoulder = pose.get(BodyLandmark::RightShoulder)?;
        let left_hip = pose.get(BodyLandmark::LeftHip)?;
        let right_hip = pose.get(BodyLandmark::RightHip)?;

        Ok(WalkMetrics {
            upper_body_angle: calculate_angle(&nose, &left_shoulder, &left_hip),
            hip_offset: vertical_offset(&left_hip, &right_hip),
            left_arm_angle: calculate_angle(
                &left_shoulder,
                &pose.get(BodyLandmark::LeftElbow)?,
                &pose.get(BodyLandmark::LeftWrist)?,
            ),
            right_arm_angle: calculate_angle(
                &right_shoulder,
                &pose.get(BodyLandmark::RightElbow)?,
                &pose.get(BodyLandmark::RightWrist)?,
            ),
        })
    }

    fn position(_: &WalkMetrics) -> Option<Position> {
        None
    }

    fn angles(m: &WalkMetrics) -> AngleReport {
        AngleReport::from([
            ("upperBody".to_string(), AngleValue::degrees(m.upper_body_angle)),
            ("hipAlignment".to_string(), AngleValue::percent(m.hip_offset * 100.0)),
        ])
    }
}
