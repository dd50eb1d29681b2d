// Push-up form rules

use super::{ExerciseRules, FormRule};
use crate::core::geometry::{calculate_angle, horizontal_span};
use crate::core::landmarks::PoseLandmarks;
use crate::models::analysis::{AngleReport, AngleValue, ExerciseType, Position};
use crate::models::pose::{BodyLandmark, PoseResult};

/// Arm angle below which the body is in the down phase
pub const DOWN_ARM_ANGLE: f64 = 90.0;
/// Shoulder-hip-knee angle below which the back is sagging or piking
pub const MIN_BODY_ANGLE: f64 = 160.0;
/// Hand span allowed relative to shoulder span
pub const MAX_HAND_SPAN_RATIO: f64 = 2.0;
pub const MIN_HAND_SPAN_RATIO: f64 = 0.7;

pub const BACK_MESSAGE: &str = "Keep your back straight. Don't let your hips sag or pike up.";
pub const HANDS_WIDE_MESSAGE: &str = "Your hands are too wide. Bring them closer to shoulder width.";
pub const HANDS_NARROW_MESSAGE: &str = "Your hands are too narrow. Place them shoulder-width apart.";

pub struct PushUp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushUpMetrics {
    pub arm_angle: f64,
    pub body_angle: f64,
    pub shoulder_span: f64,
    pub hand_span: f64,
}

fn back_not_straight(m: &PushUpMetrics, _: Option<Position>) -> bool {
    m.body_angle < MIN_BODY_ANGLE
}

fn hands_too_wide(m: &PushUpMetrics, _: Option<Position>) -> bool {
    m.hand_span > m.shoulder_span * MAX_HAND_SPAN_RATIO
}

fn hands_too_narrow(m: &PushUpMetrics, _: Option<Position>) -> bool {
    m.hand_span < m.shoulder_span * MIN_HAND_SPAN_RATIO
}

impl ExerciseRules for PushUp {
    type Metrics = PushUpMetrics;

    const EXERCISE: ExerciseType = ExerciseType::PushUp;

    const REQUIRED_LANDMARKS: &'static [BodyLandmark] = &[
        BodyLandmark::LeftShoulder,
        BodyLandmark::RightShoulder,
        BodyLandmark::LeftElbow,
        BodyLandmark::LeftWrist,
        BodyLandmark::LeftIndex,
        BodyLandmark::RightIndex,
        BodyLandmark::LeftHip,
        BodyLandmark::LeftKnee,
    ];

    const GOOD_FORM_MESSAGE: &'static str = "Good form! Keep your body straight and core engaged.";

    const CANNOT_ANALYZE_MESSAGE: &'static str =
        "Could not analyze push-up form. Make sure your full body is visible.";

    const ACTIVE_POSITION: Option<Position> = Some(Position::Down);

    const RULES: &'static [FormRule<PushUpMetrics>] = &[
        FormRule {
            name: "back_alignment",
            message: BACK_MESSAGE,
            violated: back_not_straight,
        },
        FormRule {
            name: "hands_too_wide",
            message: HANDS_WIDE_MESSAGE,
            violated: hands_too_wide,
        },
        FormRule {
            name: "hands_too_narrow",
            message: HANDS_NARROW_MESSAGE,
            violated: hands_too_narrow,
        },
    ];

    fn measure(pose: &PoseLandmarks<'_>) -> PoseResult<PushUpMetrics> {
        let shoulder = pose.get(BodyLandmark::LeftShoulder)?;
        let elbow = pose.get(BodyLandmark::LeftElbow)?;
        let wrist = pose.get(BodyLandmark::LeftWrist)?;
        let hip = pose.get(BodyLandmark::LeftHip)?;
        let knee = pose.get(BodyLandmark::LeftKnee)?;

        Ok(PushUpMetrics {
            arm_angle: calculate_angle(&shoulder, &elbow, &wrist),
            body_angle: calculate_angle(&shoulder, &hip, &knee),
            shoulder_span: horizontal_span(&shoulder, &pose.get(BodyLandmark::RightShoulder)?),
            hand_span: horizontal_span(
                &pose.get(BodyLandmark::LeftIndex)?,
                &pose.get(BodyLandmark::RightIndex)?,
            ),
        })
    }

    fn position(m: &PushUpMetrics) -> Option<Position> {
        if m.arm_angle < DOWN_ARM_ANGLE {
            Some(Position::Down)
        } else {
            Some(Position::Up)
        }
    }

    fn angles(m: &PushUpMetrics) -> AngleReport {
        AngleReport::from([
            ("arm".to_string(), AngleValue::degrees(m.arm_angle)),
            ("body".to_string(), AngleValue::degrees(m.body_angle)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exercises::evaluate;
    use crate::core::exercises::fixtures::{frame, place, rotate_about};
    use crate::models::pose::Landmark;

    // Side-on plank: straight arm, straight body, hands just over shoulder width
    fn plank() -> Vec<Landmark> {
        frame(&[
            (BodyLandmark::LeftShoulder, 0.30, 0.40),
            (BodyLandmark::RightShoulder, 0.35, 0.40),
            (BodyLandmark::LeftElbow, 0.30, 0.50),
            (BodyLandmark::LeftWrist, 0.30, 0.60),
            (BodyLandmark::LeftIndex, 0.30, 0.62),
            (BodyLandmark::RightIndex, 0.36, 0.62),
            (BodyLandmark::LeftHip, 0.50, 0.40),
            (BodyLandmark::LeftKnee, 0.70, 0.40),
        ])
    }

    fn with_arm_angle(degrees: f64) -> Vec<Landmark> {
        let mut landmarks = plank();
        let wrist = rotate_about((0.30, 0.50), (0.30, 0.40), degrees);
        place(&mut landmarks, BodyLandmark::LeftWrist, wrist);
        landmarks
    }

    #[test]
    fn test_good_plank() {
        let verdict = evaluate::<PushUp>(&plank());
        assert!(verdict.posture.correct);
        assert_eq!(verdict.posture.message, PushUp::GOOD_FORM_MESSAGE);
        assert_eq!(verdict.position, Some(Position::Up));
        assert_eq!(verdict.rep_count, 0);
        assert_eq!(verdict.angle("arm"), Some(AngleValue::Degrees(180)));
        assert_eq!(verdict.angle("body"), Some(AngleValue::Degrees(180)));
    }

    #[test]
    fn test_phase_threshold() {
        let down = evaluate::<PushUp>(&with_arm_angle(89.0));
        assert_eq!(down.position, Some(Position::Down));
        assert_eq!(down.rep_count, 1);

        let up = evaluate::<PushUp>(&with_arm_angle(91.0));
        assert_eq!(up.position, Some(Position::Up));
        assert_eq!(up.rep_count, 0);
    }

    #[test]
    fn test_sagging_back() {
        let mut landmarks = plank();
        place(&mut landmarks, BodyLandmark::LeftKnee, (0.70, 0.55));

        let verdict = evaluate::<PushUp>(&landmarks);
        assert!(!verdict.posture.correct);
        assert_eq!(verdict.posture.message, BACK_MESSAGE);
    }

    #[test]
    fn test_hand_width() {
        let mut wide = plank();
        place(&mut wide, BodyLandmark::RightIndex, (0.45, 0.62));
        assert_eq!(evaluate::<PushUp>(&wide).posture.message, HANDS_WIDE_MESSAGE);

        let mut narrow = plank();
        place(&mut narrow, BodyLandmark::RightIndex, (0.32, 0.62));
        assert_eq!(evaluate::<PushUp>(&narrow).posture.message, HANDS_NARROW_MESSAGE);
    }

    #[test]
    fn test_hand_rule_overrides_back_rule() {
        let mut landmarks = plank();
        place(&mut landmarks, BodyLandmark::LeftKnee, (0.70, 0.55));
        place(&mut landmarks, BodyLandmark::RightIndex, (0.45, 0.62));

        let verdict = evaluate::<PushUp>(&landmarks);
        assert!(!verdict.posture.correct);
        assert_eq!(verdict.posture.message, HANDS_WIDE_MESSAGE);
    }
}
