// Pull-up form rules

use super::{ExerciseRules, FormRule};
use crate::core::geometry::{calculate_angle, mean_y};
use crate::core::landmarks::PoseLandmarks;
use crate::models::analysis::{AngleReport, AngleValue, ExerciseType, Position};
use crate::models::pose::{BodyLandmark, PoseResult};

/// Arm angle below which the pull-up is in the up phase
pub const UP_ARM_ANGLE: f64 = 80.0;
/// Shoulder-hip-knee angle below which the body is swinging
pub const MIN_BODY_ANGLE: f64 = 160.0;

pub const KIPPING_MESSAGE: &str = "Avoid swinging or kipping. Keep your body straight.";
pub const SHOULDERS_MESSAGE: &str = "Pull your shoulders down away from your ears.";

pub struct PullUp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullUpMetrics {
    pub arm_angle: f64,
    pub body_angle: f64,
    /// Mean image-space y of both shoulders
    pub shoulder_y: f64,
    /// Mean image-space y of both ears
    pub ear_y: f64,
}

fn kipping(m: &PullUpMetrics, _: Option<Position>) -> bool {
    m.body_angle < MIN_BODY_ANGLE
}

fn shoulders_shrugged(m: &PullUpMetrics, position: Option<Position>) -> bool {
    position == Some(Position::Up) && m.shoulder_y > m.ear_y
}

impl ExerciseRules for PullUp {
    type Metrics = PullUpMetrics;

    const EXERCISE: ExerciseType = ExerciseType::PullUp;

    const REQUIRED_LANDMARKS: &'static [BodyLandmark] = &[
        BodyLandmark::LeftEar,
        BodyLandmark::RightEar,
        BodyLandmark::LeftShoulder,
        BodyLandmark::RightShoulder,
        BodyLandmark::LeftElbow,
        BodyLandmark::LeftWrist,
        BodyLandmark::LeftHip,
        BodyLandmark::LeftKnee,
    ];

    const GOOD_FORM_MESSAGE: &'static str = "Good pull-up form! Keep your body straight.";

    const CANNOT_ANALYZE_MESSAGE: &'static str =
        "Could not analyze pull-up form. Make sure your full body is visible.";

    const ACTIVE_POSITION: Option<Position> = Some(Position::Up);

    const RULES: &'static [FormRule<PullUpMetrics>] = &[
        FormRule {
            name: "kipping",
            message: KIPPING_MESSAGE,
            violated: kipping,
        },
        FormRule {
            name: "shoulder_engagement",
            message: SHOULDERS_MESSAGE,
            violated: shoulders_shrugged,
        },
    ];

    fn measure(pose: &PoseLandmarks<'_>) -> PoseResult<PullUpMetrics> {
        let shoulder = pose.get(BodyLandmark::LeftShoulder)?;
        let elbow = pose.get(BodyLandmark::LeftElbow)?;
        let wrist = pose.get(BodyLandmark::LeftWrist)?;
        let hip = pose.get(BodyLandmark::LeftHip)?;
        let knee = pose.get(BodyLandmark::LeftKnee)?;

        Ok(PullUpMetrics {
            arm_angle: calculate_angle(&shoulder, &elbow, &wrist),
            body_angle: calculate_angle(&shoulder, &hip, &knee),
            shoulder_y: mean_y(&shoulder, &pose.get(BodyLandmark::RightShoulder)?),
            ear_y: mean_y(
                &pose.get(BodyLandmark::LeftEar)?,
                &pose.get(BodyLandmark::RightEar)?,
            ),
        })
    }

    fn position(m: &PullUpMetrics) -> Option<Position> {
        if m.arm_angle < UP_ARM_ANGLE {
            Some(Position::Up)
        } else {
            Some(Position::Down)
        }
    }

    fn angles(m: &PullUpMetrics) -> AngleReport {
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
    use crate::core::exercises::fixtures::{frame, place};
    use crate::models::pose::Landmark;

    // Dead hang: arms straight overhead, body vertical, ears above the shoulders
    fn hanging() -> Vec<Landmark> {
        frame(&[
            (BodyLandmark::LeftEar, 0.48, 0.25),
            (BodyLandmark::RightEar, 0.58, 0.25),
            (BodyLandmark::LeftShoulder, 0.50, 0.30),
            (BodyLandmark::RightShoulder, 0.60, 0.30),
            (BodyLandmark::LeftElbow, 0.50, 0.20),
            (BodyLandmark::LeftWrist, 0.50, 0.10),
            (BodyLandmark::LeftHip, 0.50, 0.60),
            (BodyLandmark::LeftKnee, 0.50, 0.80),
        ])
    }

    // Chin over the bar: elbow bent to about 63 degrees
    fn pulled_up() -> Vec<Landmark> {
        let mut landmarks = hanging();
        place(&mut landmarks, BodyLandmark::LeftElbow, (0.60, 0.30));
        place(&mut landmarks, BodyLandmark::LeftWrist, (0.55, 0.20));
        landmarks
    }

    #[test]
    fn test_dead_hang() {
        let verdict = evaluate::<PullUp>(&hanging());
        assert!(verdict.posture.correct);
        assert_eq!(verdict.posture.message, PullUp::GOOD_FORM_MESSAGE);
        assert_eq!(verdict.position, Some(Position::Down));
        assert_eq!(verdict.rep_count, 0);
        assert_eq!(verdict.angle("body"), Some(AngleValue::Degrees(180)));
    }

    #[test]
    fn test_shoulder_rule_only_in_up_phase() {
        // Shoulders sit below the ear line in both frames; only the up frame is flagged
        assert!(evaluate::<PullUp>(&hanging()).posture.correct);

        let verdict = evaluate::<PullUp>(&pulled_up());
        assert_eq!(verdict.position, Some(Position::Up));
        assert_eq!(verdict.rep_count, 1);
        assert!(!verdict.posture.correct);
        assert_eq!(verdict.posture.message, SHOULDERS_MESSAGE);
        assert!(matches!(verdict.angle("arm"), Some(AngleValue::Degrees(63))));
    }

    #[test]
    fn test_engaged_shoulders_at_top() {
        let mut landmarks = pulled_up();
        place(&mut landmarks, BodyLandmark::LeftEar, (0.48, 0.35));
        place(&mut landmarks, BodyLandmark::RightEar, (0.58, 0.35));

        let verdict = evaluate::<PullUp>(&landmarks);
        assert!(verdict.posture.correct);
        assert_eq!(verdict.rep_count, 1);
    }

    #[test]
    fn test_kipping() {
        let mut landmarks = hanging();
        place(&mut landmarks, BodyLandmark::LeftKnee, (0.70, 0.75));

        let verdict = evaluate::<PullUp>(&landmarks);
        assert!(!verdict.posture.correct);
        assert_eq!(verdict.posture.message, KIPPING_MESSAGE);
    }
}
