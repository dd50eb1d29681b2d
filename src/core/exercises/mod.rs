// Exercise rule sets
//
// Every exercise follows the same pipeline: fetch landmarks, measure angles,
// classify the phase, run the form rules in declaration order, and assemble a
// Verdict. Each variant only supplies its landmarks, measurements, phase test
// and rule table.

pub mod pull_up;
pub mod push_up;
pub mod sit_up;
pub mod squat;
pub mod walk;

pub use pull_up::PullUp;
pub use push_up::PushUp;
pub use sit_up::SitUp;
pub use squat::Squat;
pub use walk::Walk;

use crate::core::landmarks::PoseLandmarks;
use crate::models::analysis::{AngleReport, ExerciseType, Position, Posture, Verdict};
use crate::models::pose::{BodyLandmark, Landmark, PoseResult};
use tracing::{debug, warn};

/// One form check: when `violated` holds, the posture is wrong and `message` is shown
pub struct FormRule<M: 'static> {
    pub name: &'static str,
    pub message: &'static str,
    pub violated: fn(&M, Option<Position>) -> bool,
}

/// Rule set for a single exercise
pub trait ExerciseRules {
    /// Measurements taken from one frame
    type Metrics: 'static;

    const EXERCISE: ExerciseType;

    /// Every landmark `measure` reads
    const REQUIRED_LANDMARKS: &'static [BodyLandmark];

    const GOOD_FORM_MESSAGE: &'static str;

    const CANNOT_ANALYZE_MESSAGE: &'static str;

    /// Phase in which a frame reports `repCount = 1`; `None` for exercises without phases
    const ACTIVE_POSITION: Option<Position>;

    /// Checked in order; when several fail, the last one's message wins
    const RULES: &'static [FormRule<Self::Metrics>];

    fn measure(pose: &PoseLandmarks<'_>) -> PoseResult<Self::Metrics>;

    fn position(metrics: &Self::Metrics) -> Option<Position>;

    fn angles(metrics: &Self::Metrics) -> AngleReport;
}

/// Analyze one frame with rule set `R`.
///
/// Landmark problems never escape: they become a degraded verdict carrying a diagnostic.
pub fn evaluate<R: ExerciseRules>(landmarks: &[Landmark]) -> Verdict {
    match assess::<R>(landmarks) {
        Ok(verdict) => verdict,
        Err(e) => {
            warn!(exercise = %R::EXERCISE, error = %e, "Could not analyze frame");
            Verdict::degraded(R::CANNOT_ANALYZE_MESSAGE, e.to_string())
        }
    }
}

fn assess<R: ExerciseRules>(landmarks: &[Landmark]) -> PoseResult<Verdict> {
    let pose = PoseLandmarks::new(landmarks);
    pose.require(R::REQUIRED_LANDMARKS)?;

    let metrics = R::measure(&pose)?;
    let position = R::position(&metrics);

    let mut posture = Posture::good(R::GOOD_FORM_MESSAGE);
    for rule in R::RULES {
        if (rule.violated)(&metrics, position) {
            debug!(exercise = %R::EXERCISE, rule = rule.name, "Form rule violated");
            posture.flag(rule.message);
        }
    }

    let rep_count = match (position, R::ACTIVE_POSITION) {
        (Some(current), Some(active)) if current == active => 1,
        _ => 0,
    };

    debug!(
        exercise = %R::EXERCISE,
        correct = posture.correct,
        position = position.map(|p| p.as_str()),
        rep_count,
        "Frame analyzed"
    );

    Ok(Verdict {
        posture,
        rep_count,
        position,
        angles: Some(R::angles(&metrics)),
        error: None,
    })
}

/// Run the rule set for `exercise` over one frame of landmarks
pub fn analyze_exercise(exercise: ExerciseType, landmarks: &[Landmark]) -> Verdict {
    match exercise {
        ExerciseType::PushUp => evaluate::<PushUp>(landmarks),
        ExerciseType::Squat => evaluate::<Squat>(landmarks),
        ExerciseType::SitUp => evaluate::<SitUp>(landmarks),
        ExerciseType::PullUp => evaluate::<PullUp>(landmarks),
        ExerciseType::Walk => evaluate::<Walk>(landmarks),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::pose::{BodyLandmark, Landmark, BODY_LANDMARK_COUNT};

    /// Full 33-point frame with the listed points placed and everything else at the origin
    pub(crate) fn frame(points: &[(BodyLandmark, f32, f32)]) -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::default(); BODY_LANDMARK_COUNT];
        for (landmark, x, y) in points {
            landmarks[landmark.index()] = Landmark::new(*x, *y);
        }
        landmarks
    }

    pub(crate) fn place(landmarks: &mut [Landmark], landmark: BodyLandmark, at: (f32, f32)) {
        landmarks[landmark.index()] = Landmark::new(at.0, at.1);
    }

    /// Rotate `arm` about `vertex` by `degrees`, so the angle arm-vertex-result equals `degrees`
    pub(crate) fn rotate_about(vertex: (f32, f32), arm: (f32, f32), degrees: f64) -> (f32, f32) {
        let (vx, vy) = (f64::from(vertex.0), f64::from(vertex.1));
        let (dx, dy) = (f64::from(arm.0) - vx, f64::from(arm.1) - vy);
        let (sin, cos) = degrees.to_radians().sin_cos();
        (
            (vx + dx * cos - dy * sin) as f32,
            (vy + dx * sin + dy * cos) as f32,
        )
    }
}
