// Named access into the detector's ordered landmark sequence

use crate::models::pose::{BodyLandmark, Landmark, PoseError, PoseResult};

/// Read-only view over one frame's landmarks, addressed by anatomical identity
#[derive(Debug, Clone, Copy)]
pub struct PoseLandmarks<'a> {
    landmarks: &'a [Landmark],
}

impl<'a> PoseLandmarks<'a> {
    pub fn new(landmarks: &'a [Landmark]) -> Self {
        Self { landmarks }
    }

    /// Fetch a landmark, failing if the sequence is too short or the point is not finite
    pub fn get(&self, landmark: BodyLandmark) -> PoseResult<Landmark> {
        let point = self
            .landmarks
            .get(landmark.index())
            .copied()
            .ok_or(PoseError::InsufficientLandmarks {
                landmark,
                required: landmark.index() + 1,
                available: self.landmarks.len(),
            })?;

        if !point.is_finite() {
            return Err(PoseError::NonFiniteCoordinate(landmark));
        }

        Ok(point)
    }

    /// True when the landmark is present and reported with visibility above `threshold`.
    /// Coordinates are not inspected.
    pub fn is_confident(&self, landmark: BodyLandmark, threshold: f64) -> bool {
        self.landmarks
            .get(landmark.index())
            .map_or(false, |point| point.is_confident(threshold))
    }

    /// Check that every listed landmark is present and usable
    pub fn require(&self, required: &[BodyLandmark]) -> PoseResult<()> {
        let deepest = required.iter().copied().max_by_key(|landmark| landmark.index());

        if let Some(landmark) = deepest {
            if self.landmarks.len() <= landmark.index() {
                return Err(PoseError::InsufficientLandmarks {
                    landmark,
                    required: landmark.index() + 1,
                    available: self.landmarks.len(),
                });
            }
        }

        for landmark in required {
            self.get(*landmark)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pose::BODY_LANDMARK_COUNT;

    #[test]
    fn test_get_by_identity() {
        let mut landmarks = vec![Landmark::default(); BODY_LANDMARK_COUNT];
        landmarks[BodyLandmark::LeftKnee.index()] = Landmark::new(0.4, 0.8);

        let pose = PoseLandmarks::new(&landmarks);
        assert_eq!(pose.get(BodyLandmark::LeftKnee).unwrap(), Landmark::new(0.4, 0.8));
    }

    #[test]
    fn test_short_sequence_is_insufficient() {
        let landmarks = vec![Landmark::default(); 20];
        let pose = PoseLandmarks::new(&landmarks);

        assert!(pose.get(BodyLandmark::RightIndex).is_err());
        assert_eq!(
            pose.require(&[BodyLandmark::Nose, BodyLandmark::LeftHip, BodyLandmark::LeftShoulder]),
            Err(PoseError::InsufficientLandmarks {
                landmark: BodyLandmark::LeftHip,
                required: 24,
                available: 20,
            })
        );
        assert!(pose.require(&[BodyLandmark::Nose, BodyLandmark::LeftIndex]).is_ok());
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let mut landmarks = vec![Landmark::default(); BODY_LANDMARK_COUNT];
        landmarks[BodyLandmark::Nose.index()] = Landmark::new(f32::NAN, 0.1);

        let pose = PoseLandmarks::new(&landmarks);
        assert_eq!(
            pose.get(BodyLandmark::Nose),
            Err(PoseError::NonFiniteCoordinate(BodyLandmark::Nose))
        );
        assert!(pose.require(&[BodyLandmark::LeftShoulder]).is_ok());
    }

    #[test]
    fn test_confidence_ignores_coordinates() {
        let mut landmarks = vec![Landmark::default(); BODY_LANDMARK_COUNT];
        landmarks[BodyLandmark::Nose.index()] = Landmark::new(f32::NAN, 0.1).with_visibility(0.9);
        landmarks[BodyLandmark::LeftEar.index()] = Landmark::new(0.4, 0.2).with_visibility(0.3);

        let pose = PoseLandmarks::new(&landmarks);
        assert!(pose.is_confident(BodyLandmark::Nose, 0.8));
        assert!(!pose.is_confident(BodyLandmark::LeftEar, 0.8));
        assert!(!pose.is_confident(BodyLandmark::RightEar, 0.8));

        let short = PoseLandmarks::new(&landmarks[..5]);
        assert!(!short.is_confident(BodyLandmark::LeftEar, 0.0));
    }
}
