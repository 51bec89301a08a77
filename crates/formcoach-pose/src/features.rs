//! Feature extraction from body landmarks.
//!
//! The classifier reads the keypoint window from the shoulders down to the
//! ankles (indices 11 through 30 of the 33-point body model) and flattens
//! the planar coordinates into a fixed-width feature vector. Face and
//! fingertip points are excluded; they carry no exercise-form signal and
//! make the model sensitive to head pose.

use ndarray::Array1;

use formcoach_core::{ClassifierError, PoseLandmarks};

/// Inclusive landmark index range the feature window reads.
pub const FEATURE_WINDOW: (usize, usize) = (11, 30);

/// Width of the extracted feature vector (x and y per windowed point).
pub const FEATURE_COUNT: usize = (FEATURE_WINDOW.1 - FEATURE_WINDOW.0 + 1) * 2;

/// Flattens the feature window into `[x11, y11, x12, y12, ..]`.
///
/// # Errors
///
/// Returns [`ClassifierError::MissingLandmarks`] if any windowed point is
/// absent or non-finite. The classifier cannot impute missing joints, so a
/// partial frame is skipped rather than scored.
pub fn pose_features(pose: &PoseLandmarks) -> Result<Array1<f32>, ClassifierError> {
    let mut features = Vec::with_capacity(FEATURE_COUNT);
    for index in FEATURE_WINDOW.0..=FEATURE_WINDOW.1 {
        let point = pose
            .get(index)
            .ok_or(ClassifierError::MissingLandmarks {
                required: FEATURE_WINDOW.1,
                available: pose.len(),
            })?;
        features.push(point.x as f32);
        features.push(point.y as f32);
    }
    Ok(Array1::from_vec(features))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcoach_core::{Confidence, Landmark, POSE_LANDMARK_COUNT};

    fn full_pose() -> PoseLandmarks {
        let points = (0..POSE_LANDMARK_COUNT)
            .map(|i| Landmark::new(0.01 * i as f64, 0.02 * i as f64, Confidence::MAX))
            .collect();
        PoseLandmarks::from_points(points)
    }

    #[test]
    fn test_feature_width() {
        assert_eq!(FEATURE_COUNT, 40);
        let features = pose_features(&full_pose()).unwrap();
        assert_eq!(features.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_layout_starts_at_window() {
        let features = pose_features(&full_pose()).unwrap();
        // First pair is landmark 11's (x, y).
        assert!((features[0] - 0.11).abs() < 1e-6);
        assert!((features[1] - 0.22).abs() < 1e-6);
    }

    #[test]
    fn test_short_pose_is_missing_landmarks() {
        let pose = PoseLandmarks::from_points(vec![
            Landmark::new(0.5, 0.5, Confidence::MAX);
            10
        ]);
        let err = pose_features(&pose).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::MissingLandmarks {
                required: 30,
                available: 10
            }
        ));
    }

    #[test]
    fn test_nan_joint_is_missing() {
        let mut points = vec![Landmark::new(0.5, 0.5, Confidence::MAX); POSE_LANDMARK_COUNT];
        points[15] = Landmark::new(f64::NAN, 0.5, Confidence::MAX);
        let pose = PoseLandmarks::from_points(points);
        assert!(pose_features(&pose).is_err());
    }
}
