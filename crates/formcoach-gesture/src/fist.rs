//! Fist detection.
//!
//! The closed fist is the gesture system's "pen down" signal: swipes are
//! only measured while the hand is closed. Detection is a pure function of
//! a single frame's landmarks, no state.

use formcoach_core::{HandLandmarks, FINGERTIP_INDICES, PIP_INDICES};

/// Minimum number of curled fingers for a fist.
///
/// Three of four tolerates one undetected or noisy finger per frame.
const FIST_FINGER_THRESHOLD: usize = 3;

/// Counts fingers whose fingertip sits below its second-knuckle joint.
///
/// Y increases downward in normalized device coordinates, so a curled
/// finger has `tip.y > pip.y`. A finger whose tip or PIP landmark is
/// missing or non-finite does not count.
#[must_use]
pub fn curled_finger_count(landmarks: &HandLandmarks) -> usize {
    FINGERTIP_INDICES
        .iter()
        .zip(PIP_INDICES.iter())
        .filter(|(tip_idx, pip_idx)| {
            match (landmarks.get(**tip_idx), landmarks.get(**pip_idx)) {
                (Some(tip), Some(pip)) => tip.y > pip.y,
                _ => false,
            }
        })
        .count()
}

/// Returns `true` if the hand is closed into a fist.
///
/// True iff at least three of the four fingers (index, middle, ring,
/// pinky) are curled. Deterministic, side-effect free; malformed input
/// yields `false` rather than panicking.
#[must_use]
pub fn is_fist(landmarks: &HandLandmarks) -> bool {
    curled_finger_count(landmarks) >= FIST_FINGER_THRESHOLD
}
