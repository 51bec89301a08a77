//! Core data types for the formcoach system.
//!
//! This module defines the data structures shared across the workspace for
//! representing detector output, navigation state, and gesture events.
//!
//! # Type Categories
//!
//! - **Landmark Types**: [`Landmark`], [`HandLandmarks`], [`PoseLandmarks`]
//! - **Navigation Types**: [`PageId`], [`Command`], [`Mode`]
//! - **Event Types**: [`GestureEvent`], [`Axis`]
//! - **Common Types**: [`Confidence`]

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, GestureError};
use crate::{HAND_LANDMARK_COUNT, WRIST_INDEX};

// =============================================================================
// Common Types
// =============================================================================

/// Confidence score in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::validation(format!(
                "Confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Creates a confidence value, clamping out-of-range input.
    ///
    /// Detector backends occasionally report values a hair outside [0, 1];
    /// the boundary absorbs that instead of failing the whole frame.
    #[must_use]
    pub fn saturating(value: f32) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence exceeds the given threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// Landmark Types
// =============================================================================

/// A single tracked keypoint with normalized position and confidence.
///
/// Positions are in normalized device coordinates: x and y conceptually in
/// [0, 1], origin top-left, y increasing downward. The gesture core only
/// reads landmarks; it never mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (normalized)
    pub x: f64,
    /// Y coordinate (normalized)
    pub y: f64,
    /// Depth coordinate, if the detector provides one
    pub z: Option<f64>,
    /// Detection visibility/confidence
    pub visibility: Confidence,
}

impl Landmark {
    /// Creates a new 2D landmark.
    #[must_use]
    pub fn new(x: f64, y: f64, visibility: Confidence) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility,
        }
    }

    /// Creates a new 3D landmark.
    #[must_use]
    pub fn new_3d(x: f64, y: f64, z: f64, visibility: Confidence) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            visibility,
        }
    }

    /// Returns `true` if both planar coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the 2D position as a tuple.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// An indexed set of hand landmarks produced fresh every frame.
///
/// Accessors treat missing indices and non-finite coordinates as absent
/// rather than failing, so a noisy frame degrades to "no landmark" instead
/// of panicking inside the per-frame path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandLandmarks {
    points: Vec<Landmark>,
}

impl HandLandmarks {
    /// Creates a landmark set from detector output.
    #[must_use]
    pub fn from_points(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Returns the number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the set carries the full hand model.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.len() >= HAND_LANDMARK_COUNT
    }

    /// Returns the landmark at `index`, or `None` if it is missing or
    /// carries non-finite coordinates.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index).filter(|lm| lm.is_finite())
    }

    /// Returns the wrist position, the anchor reference for all gestures.
    #[must_use]
    pub fn wrist(&self) -> Option<(f64, f64)> {
        self.get(WRIST_INDEX).map(Landmark::position)
    }

    /// Validates that the set is usable as gesture input.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::MalformedLandmarks`] if the set is shorter
    /// than the hand model requires.
    pub fn validate(&self) -> Result<(), GestureError> {
        if !self.is_complete() {
            return Err(GestureError::MalformedLandmarks {
                required: HAND_LANDMARK_COUNT,
                available: self.points.len(),
            });
        }
        Ok(())
    }
}

/// An indexed set of body landmarks, consumed by the pose classifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseLandmarks {
    points: Vec<Landmark>,
}

impl PoseLandmarks {
    /// Creates a landmark set from detector output.
    #[must_use]
    pub fn from_points(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Returns the number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the landmark at `index`, or `None` if missing or non-finite.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index).filter(|lm| lm.is_finite())
    }
}

// =============================================================================
// Navigation Types
// =============================================================================

/// The currently-open panel page.
///
/// Which reversal and purity rules the gesture engine applies depends on
/// this value; it is written by the router and read by the engine on the
/// next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageId {
    /// Main page; entry gestures pull panels in
    #[default]
    Home,
    /// Data center panel (pulled down from the top)
    Data,
    /// Settings panel (pulled up from the bottom)
    Settings,
    /// Training calendar panel (pulled in from the left)
    Calendar,
}

impl PageId {
    /// Returns the page name used at string boundaries.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "HomePage",
            Self::Data => "DataPage",
            Self::Settings => "SettingsPage",
            Self::Calendar => "CalendarPage",
        }
    }

    /// All pages, Home first.
    #[must_use]
    pub fn all() -> &'static [Self; 4] {
        &[Self::Home, Self::Data, Self::Settings, Self::Calendar]
    }
}

impl FromStr for PageId {
    type Err = GestureError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "HomePage" => Ok(Self::Home),
            "DataPage" => Ok(Self::Data),
            "SettingsPage" => Ok(Self::Settings),
            "CalendarPage" => Ok(Self::Calendar),
            other => Err(GestureError::InconsistentPageState {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discrete navigation command emitted by the gesture engine.
///
/// Ephemeral: emitted at most once per frame and consumed by the router,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Pull in the data center panel
    NavigateData,
    /// Pull in the settings panel
    NavigateSettings,
    /// Pull in the training calendar panel
    NavigateCalendar,
    /// Push the open panel back and return to Home
    Close,
}

impl Command {
    /// Returns the page the router lands on after applying this command.
    #[must_use]
    pub fn target_page(&self) -> PageId {
        match self {
            Self::NavigateData => PageId::Data,
            Self::NavigateSettings => PageId::Settings,
            Self::NavigateCalendar => PageId::Calendar,
            Self::Close => PageId::Home,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NavigateData => "NavigateData",
            Self::NavigateSettings => "NavigateSettings",
            Self::NavigateCalendar => "NavigateCalendar",
            Self::Close => "Close",
        };
        f.write_str(name)
    }
}

/// Operating mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Gesture navigation is live
    #[default]
    Control,
    /// Exercise tracking; navigation commands are dropped
    Exercise,
}

impl Mode {
    /// Returns the other mode.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            Self::Control => Self::Exercise,
            Self::Exercise => Self::Control,
        }
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Displacement axis, used when reporting reversal adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal displacement
    X,
    /// Vertical displacement
    Y,
}

/// A state transition inside the gesture engine.
///
/// Emitted through an injected [`GestureObserver`](crate::GestureObserver)
/// so tests and diagnostics can follow the engine without coupling it to a
/// logging framework.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// A reference anchor was recorded at a gesture's rising edge
    AnchorSet {
        /// Anchor x position
        x: f64,
        /// Anchor y position
        y: f64,
    },
    /// The anchor was slid toward the extreme reached on one axis
    ReversalAdjusted {
        /// Page whose reversal rule fired
        page: PageId,
        /// Axis that was recentered
        axis: Axis,
        /// New anchor value on that axis
        value: f64,
    },
    /// A navigation command was emitted and cooldown began
    CommandEmitted {
        /// The emitted command
        command: Command,
        /// Cooldown frames started
        cooldown_frames: u32,
    },
    /// The reference anchor was cleared (hand opened or command fired)
    AnchorCleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_validation() {
        assert!(Confidence::new(0.5).is_ok());
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(1.1).is_err());
    }

    #[test]
    fn test_confidence_saturating() {
        assert_eq!(Confidence::saturating(1.2), Confidence::MAX);
        assert_eq!(Confidence::saturating(-0.3), Confidence::MIN);
        assert_eq!(Confidence::saturating(f32::NAN), Confidence::MIN);
    }

    #[test]
    fn test_hand_landmarks_nan_is_absent() {
        let mut points = vec![Landmark::new(0.5, 0.5, Confidence::MAX); 21];
        points[0] = Landmark::new(f64::NAN, 0.5, Confidence::MAX);
        let hand = HandLandmarks::from_points(points);

        assert!(hand.is_complete());
        assert!(hand.get(0).is_none());
        assert!(hand.wrist().is_none());
        assert!(hand.get(1).is_some());
    }

    #[test]
    fn test_hand_landmarks_validate_short() {
        let hand = HandLandmarks::from_points(vec![Landmark::new(0.1, 0.1, Confidence::MAX); 5]);
        let err = hand.validate().unwrap_err();
        assert!(matches!(
            err,
            GestureError::MalformedLandmarks {
                required: 21,
                available: 5
            }
        ));
    }

    #[test]
    fn test_page_round_trip() {
        for page in PageId::all() {
            assert_eq!(page.as_str().parse::<PageId>().unwrap(), *page);
        }
        assert!("LobbyPage".parse::<PageId>().is_err());
    }

    #[test]
    fn test_command_target_pages() {
        assert_eq!(Command::NavigateData.target_page(), PageId::Data);
        assert_eq!(Command::NavigateSettings.target_page(), PageId::Settings);
        assert_eq!(Command::NavigateCalendar.target_page(), PageId::Calendar);
        assert_eq!(Command::Close.target_page(), PageId::Home);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Control.toggled(), Mode::Exercise);
        assert_eq!(Mode::Exercise.toggled(), Mode::Control);
    }
}
