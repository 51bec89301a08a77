//! Per-frame processing pipeline.
//!
//! [`FramePipeline`] wires the fist detector, the gesture engine, and the
//! command router together around a shared [`SystemState`] handle, and
//! tracks a smoothed frames-per-second estimate for the overlay.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::trace;

use formcoach_core::{Command, HandLandmarks, Resettable};

use crate::engine::{GestureConfig, GestureEngine};
use crate::fist::is_fist;
use crate::router::{CommandRouter, PageTransition};
use crate::state::SystemState;

/// Exponential smoothing factor for the FPS estimate. Close to 1 favors
/// history over the instantaneous frame interval.
const FPS_SMOOTHING: f64 = 0.9;

/// What one frame produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutcome {
    /// Whether the hand was closed this frame
    pub fist: bool,
    /// Command recognized by the engine, if any
    pub command: Option<Command>,
    /// Page transition applied by the router, if any
    pub transition: Option<PageTransition>,
}

/// Smoothed frame-rate estimator.
#[derive(Debug)]
struct FpsTracker {
    last_frame: Option<Instant>,
    fps: f64,
}

impl FpsTracker {
    fn new() -> Self {
        Self {
            last_frame: None,
            fps: 0.0,
        }
    }

    fn tick(&mut self, now: Instant) -> f64 {
        if let Some(last) = self.last_frame {
            let elapsed = now.duration_since(last).as_secs_f64();
            if elapsed > 0.0 {
                let instantaneous = 1.0 / elapsed;
                self.fps = if self.fps == 0.0 {
                    instantaneous
                } else {
                    self.fps * FPS_SMOOTHING + instantaneous * (1.0 - FPS_SMOOTHING)
                };
            }
        }
        self.last_frame = Some(now);
        self.fps
    }
}

/// The per-frame gesture pipeline.
///
/// Owns the engine and router; holds a clone of the shared state so the
/// front end and the pipeline observe the same page and mode. Frames must
/// be fed in capture order from a single thread.
#[derive(Debug)]
pub struct FramePipeline {
    engine: GestureEngine,
    router: CommandRouter,
    state: SystemState,
    fps: FpsTracker,
}

impl FramePipeline {
    /// Create a pipeline on the given shared state
    #[must_use]
    pub fn new(config: GestureConfig, state: SystemState) -> Self {
        Self {
            engine: GestureEngine::new(config),
            router: CommandRouter::new(),
            state,
            fps: FpsTracker::new(),
        }
    }

    /// Create with default gesture configuration and fresh state
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(GestureConfig::default(), SystemState::new())
    }

    /// Handle on the shared navigation state.
    #[must_use]
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// The gesture engine, for inspection.
    #[must_use]
    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    /// Smoothed frames-per-second estimate.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps.fps
    }

    /// Processes one frame of hand landmarks.
    ///
    /// Reads the page written by the previous frame's routing, runs the
    /// fist detector and the gesture engine, and routes any recognized
    /// command back onto the shared state.
    pub fn process_frame(&mut self, hand: &HandLandmarks) -> FrameOutcome {
        self.fps.tick(Instant::now());

        let fist = is_fist(hand);
        let page = self.state.current_page();
        let command = self.engine.update(hand, fist, page);
        let transition = command.and_then(|cmd| self.router.apply(cmd, &self.state));

        trace!(fist, ?command, ?transition, "frame processed");
        FrameOutcome {
            fist,
            command,
            transition,
        }
    }

    /// Processes a frame on which no hand was detected.
    ///
    /// Equivalent to an open hand: the engine drops any anchor in
    /// progress.
    pub fn process_empty_frame(&mut self) -> FrameOutcome {
        self.fps.tick(Instant::now());

        let page = self.state.current_page();
        let command = self.engine.update(&HandLandmarks::default(), false, page);
        debug_assert!(command.is_none());

        FrameOutcome {
            fist: false,
            command: None,
            transition: None,
        }
    }
}

impl Resettable for FramePipeline {
    fn reset(&mut self) {
        self.engine.reset();
        self.fps = FpsTracker::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcoach_core::{
        Confidence, Landmark, Mode, PageId, FINGERTIP_INDICES, HAND_LANDMARK_COUNT, PIP_INDICES,
    };

    /// A closed fist whose wrist sits at the given position.
    fn fist_at(x: f64, y: f64) -> HandLandmarks {
        let mut points = vec![Landmark::new(x, y, Confidence::MAX); HAND_LANDMARK_COUNT];
        for (tip, pip) in FINGERTIP_INDICES.iter().zip(PIP_INDICES.iter()) {
            points[*tip] = Landmark::new(x, y + 0.05, Confidence::MAX);
            points[*pip] = Landmark::new(x, y, Confidence::MAX);
        }
        HandLandmarks::from_points(points)
    }

    /// An open hand (fingers extended upward) at the given position.
    fn open_hand_at(x: f64, y: f64) -> HandLandmarks {
        let mut points = vec![Landmark::new(x, y, Confidence::MAX); HAND_LANDMARK_COUNT];
        for (tip, pip) in FINGERTIP_INDICES.iter().zip(PIP_INDICES.iter()) {
            points[*tip] = Landmark::new(x, y - 0.05, Confidence::MAX);
            points[*pip] = Landmark::new(x, y, Confidence::MAX);
        }
        HandLandmarks::from_points(points)
    }

    #[test]
    fn test_fist_swipe_navigates() {
        let mut pipeline = FramePipeline::with_defaults();

        assert!(pipeline.process_frame(&fist_at(0.5, 0.4)).fist);
        let outcome = pipeline.process_frame(&fist_at(0.5, 0.5));

        assert_eq!(outcome.command, Some(Command::NavigateData));
        assert_eq!(outcome.transition.map(|t| t.to), Some(PageId::Data));
        assert_eq!(pipeline.state().current_page(), PageId::Data);
    }

    #[test]
    fn test_open_hand_does_not_anchor() {
        let mut pipeline = FramePipeline::with_defaults();

        pipeline.process_frame(&open_hand_at(0.5, 0.4));
        let outcome = pipeline.process_frame(&open_hand_at(0.5, 0.6));

        assert!(!outcome.fist);
        assert_eq!(outcome.command, None);
        assert_eq!(pipeline.engine().reference_point(), None);
    }

    #[test]
    fn test_exercise_mode_keeps_page() {
        let mut pipeline = FramePipeline::with_defaults();
        pipeline.state().set_mode(Mode::Exercise);

        pipeline.process_frame(&fist_at(0.5, 0.4));
        let outcome = pipeline.process_frame(&fist_at(0.5, 0.5));

        // The engine still recognizes the gesture and starts its cooldown,
        // the router just refuses to move the page.
        assert_eq!(outcome.command, Some(Command::NavigateData));
        assert_eq!(outcome.transition, None);
        assert_eq!(pipeline.state().current_page(), PageId::Home);
        assert!(pipeline.engine().cooldown_remaining() > 0);
    }

    #[test]
    fn test_empty_frame_clears_anchor() {
        let mut pipeline = FramePipeline::with_defaults();
        pipeline.process_frame(&fist_at(0.5, 0.4));
        assert!(pipeline.engine().reference_point().is_some());

        pipeline.process_empty_frame();
        assert_eq!(pipeline.engine().reference_point(), None);
    }

    #[test]
    fn test_reset() {
        let mut pipeline = FramePipeline::with_defaults();
        pipeline.process_frame(&fist_at(0.5, 0.4));
        pipeline.process_frame(&fist_at(0.5, 0.5));
        pipeline.reset();

        assert_eq!(pipeline.engine().cooldown_remaining(), 0);
        assert_eq!(pipeline.engine().stats().frames_processed, 0);
        // Page survives a pipeline reset; navigation state is external.
        assert_eq!(pipeline.state().current_page(), PageId::Data);
    }
}
