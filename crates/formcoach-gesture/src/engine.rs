//! The gesture-recognition state machine.
//!
//! [`GestureEngine`] consumes `(landmarks, activated, current_page)` once
//! per frame and emits at most one discrete navigation command. Its state
//! is three fields: the anchor captured at the gesture's rising edge, the
//! cooldown counter started when a command fires, and the previous frame's
//! activation flag.
//!
//! Design points:
//!
//! - The rising-edge anchor decouples "where the gesture started" from the
//!   user's resting hand position.
//! - The purity ratio keeps diagonal drift from triggering both axes on
//!   the Home page.
//! - The reversal rule slides the anchor toward the extreme reached on the
//!   open panel's exit axis, so the return stroke of a pull-in is not
//!   misread as a push-back.

use serde::{Deserialize, Serialize};

use formcoach_core::{
    Axis, Command, GestureEvent, GestureObserver, HandLandmarks, PageId, Resettable,
};

/// Configuration for the gesture state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Displacement (fraction of the normalized coordinate span) a swipe
    /// must accumulate before a command fires
    pub swipe_threshold: f64,

    /// Frames during which no new command can be recognized after one fires
    pub cooldown_frames: u32,

    /// Factor by which one displacement axis must exceed the other to be
    /// accepted as a pure directional gesture on the Home page
    pub purity_ratio: f64,

    /// Counter-direction displacement beyond which the anchor is recentered
    /// on an open panel's exit axis
    pub reversal_distance: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 0.07,
            cooldown_frames: 15,
            purity_ratio: 1.1,
            reversal_distance: 0.02,
        }
    }
}

impl GestureConfig {
    /// Create a new builder
    #[must_use]
    pub fn builder() -> GestureConfigBuilder {
        GestureConfigBuilder::new()
    }
}

/// Builder for [`GestureConfig`].
#[derive(Debug, Default)]
pub struct GestureConfigBuilder {
    config: GestureConfig,
}

impl GestureConfigBuilder {
    /// Create new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GestureConfig::default(),
        }
    }

    /// Set swipe threshold
    #[must_use]
    pub fn swipe_threshold(mut self, threshold: f64) -> Self {
        self.config.swipe_threshold = threshold;
        self
    }

    /// Set cooldown length in frames
    #[must_use]
    pub fn cooldown_frames(mut self, frames: u32) -> Self {
        self.config.cooldown_frames = frames;
        self
    }

    /// Set directional purity ratio
    #[must_use]
    pub fn purity_ratio(mut self, ratio: f64) -> Self {
        self.config.purity_ratio = ratio;
        self
    }

    /// Set reversal recentering distance
    #[must_use]
    pub fn reversal_distance(mut self, distance: f64) -> Self {
        self.config.reversal_distance = distance;
        self
    }

    /// Build configuration
    #[must_use]
    pub fn build(self) -> GestureConfig {
        self.config
    }
}

/// Running statistics for a gesture engine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineStats {
    /// Frames processed since creation or last reset
    pub frames_processed: u64,
    /// Commands emitted
    pub commands_emitted: u64,
    /// Reversal anchor adjustments applied
    pub reversal_adjustments: u64,
    /// Frames skipped because the wrist landmark was unusable
    pub malformed_frames: u64,
}

/// The gesture state machine.
///
/// Single-owner, mutated exactly once per processed frame, never shared
/// across threads. Invariant: while `cooldown_remaining > 0` no anchor is
/// tracked and no command can be emitted; the anchor is `None` whenever
/// the previous frame was not activated and no cooldown is pending.
pub struct GestureEngine {
    config: GestureConfig,
    reference_point: Option<(f64, f64)>,
    cooldown_remaining: u32,
    was_activated: bool,
    observer: Option<Box<dyn GestureObserver>>,
    stats: EngineStats,
}

impl std::fmt::Debug for GestureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureEngine")
            .field("config", &self.config)
            .field("reference_point", &self.reference_point)
            .field("cooldown_remaining", &self.cooldown_remaining)
            .field("was_activated", &self.was_activated)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl GestureEngine {
    /// Create a new gesture engine
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            reference_point: None,
            cooldown_remaining: 0,
            was_activated: false,
            observer: None,
            stats: EngineStats::default(),
        }
    }

    /// Create with default configuration
    #[must_use]
    pub fn default_config() -> Self {
        Self::new(GestureConfig::default())
    }

    /// Attach an observer for state-transition events.
    #[must_use]
    pub fn with_observer(mut self, observer: impl GestureObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Get configuration
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Frames left before a new command can fire.
    #[must_use]
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    /// The current anchor, if a gesture is in progress.
    #[must_use]
    pub fn reference_point(&self) -> Option<(f64, f64)> {
        self.reference_point
    }

    /// Get running statistics
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    fn emit(&mut self, event: GestureEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
    }

    fn clear_anchor(&mut self) {
        if self.reference_point.take().is_some() {
            self.emit(GestureEvent::AnchorCleared);
        }
    }

    /// Advances the state machine by one frame.
    ///
    /// Invoked exactly once per processed frame, in capture order, from a
    /// single thread. Returns the navigation command recognized on this
    /// frame, if any. Malformed landmark input never panics; the frame is
    /// treated as "not activated" and contributes nothing.
    pub fn update(
        &mut self,
        landmarks: &HandLandmarks,
        is_activated: bool,
        current_page: PageId,
    ) -> Option<Command> {
        self.stats.frames_processed += 1;

        // Cooldown: no anchor tracking, no command, just count down.
        if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
            self.was_activated = is_activated;
            return None;
        }

        if !is_activated {
            // Hand opened: drop the anchor so the next fist starts fresh.
            self.clear_anchor();
            self.was_activated = false;
            return None;
        }

        let Some((curr_x, curr_y)) = landmarks.wrist() else {
            // Unusable wrist this frame: same recovery as an open hand.
            self.stats.malformed_frames += 1;
            self.clear_anchor();
            self.was_activated = false;
            return None;
        };

        // Rising edge (or an anchor lost to cooldown cleanup): the first
        // activated frame only establishes the anchor, never a command.
        if !self.was_activated || self.reference_point.is_none() {
            self.reference_point = Some((curr_x, curr_y));
            self.was_activated = true;
            self.emit(GestureEvent::AnchorSet {
                x: curr_x,
                y: curr_y,
            });
            return None;
        }

        let (mut ref_x, mut ref_y) = match self.reference_point {
            Some(point) => point,
            None => return None, // unreachable: anchor was just ensured
        };

        // Reversal recentering: slide the anchor toward the extreme reached
        // on the open panel's exit axis, so the return stroke of the pull-in
        // does not count toward the push-back.
        let reversal = self.config.reversal_distance;
        match current_page {
            PageId::Data if curr_y - ref_y > reversal => {
                ref_y = curr_y;
                self.stats.reversal_adjustments += 1;
                self.emit(GestureEvent::ReversalAdjusted {
                    page: current_page,
                    axis: Axis::Y,
                    value: curr_y,
                });
            }
            PageId::Settings if curr_y - ref_y < -reversal => {
                ref_y = curr_y;
                self.stats.reversal_adjustments += 1;
                self.emit(GestureEvent::ReversalAdjusted {
                    page: current_page,
                    axis: Axis::Y,
                    value: curr_y,
                });
            }
            PageId::Calendar if curr_x - ref_x > reversal => {
                ref_x = curr_x;
                self.stats.reversal_adjustments += 1;
                self.emit(GestureEvent::ReversalAdjusted {
                    page: current_page,
                    axis: Axis::X,
                    value: curr_x,
                });
            }
            _ => {}
        }
        self.reference_point = Some((ref_x, ref_y));

        let dx = curr_x - ref_x;
        let dy = curr_y - ref_y;

        let command = self.decide(dx, dy, current_page);

        if let Some(command) = command {
            self.cooldown_remaining = self.config.cooldown_frames;
            self.stats.commands_emitted += 1;
            self.emit(GestureEvent::CommandEmitted {
                command,
                cooldown_frames: self.config.cooldown_frames,
            });
            self.clear_anchor();
            return Some(command);
        }

        None
    }

    /// Applies the page-dependent command rules to an accumulated
    /// displacement.
    fn decide(&self, dx: f64, dy: f64, current_page: PageId) -> Option<Command> {
        let threshold = self.config.swipe_threshold;
        let purity = self.config.purity_ratio;
        let (abs_dx, abs_dy) = (dx.abs(), dy.abs());

        match current_page {
            // Entry gestures: pull a panel in. One axis must dominate the
            // other by the purity ratio. There is deliberately no leftward
            // pull; the gesture set is one-directional on x.
            PageId::Home => {
                if abs_dy > abs_dx * purity {
                    if dy > threshold {
                        Some(Command::NavigateData)
                    } else if dy < -threshold {
                        Some(Command::NavigateSettings)
                    } else {
                        None
                    }
                } else if abs_dx > abs_dy * purity && dx > threshold {
                    Some(Command::NavigateCalendar)
                } else {
                    None
                }
            }
            // Exit gestures: push the open panel back. A single-axis
            // threshold suffices, no purity requirement.
            PageId::Data if dy < -threshold => Some(Command::Close),
            PageId::Settings if dy > threshold => Some(Command::Close),
            PageId::Calendar if dx < -threshold => Some(Command::Close),
            _ => None,
        }
    }
}

impl Resettable for GestureEngine {
    fn reset(&mut self) {
        self.reference_point = None;
        self.cooldown_remaining = 0;
        self.was_activated = false;
        self.stats = EngineStats::default();
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::default_config()
    }
}
