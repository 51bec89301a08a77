//! End-to-end gesture flow tests.
//!
//! Drives the full pipeline (fist detection, gesture engine, command
//! router, shared state) through multi-frame sessions the way the capture
//! loop would.

use formcoach_core::{
    Command, Confidence, HandLandmarks, Landmark, Mode, PageId, FINGERTIP_INDICES,
    HAND_LANDMARK_COUNT, PIP_INDICES,
};
use formcoach_gesture::{FramePipeline, GestureConfig, SystemState};

/// A closed fist whose wrist sits at the given position.
fn fist_at(x: f64, y: f64) -> HandLandmarks {
    let mut points = vec![Landmark::new(x, y, Confidence::MAX); HAND_LANDMARK_COUNT];
    for (tip, pip) in FINGERTIP_INDICES.iter().zip(PIP_INDICES.iter()) {
        points[*tip] = Landmark::new(x, y + 0.05, Confidence::MAX);
        points[*pip] = Landmark::new(x, y, Confidence::MAX);
    }
    HandLandmarks::from_points(points)
}

/// An open hand at the given position.
fn open_hand_at(x: f64, y: f64) -> HandLandmarks {
    let mut points = vec![Landmark::new(x, y, Confidence::MAX); HAND_LANDMARK_COUNT];
    for (tip, pip) in FINGERTIP_INDICES.iter().zip(PIP_INDICES.iter()) {
        points[*tip] = Landmark::new(x, y - 0.05, Confidence::MAX);
        points[*pip] = Landmark::new(x, y, Confidence::MAX);
    }
    HandLandmarks::from_points(points)
}

/// Runs frames through the pipeline, collecting emitted commands.
fn run(pipeline: &mut FramePipeline, frames: &[HandLandmarks]) -> Vec<Command> {
    frames
        .iter()
        .filter_map(|frame| pipeline.process_frame(frame).command)
        .collect()
}

#[test]
fn pull_in_then_push_back_round_trip() {
    let mut pipeline = FramePipeline::with_defaults();

    // Close the fist on Home and pull down: the Data panel opens.
    let mut frames = vec![fist_at(0.5, 0.40), fist_at(0.5, 0.45), fist_at(0.5, 0.50)];
    // Hold still through the cooldown.
    frames.extend(std::iter::repeat(fist_at(0.5, 0.50)).take(15));
    // Open the hand, re-fist, and push up past the threshold.
    frames.push(open_hand_at(0.5, 0.50));
    frames.extend([fist_at(0.5, 0.50), fist_at(0.5, 0.46), fist_at(0.5, 0.42)]);

    let commands = run(&mut pipeline, &frames);
    assert_eq!(commands, vec![Command::NavigateData, Command::Close]);
    assert_eq!(pipeline.state().current_page(), PageId::Home);
}

#[test]
fn return_stroke_after_pull_in_does_not_close() {
    let mut pipeline = FramePipeline::with_defaults();

    // Pull the Data panel down without releasing the fist.
    let mut frames = vec![fist_at(0.5, 0.40), fist_at(0.5, 0.50)];
    frames.extend(std::iter::repeat(fist_at(0.5, 0.50)).take(15));
    // Drift the still-closed fist back toward rest in small steps. The
    // reversal rule recenters the anchor each step, so the return stroke
    // never accumulates into a Close.
    for step in 0..6 {
        frames.push(fist_at(0.5, 0.50 + 0.025 * f64::from(step)));
    }

    let commands = run(&mut pipeline, &frames);
    assert_eq!(commands, vec![Command::NavigateData]);
    assert_eq!(pipeline.state().current_page(), PageId::Data);
}

#[test]
fn calendar_pull_in_from_the_left() {
    let mut pipeline = FramePipeline::with_defaults();

    let frames = vec![fist_at(0.20, 0.5), fist_at(0.24, 0.5), fist_at(0.28, 0.5)];
    let commands = run(&mut pipeline, &frames);

    assert_eq!(commands, vec![Command::NavigateCalendar]);
    assert_eq!(pipeline.state().current_page(), PageId::Calendar);
}

#[test]
fn diagonal_motion_navigates_nothing() {
    let mut pipeline = FramePipeline::with_defaults();

    let frames = vec![
        fist_at(0.40, 0.40),
        fist_at(0.44, 0.44),
        fist_at(0.48, 0.48),
        fist_at(0.52, 0.52),
    ];
    let commands = run(&mut pipeline, &frames);

    assert!(commands.is_empty());
    assert_eq!(pipeline.state().current_page(), PageId::Home);
}

#[test]
fn exercise_mode_blocks_navigation_end_to_end() {
    let state = SystemState::new();
    state.set_mode(Mode::Exercise);
    let mut pipeline = FramePipeline::new(GestureConfig::default(), state);

    let frames = vec![fist_at(0.5, 0.40), fist_at(0.5, 0.50)];
    for frame in &frames {
        let outcome = pipeline.process_frame(frame);
        assert_eq!(outcome.transition, None);
    }
    assert_eq!(pipeline.state().current_page(), PageId::Home);

    // Back in Control mode the same motion navigates again.
    pipeline.state().set_mode(Mode::Control);
    let mut frames = std::iter::repeat(fist_at(0.5, 0.50))
        .take(15)
        .collect::<Vec<_>>();
    frames.push(open_hand_at(0.5, 0.40));
    frames.extend([fist_at(0.5, 0.40), fist_at(0.5, 0.50)]);

    let commands = run(&mut pipeline, &frames);
    assert_eq!(commands.last(), Some(&Command::NavigateData));
    assert_eq!(pipeline.state().current_page(), PageId::Data);
}

#[test]
fn hand_loss_mid_gesture_restarts_cleanly() {
    let mut pipeline = FramePipeline::with_defaults();

    // Start a pull, lose the hand before the threshold, then redo it.
    pipeline.process_frame(&fist_at(0.5, 0.40));
    pipeline.process_frame(&fist_at(0.5, 0.44));
    pipeline.process_empty_frame();

    let frames = vec![fist_at(0.5, 0.44), fist_at(0.5, 0.52)];
    let commands = run(&mut pipeline, &frames);

    assert_eq!(commands, vec![Command::NavigateData]);
}
