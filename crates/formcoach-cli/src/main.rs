//! Command-line tools for the formcoach system.
//!
//! `replay` runs a recorded landmark session through the gesture pipeline
//! and prints the navigation it would have produced; `analyze` scores
//! recorded body poses; `coach` asks the language-model coach a one-shot
//! question.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use formcoach_core::{Coach, HandLandmarks, Mode, PoseLandmarks};
use formcoach_gesture::{FramePipeline, GestureConfig, SystemState};
use formcoach_llm::{CoachConfig, OllamaCoach};
use formcoach_pose::PoseAnalyzer;

#[derive(Parser)]
#[command(name = "formcoach")]
#[command(about = "Gesture navigation and form coaching tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded hand-landmark session through the gesture pipeline
    Replay {
        /// JSONL file, one hand landmark set per line (`null` for no hand)
        #[arg(short, long)]
        input: PathBuf,

        /// Start in exercise mode (navigation commands are dropped)
        #[arg(long)]
        exercise: bool,

        /// Swipe displacement threshold
        #[arg(long, default_value_t = 0.07)]
        swipe_threshold: f64,

        /// Cooldown length in frames
        #[arg(long, default_value_t = 15)]
        cooldown_frames: u32,
    },

    /// Score a recorded body-landmark session for exercise form
    Analyze {
        /// JSONL file, one pose landmark set per line
        #[arg(short, long)]
        input: PathBuf,

        /// Model weight file (heuristic fallback when absent)
        #[arg(long, default_value = "models/pose_weights.json")]
        model: PathBuf,

        /// Label map file
        #[arg(long, default_value = "models/pose_labels.json")]
        labels: PathBuf,
    },

    /// Ask the coach for one line of advice
    Coach {
        /// The form observation to react to
        feedback: String,

        /// Persona name from the coach configuration
        #[arg(short, long)]
        persona: Option<String>,

        /// Coach configuration file
        #[arg(short, long, default_value = "coach.json")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay {
            input,
            exercise,
            swipe_threshold,
            cooldown_frames,
        } => replay(&input, exercise, swipe_threshold, cooldown_frames),
        Commands::Analyze {
            input,
            model,
            labels,
        } => analyze(&input, &model, &labels),
        Commands::Coach {
            feedback,
            persona,
            config,
        } => coach(&feedback, persona.as_deref(), &config).await,
    }
}

fn replay(
    input: &PathBuf,
    exercise: bool,
    swipe_threshold: f64,
    cooldown_frames: u32,
) -> Result<()> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;

    let config = GestureConfig::builder()
        .swipe_threshold(swipe_threshold)
        .cooldown_frames(cooldown_frames)
        .build();
    let state = SystemState::new();
    if exercise {
        state.set_mode(Mode::Exercise);
    }
    let mut pipeline = FramePipeline::new(config, state);

    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading frame {number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let hand: Option<HandLandmarks> = serde_json::from_str(&line)
            .with_context(|| format!("parsing frame {number}"))?;
        let outcome = match hand {
            Some(hand) => pipeline.process_frame(&hand),
            None => pipeline.process_empty_frame(),
        };

        if let Some(transition) = outcome.transition {
            println!(
                "frame {number}: {} ({} -> {})",
                outcome
                    .command
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                transition.from,
                transition.to
            );
        }
    }

    let stats = pipeline.engine().stats();
    info!(
        frames = stats.frames_processed,
        commands = stats.commands_emitted,
        reversals = stats.reversal_adjustments,
        "replay finished"
    );
    println!("final page: {}", pipeline.state().current_page());
    Ok(())
}

fn analyze(input: &PathBuf, model: &PathBuf, labels: &PathBuf) -> Result<()> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let analyzer = PoseAnalyzer::bootstrap(model, labels);
    info!(model_loaded = analyzer.has_model(), "analyzer ready");

    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading frame {number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let pose: PoseLandmarks = serde_json::from_str(&line)
            .with_context(|| format!("parsing frame {number}"))?;
        match analyzer.analyze(&pose) {
            Ok(feedback) => println!(
                "frame {number}: {} ({:.0}%) - {}",
                feedback.exercise,
                f64::from(feedback.confidence.value()) * 100.0,
                feedback.summary
            ),
            Err(error) => println!("frame {number}: skipped ({error})"),
        }
    }
    Ok(())
}

async fn coach(feedback: &str, persona: Option<&str>, config: &PathBuf) -> Result<()> {
    let config = CoachConfig::load(config);
    let coach = OllamaCoach::new(config).context("building coach client")?;

    let advice = coach.advise(feedback, persona).await;
    println!("{advice}");
    Ok(())
}
