// ABOUTME: Replays a recorded landmark session through the rep counter and prints its updates
// ABOUTME: Command-line harness for tuning thresholds against captured workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # Replay a recording with thresholds from the environment
//! cargo run --bin rep-replay -- curls.jsonl
//!
//! # Track the right arm and print JSON lines
//! cargo run --bin rep-replay -- curls.jsonl --arm right --json
//!
//! # Try a narrower hysteresis band
//! REPCOUNT_UPPER_THRESHOLD_DEG=150 REPCOUNT_LOWER_THRESHOLD_DEG=60 cargo run --bin rep-replay -- curls.jsonl
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use repcount::config::EngineConfig;
use repcount::logging::LoggingConfig;
use repcount::models::TrackedArm;
use repcount::processing::{ChannelObserver, LoopDriver, ProcessingLoop, SessionUpdate};
use repcount::sources::recorded::{RecordedDetector, RecordedFrameSource};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "rep-replay",
    about = "Replay a recorded landmark session through the rep counter",
    long_about = "Feeds a JSON-lines landmark recording through the processing loop at the configured frame rate and prints every rep and tick. Thresholds come from REPCOUNT_* environment variables."
)]
struct ReplayArgs {
    /// JSON-lines recording to replay
    recording: PathBuf,

    /// Arm to track (left or right); overrides `REPCOUNT_TRACKED_ARM`
    #[arg(long)]
    arm: Option<TrackedArm>,

    /// Frame interval in milliseconds; overrides `REPCOUNT_FRAME_INTERVAL_MS`
    #[arg(long)]
    frame_interval_ms: Option<u64>,

    /// Stop after this long without any update (the recording has run out)
    #[arg(long, default_value = "1000")]
    idle_timeout_ms: u64,

    /// Print updates and the summary as JSON lines
    #[arg(long)]
    json: bool,

    /// Print every tick, not only completed reps
    #[arg(long)]
    ticks: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ReplayArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut config = EngineConfig::from_env().context("invalid rep counter configuration")?;
    if let Some(arm) = args.arm {
        config.tracked_arm = arm;
    }
    if let Some(interval) = args.frame_interval_ms {
        config.frame_interval_ms = interval;
    }

    let (observer, updates) = ChannelObserver::channel();
    let engine = ProcessingLoop::new(
        config,
        RecordedFrameSource::new(args.recording.clone()),
        RecordedDetector::new(args.recording.clone()),
        observer,
    )
    .context("invalid rep counter configuration")?;
    info!(
        session.id = %engine.session_id(),
        recording = %args.recording.display(),
        "Replaying recording"
    );

    let (handle, task) = LoopDriver::spawn(engine);
    handle
        .start()
        .await
        .with_context(|| format!("failed to start replay of {}", args.recording.display()))?;

    print_updates(updates, &args).await?;

    handle.stop().await?;
    let summary = handle.summary().await?;
    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "Reps: {}  Time: {}  Tempo: {}  Form: {}",
            summary.total_reps,
            summary.elapsed_display,
            summary.tempo_display(),
            summary.form_score
        );
    }

    drop(handle);
    task.await?;
    Ok(())
}

/// Print updates until the recording goes quiet or the user interrupts
async fn print_updates(
    mut updates: UnboundedReceiver<SessionUpdate>,
    args: &ReplayArgs,
) -> Result<()> {
    let idle_timeout = Duration::from_millis(args.idle_timeout_ms);
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(update) = update else {
                    return Ok(());
                };
                print_update(&update, args)?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping replay");
                return Ok(());
            }
            () = tokio::time::sleep(idle_timeout) => {
                info!(idle_ms = args.idle_timeout_ms, "No updates, replay finished");
                return Ok(());
            }
        }
    }
}

fn print_update(update: &SessionUpdate, args: &ReplayArgs) -> Result<()> {
    match update {
        SessionUpdate::Tick(_) if !args.ticks => {}
        _ if args.json => println!("{}", serde_json::to_string(update)?),
        SessionUpdate::Tick(snapshot) => {
            let angle = snapshot
                .last_angle
                .map_or_else(|| "--".to_owned(), |degrees| format!("{degrees:.1}"));
            println!(
                "[{:>4}s] angle {angle:>6}  state {}  reps {}",
                snapshot.elapsed_seconds, snapshot.state, snapshot.total_reps
            );
        }
        SessionUpdate::RepCompleted(event) => {
            println!(
                "Rep {} completed (range {:.1} to {:.1} degrees)",
                event.total, event.trough_degrees, event.peak_degrees
            );
        }
    }
    Ok(())
}
