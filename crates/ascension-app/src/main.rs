//! Headless autopilot session.
//!
//! Usage: `ascension [config.json] [seconds]`

use std::time::{Duration, Instant};

use tracing::{info, warn};

use ascension_app::game_loop::spawn_game_loop;
use ascension_app::hooks::AutoPilot;
use ascension_app::AppError;
use ascension_core::commands::PlayerCommand;
use ascension_core::config::SimConfig;

const DEFAULT_SESSION_SECS: u64 = 30;

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load(&path).inspect_err(|e| warn!(%path, "{e}"))?,
        None => SimConfig::default(),
    };
    let session = Duration::from_secs(
        args.next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SESSION_SECS),
    );
    info!(seed = config.seed, secs = session.as_secs(), "starting autopilot session");

    let pilot = AutoPilot::new();
    let summary = pilot.summary_handle();
    let handle = spawn_game_loop(config, pilot)?;
    handle.send(PlayerCommand::StartRun)?;

    let deadline = Instant::now() + session;
    let finished = loop {
        if let Some(done) = summary.lock().ok().and_then(|lock| *lock) {
            break Some(done);
        }
        if Instant::now() >= deadline || !handle.is_running() {
            break None;
        }
        std::thread::sleep(Duration::from_millis(100));
    };

    match finished {
        Some(run) => info!(
            score = run.score,
            level = run.level,
            ticks = run.elapsed_ticks,
            "run ended"
        ),
        None => {
            if let Some(snapshot) = handle.snapshot() {
                info!(
                    score = snapshot.hud.score,
                    level = snapshot.hud.level,
                    lives = snapshot.hud.lives,
                    elapsed = %snapshot.hud.elapsed,
                    "session time limit reached"
                );
            }
        }
    }

    handle.shutdown()
}
