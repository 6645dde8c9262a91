//! Game loop thread: runs the engine in real time and dispatches lifecycle hooks.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state for
//! polling; events are turned into hook calls.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use ascension_core::commands::PlayerCommand;
use ascension_core::config::SimConfig;
use ascension_core::events::GameEvent;
use ascension_core::state::GameStateSnapshot;
use ascension_core::types::WallClockMs;
use ascension_sim::GameEngine;

use crate::hooks::{LifecycleHooks, RunSummary};
use crate::state::{AppError, GameLoopCommand, LoopHandle};

/// Duration of one frame at `tick_rate` Hz.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop<H: LifecycleHooks>(
    config: SimConfig,
    hooks: H,
) -> Result<LoopHandle, AppError> {
    config.validate()?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("ascension-game-loop".into())
        .spawn(move || run_game_loop(config, hooks, cmd_rx, &shared))?;

    Ok(LoopHandle::new(cmd_tx, latest_snapshot, thread))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop<H: LifecycleHooks>(
    config: SimConfig,
    mut hooks: H,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let frame = tick_duration(config.tick_rate);
    let mut engine = GameEngine::new(config);
    let started = Instant::now();
    let mut next_tick_time = started;
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => forward(&mut engine, &mut hooks, cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame against the wall clock
        let now = started.elapsed().as_millis() as WallClockMs;
        let snapshot = step(&mut engine, &mut hooks, now);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next frame
        next_tick_time += frame;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > frame * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Queue a command, notifying hooks of lifecycle transitions.
pub fn forward<H: LifecycleHooks>(engine: &mut GameEngine, hooks: &mut H, command: PlayerCommand) {
    match command {
        PlayerCommand::Restart => hooks.on_restart(),
        PlayerCommand::ReturnToMenu => hooks.on_return_to_menu(),
        _ => {}
    }
    engine.queue_command(command);
}

/// Keep a hook's pick inside the offer so the run never stalls on it.
fn choice_index(requested: usize, options: usize) -> usize {
    requested.min(options.saturating_sub(1))
}

/// Tick the engine once and dispatch the resulting events to `hooks`.
/// Choices and per-frame commands take effect on the next tick.
pub fn step<H: LifecycleHooks>(
    engine: &mut GameEngine,
    hooks: &mut H,
    now: WallClockMs,
) -> GameStateSnapshot {
    let snapshot = engine.tick(now);
    for event in &snapshot.events {
        match event {
            GameEvent::GameOver {
                score,
                level,
                elapsed_ticks,
            } => hooks.on_game_over(RunSummary {
                score: *score,
                level: *level,
                elapsed_ticks: *elapsed_ticks,
            }),
            GameEvent::LevelUpChoicesReady { level, options } => {
                let requested = hooks.on_level_up_choices_ready(*level, options);
                let index = choice_index(requested, options.len());
                if index != requested {
                    warn!(level, requested, index, "hook picked a missing option; clamped");
                }
                debug!(level, index, "upgrade chosen");
                engine.queue_command(PlayerCommand::ChooseUpgrade { index });
            }
            _ => {}
        }
    }
    for command in hooks.on_frame(&snapshot) {
        forward(engine, hooks, command);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascension_core::enums::GamePhase;
    use ascension_core::upgrades::UpgradeOption;

    use crate::hooks::AutoPilot;

    #[derive(Default)]
    struct Recorder {
        offers: Vec<u32>,
        restarts: usize,
        menus: usize,
        game_over: Option<RunSummary>,
    }

    impl LifecycleHooks for Recorder {
        fn on_game_over(&mut self, summary: RunSummary) {
            self.game_over = Some(summary);
        }

        fn on_level_up_choices_ready(&mut self, level: u32, _options: &[UpgradeOption]) -> usize {
            self.offers.push(level);
            0
        }

        fn on_restart(&mut self) {
            self.restarts += 1;
        }

        fn on_return_to_menu(&mut self) {
            self.menus += 1;
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartRun))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::KeyDown {
            key: "q".into(),
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::StartRun)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(60).as_nanos(), 1_000_000_000u128 / 60);
        assert_eq!(tick_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_lifecycle_hooks_fire() {
        let mut engine = GameEngine::new(SimConfig::default());
        let mut hooks = Recorder::default();

        forward(&mut engine, &mut hooks, PlayerCommand::StartRun);
        step(&mut engine, &mut hooks, 0);
        forward(&mut engine, &mut hooks, PlayerCommand::Restart);
        let snap = step(&mut engine, &mut hooks, 100);
        assert_eq!(snap.phase, GamePhase::Playing);
        forward(&mut engine, &mut hooks, PlayerCommand::ReturnToMenu);
        let snap = step(&mut engine, &mut hooks, 200);
        assert_eq!(snap.phase, GamePhase::MainMenu);

        assert_eq!(hooks.restarts, 1);
        assert_eq!(hooks.menus, 1);
        assert!(hooks.offers.is_empty());
        assert!(hooks.game_over.is_none());
    }

    #[test]
    fn test_out_of_range_choice_is_clamped() {
        assert_eq!(choice_index(0, 3), 0);
        assert_eq!(choice_index(2, 3), 2);
        assert_eq!(choice_index(99, 3), 2);
        assert_eq!(choice_index(5, 1), 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut engine = GameEngine::new(SimConfig::default());
        let mut pilot = AutoPilot::new();
        forward(&mut engine, &mut pilot, PlayerCommand::StartRun);
        let mut snapshot = step(&mut engine, &mut pilot, 0);
        for frame in 1..120 {
            snapshot = step(&mut engine, &mut pilot, frame * 16);
        }

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"phase\""));
        assert!(snapshot.time.tick > 0);
    }

    #[test]
    fn test_spawned_loop_publishes_snapshots() {
        let handle = spawn_game_loop(SimConfig::default(), AutoPilot::new()).unwrap();
        handle.send(PlayerCommand::StartRun).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut phase = None;
        while Instant::now() < deadline {
            phase = handle.snapshot().map(|s| s.phase);
            if phase == Some(GamePhase::Playing) {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(phase, Some(GamePhase::Playing));
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            spawn_game_loop(config, AutoPilot::new()),
            Err(AppError::Config(_))
        ));
    }
}
