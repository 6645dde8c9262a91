//! Lifecycle callbacks the game loop dispatches to its embedder.

use std::sync::{Arc, Mutex};

use tracing::info;

use ascension_core::commands::PlayerCommand;
use ascension_core::enums::{EnemyKind, GamePhase, SlotStatus};
use ascension_core::state::GameStateSnapshot;
use ascension_core::upgrades::UpgradeOption;

/// Final numbers of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub elapsed_ticks: u64,
}

/// Callbacks invoked on the game loop thread.
pub trait LifecycleHooks: Send + 'static {
    /// The death animation finished.
    fn on_game_over(&mut self, _summary: RunSummary) {}

    /// An upgrade offer opened. Returns the index of the chosen option.
    fn on_level_up_choices_ready(&mut self, level: u32, options: &[UpgradeOption]) -> usize;

    fn on_restart(&mut self) {}

    fn on_return_to_menu(&mut self) {}

    /// Called after every tick; returned commands run on the next tick.
    fn on_frame(&mut self, _snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        Vec::new()
    }
}

/// Plays unattended: tracks the lowest enemy, fires every ready skill and
/// always takes the first upgrade.
#[derive(Debug, Default)]
pub struct AutoPilot {
    summary: Arc<Mutex<Option<RunSummary>>>,
    choices_made: usize,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared slot that receives the run summary on game over.
    pub fn summary_handle(&self) -> Arc<Mutex<Option<RunSummary>>> {
        Arc::clone(&self.summary)
    }

    pub fn choices_made(&self) -> usize {
        self.choices_made
    }
}

impl LifecycleHooks for AutoPilot {
    fn on_game_over(&mut self, summary: RunSummary) {
        info!(
            score = summary.score,
            level = summary.level,
            ticks = summary.elapsed_ticks,
            "autopilot run finished"
        );
        if let Ok(mut lock) = self.summary.lock() {
            *lock = Some(summary);
        }
    }

    fn on_level_up_choices_ready(&mut self, level: u32, options: &[UpgradeOption]) -> usize {
        self.choices_made += 1;
        if let Some(option) = options.first() {
            info!(level, choice = %option.title(), "autopilot upgrade");
        }
        0
    }

    fn on_restart(&mut self) {
        if let Ok(mut lock) = self.summary.lock() {
            *lock = None;
        }
    }

    fn on_frame(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        if snapshot.phase != GamePhase::Playing {
            return Vec::new();
        }
        let mut commands = Vec::new();

        let player = snapshot.player.position.0;
        // Blues patrol the edges; chase the normal enemy closest to the bottom.
        let target = snapshot
            .enemies
            .iter()
            .filter(|e| e.kind != EnemyKind::Blue)
            .max_by(|a, b| a.position.0.y.total_cmp(&b.position.0.y));
        if let Some(enemy) = target {
            commands.push(PlayerCommand::SetCursor {
                x: enemy.position.0.x,
                y: player.y,
            });
        }

        commands.extend(
            snapshot
                .skills
                .iter()
                .filter(|slot| slot.kind.is_some() && slot.status == SlotStatus::Ready)
                .map(|slot| PlayerCommand::ActivateSkill { slot: slot.slot }),
        );
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascension_core::skills::SkillKind;

    #[test]
    fn test_autopilot_takes_first_option() {
        let mut pilot = AutoPilot::new();
        let options = [
            UpgradeOption::NewSkill {
                kind: SkillKind::Dash,
            },
            UpgradeOption::Heal,
        ];
        assert_eq!(pilot.on_level_up_choices_ready(2, &options), 0);
        assert_eq!(pilot.choices_made(), 1);
    }

    #[test]
    fn test_summary_cleared_on_restart() {
        let mut pilot = AutoPilot::new();
        let handle = pilot.summary_handle();
        let summary = RunSummary {
            score: 120,
            level: 3,
            elapsed_ticks: 900,
        };
        pilot.on_game_over(summary);
        assert_eq!(*handle.lock().unwrap(), Some(summary));
        pilot.on_restart();
        assert!(handle.lock().unwrap().is_none());
    }
}
