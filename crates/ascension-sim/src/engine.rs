//! Game engine: the authoritative per-frame driver.
//!
//! `GameEngine` owns the hecs ECS world, the player, run bookkeeping, the
//! seeded RNG and the scheduled-event queue. It processes player commands,
//! drains due events, runs all systems and produces `GameStateSnapshot`s.
//! Completely headless; the wall clock only enters through `tick(now_ms)`.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use ascension_core::commands::PlayerCommand;
use ascension_core::components::Player;
use ascension_core::config::SimConfig;
use ascension_core::constants::{DASH_RECHARGE_INTERVAL_MS, DEATH_ANIMATION_MS};
use ascension_core::enums::{GamePhase, SlotKey, SpawnPausePolicy};
use ascension_core::events::{EffectRequest, GameEvent};
use ascension_core::state::GameStateSnapshot;
use ascension_core::types::{SimTime, WallClockMs};
use ascension_core::upgrades::UpgradeOffer;

use crate::game_state::GameState;
use crate::scheduler::{EventQueue, ScheduledEvent};
use crate::systems;
use crate::systems::snapshot::SnapshotInput;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct GameEngine {
    config: SimConfig,
    world: World,
    player: Player,
    state: GameState,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    scheduler: EventQueue,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    effects: Vec<EffectRequest>,
    /// Levels whose upgrade offer has not been presented yet.
    pending_levels: VecDeque<u32>,
    upgrade_offer: Option<UpgradeOffer>,
    /// Wall-clock time the current level-up pause began.
    paused_at: Option<WallClockMs>,
    now: WallClockMs,
}

impl GameEngine {
    /// Create a new engine sitting at the main menu.
    pub fn new(config: SimConfig) -> Self {
        let player = Player::new(config.field_width, config.field_height);
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world: World::new(),
            player,
            state: GameState::default(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            scheduler: EventQueue::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            effects: Vec::new(),
            pending_levels: VecDeque::new(),
            upgrade_offer: None,
            paused_at: None,
            now: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one frame at wall-clock time `now_ms` and
    /// return the resulting snapshot. The world only moves while playing;
    /// commands, scheduled events and the snapshot are processed every call.
    pub fn tick(&mut self, now_ms: WallClockMs) -> GameStateSnapshot {
        self.now = self.now.max(now_ms);
        self.process_commands();
        self.process_scheduled_events();

        match self.phase {
            GamePhase::Playing => self.run_systems(),
            GamePhase::DeathAnimation => {
                systems::particles::run(&mut self.world, &mut self.despawn_buffer)
            }
            GamePhase::MainMenu | GamePhase::ChoosingUpgrade | GamePhase::GameOver => {}
        }

        self.present_next_offer();
        systems::particles::emit_all(&mut self.world, &mut self.rng, &mut self.effects);

        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInput {
                player: &self.player,
                state: &self.state,
                time: &self.time,
                phase: self.phase,
                now: self.now,
                upgrade_offer: self.upgrade_offer.as_ref(),
                events: std::mem::take(&mut self.events),
            },
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The upgrade offer waiting for a choice, if any.
    pub fn upgrade_offer(&self) -> Option<&UpgradeOffer> {
        self.upgrade_offer.as_ref()
    }

    /// Whether the run is live (playing or paused for an upgrade choice).
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::ChoosingUpgrade)
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn scheduler(&self) -> &EventQueue {
        &self.scheduler
    }

    /// Add experience as if an orb had been collected (for tests).
    #[cfg(test)]
    pub(crate) fn grant_exp(&mut self, amount: u64) {
        self.state.exp += amount;
        let reached = systems::progression::check_level_up(
            &mut self.state,
            &mut self.player,
            &mut self.scheduler,
            self.now,
        );
        for level in reached {
            self.on_level_reached(level);
        }
        self.present_next_offer();
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
                    self.start_run();
                } else {
                    trace!(phase = ?self.phase, "start ignored: run in progress");
                }
            }
            PlayerCommand::Restart => {
                info!("restarting run");
                self.start_run();
            }
            PlayerCommand::ReturnToMenu => {
                info!("returning to menu");
                self.reset();
            }
            PlayerCommand::SetCursor { x, y } => {
                self.player.cursor = glam::Vec2::new(x, y);
            }
            PlayerCommand::KeyDown { key } => match SlotKey::from_key(&key) {
                Some(slot) => self.activate_skill(slot),
                None => trace!(%key, "unbound key ignored"),
            },
            PlayerCommand::KeyUp { key } => {
                trace!(%key, "key released");
            }
            PlayerCommand::ActivateSkill { slot } => self.activate_skill(slot),
            PlayerCommand::ChooseUpgrade { index } => self.choose_upgrade(index),
        }
    }

    /// Tear down everything belonging to the current run, cancelling every
    /// pending scheduled event.
    fn reset(&mut self) {
        self.world.clear();
        self.player = Player::new(self.config.field_width, self.config.field_height);
        self.state = GameState::default();
        self.time = SimTime::default();
        self.phase = GamePhase::MainMenu;
        self.scheduler.clear();
        self.despawn_buffer.clear();
        self.effects.clear();
        self.pending_levels.clear();
        self.upgrade_offer = None;
        self.paused_at = None;
    }

    fn start_run(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        self.scheduler.schedule(self.now, ScheduledEvent::SpawnWave);
        self.scheduler
            .schedule_in(self.now, DASH_RECHARGE_INTERVAL_MS, ScheduledEvent::RechargeDash);
        self.events.push(GameEvent::RunStarted);
        info!(seed = self.config.seed, "run started");
    }

    fn activate_skill(&mut self, slot: SlotKey) {
        if self.phase != GamePhase::Playing {
            trace!(slot = slot.as_str(), phase = ?self.phase, "activation ignored: not playing");
            return;
        }
        systems::skills::activate(
            &mut self.player,
            slot,
            self.now,
            &mut self.scheduler,
            &mut self.events,
            &mut self.effects,
        );
    }

    fn choose_upgrade(&mut self, index: usize) {
        if self.phase != GamePhase::ChoosingUpgrade {
            trace!(index, "choice ignored: no offer open");
            return;
        }
        let Some(option) = self
            .upgrade_offer
            .as_ref()
            .and_then(|offer| offer.options.get(index))
            .copied()
        else {
            trace!(index, "choice ignored: index out of range");
            return;
        };
        if !systems::progression::apply_upgrade(&option, &mut self.player) {
            trace!(index, "choice ignored: option no longer valid");
            return;
        }

        self.events.push(GameEvent::UpgradeApplied { option });
        self.upgrade_offer = None;
        if self.pending_levels.is_empty() {
            self.resume();
        }
    }

    /// Pause the world for an upgrade choice.
    fn pause(&mut self) {
        self.phase = GamePhase::ChoosingUpgrade;
        self.paused_at = Some(self.now);
        systems::skills::pause_all(&mut self.player, self.now);
    }

    /// Resume after the last pending choice.
    fn resume(&mut self) {
        let paused_for = self
            .paused_at
            .take()
            .map_or(0, |at| self.now.saturating_sub(at));
        systems::skills::resume_all(&mut self.player, self.now);
        if self.config.spawn_pause_policy == SpawnPausePolicy::Freeze {
            self.scheduler.delay_where(paused_for, ScheduledEvent::is_spawn);
            if let Some(until) = self.state.spawn_reduction_until.as_mut() {
                *until = until.saturating_add(paused_for);
            }
            self.state.last_blue_spawn_ms = self.state.last_blue_spawn_ms.saturating_add(paused_for);
        }
        self.phase = GamePhase::Playing;
        debug!(paused_for, "resumed");
    }

    /// Open the next queued upgrade offer once the world is free to pause.
    fn present_next_offer(&mut self) {
        if self.upgrade_offer.is_some() || !self.is_running() {
            return;
        }
        while let Some(level) = self.pending_levels.pop_front() {
            let offer = systems::progression::build_offer(level, &self.player, &mut self.rng);
            if offer.options.is_empty() {
                debug!(level, "nothing left to offer");
                continue;
            }
            if self.phase == GamePhase::Playing {
                self.pause();
            }
            self.events.push(GameEvent::LevelUpChoicesReady {
                level,
                options: offer.options.clone(),
            });
            debug!(level, options = offer.options.len(), "upgrade offer presented");
            self.upgrade_offer = Some(offer);
            return;
        }
        // Every remaining level was skipped.
        if self.phase == GamePhase::ChoosingUpgrade {
            self.resume();
        }
    }

    fn on_level_reached(&mut self, level: u32) {
        self.events.push(GameEvent::LevelUp { level });
        if level == ascension_core::constants::BLUE_MIN_LEVEL {
            systems::wave_spawner::spawn_first_blue(
                &mut self.world,
                &mut self.rng,
                &mut self.state,
                self.now,
                self.config.field_width,
                self.config.field_height,
                &mut self.events,
            );
        }
        self.pending_levels.push_back(level);
    }

    fn on_player_died(&mut self) {
        self.phase = GamePhase::DeathAnimation;
        self.effects.push(EffectRequest::Death {
            x: self.player.pos.x,
            y: self.player.pos.y,
        });
        self.scheduler
            .schedule_in(self.now, DEATH_ANIMATION_MS, ScheduledEvent::ShowGameOver);
        info!(score = self.state.score, level = self.state.level, "player destroyed");
    }

    /// Drain every scheduled event due now.
    fn process_scheduled_events(&mut self) {
        let paused = self.phase == GamePhase::ChoosingUpgrade;
        let policy = self.config.spawn_pause_policy;
        while let Some(event) = self
            .scheduler
            .pop_due(self.now, |e| paused && e.held_while_paused(policy))
        {
            self.handle_scheduled(event);
        }
    }

    fn handle_scheduled(&mut self, event: ScheduledEvent) {
        let (width, height) = (self.config.field_width, self.config.field_height);
        match event {
            ScheduledEvent::SpawnWave => {
                if self.is_running() {
                    systems::wave_spawner::run_wave(
                        &mut self.world,
                        &mut self.rng,
                        &mut self.state,
                        &mut self.scheduler,
                        self.now,
                        width,
                        height,
                        &mut self.events,
                    );
                }
            }
            ScheduledEvent::SpawnEnemy => {
                if self.is_running() {
                    world_setup::spawn_enemy(&mut self.world, &mut self.rng, self.state.level, width);
                }
            }
            ScheduledEvent::ExpireSkill { slot, activation } => {
                systems::skills::expire(
                    &mut self.player,
                    slot,
                    activation,
                    self.now,
                    &mut self.scheduler,
                    &mut self.events,
                );
            }
            ScheduledEvent::ClearSpawnReduction => {
                if self
                    .state
                    .spawn_reduction_until
                    .is_some_and(|until| self.now >= until)
                {
                    self.state.spawn_reduction_until = None;
                }
            }
            ScheduledEvent::RechargeDash => {
                if self.is_running() {
                    systems::skills::recharge_dashes(&mut self.player, self.now, &mut self.events);
                    self.scheduler.schedule_in(
                        self.now,
                        DASH_RECHARGE_INTERVAL_MS,
                        ScheduledEvent::RechargeDash,
                    );
                }
            }
            ScheduledEvent::ShowGameOver => {
                if self.phase == GamePhase::DeathAnimation {
                    self.phase = GamePhase::GameOver;
                    self.events.push(GameEvent::GameOver {
                        score: self.state.score,
                        level: self.state.level,
                        elapsed_ticks: self.time.tick,
                    });
                    info!(
                        score = self.state.score,
                        level = self.state.level,
                        elapsed = %self.time.elapsed_label(),
                        "game over"
                    );
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let (width, height) = (self.config.field_width, self.config.field_height);
        self.time.advance();

        // 1. Player movement and auto-fire
        systems::player::run(
            &mut self.world,
            &mut self.player,
            &mut self.rng,
            &self.time,
            width,
            height,
            &mut self.effects,
        );
        // 2. Bullets
        systems::bullets::run(
            &mut self.world,
            width,
            height,
            &mut self.effects,
            &mut self.despawn_buffer,
        );
        // 3. Enemy behaviour
        systems::enemies::run(&mut self.world, self.player.pos, width, height);
        // 4. Particles
        systems::particles::run(&mut self.world, &mut self.despawn_buffer);
        // 5. Collisions, experience and level-ups
        let outcome = systems::collision::run(
            &mut self.world,
            &mut self.player,
            &mut self.state,
            &mut self.rng,
            &mut self.scheduler,
            self.now,
            &mut self.events,
            &mut self.effects,
        );
        // 6. Cleanup (exited or dead enemies)
        systems::cleanup::run(&mut self.world, &mut self.state, height, &mut self.despawn_buffer);

        for level in outcome.levels_reached {
            self.on_level_reached(level);
        }
        if outcome.player_died {
            self.on_player_died();
        }
    }
}
