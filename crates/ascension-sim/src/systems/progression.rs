//! Progression: experience curve, level-ups, upgrade offers and their
//! application.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use ascension_core::components::Player;
use ascension_core::constants::*;
use ascension_core::enums::{SlotKey, StatKind};
use ascension_core::skills::SkillKind;
use ascension_core::types::WallClockMs;
use ascension_core::upgrades::{UpgradeOffer, UpgradeOption};

use crate::game_state::GameState;
use crate::scheduler::{EventQueue, ScheduledEvent};
use crate::systems::skills;

/// Experience required to advance from `level`: `floor(100 × 1.2^(level−1))`.
pub fn exp_needed_for(level: u32) -> u64 {
    let exponent = f64::from(level.saturating_sub(1));
    (BASE_EXP_NEEDED * EXP_GROWTH.powf(exponent)).floor() as u64
}

/// Consume experience while it covers the threshold. Returns every level
/// reached, in order.
pub fn check_level_up(
    state: &mut GameState,
    player: &mut Player,
    scheduler: &mut EventQueue,
    now: WallClockMs,
) -> Vec<u32> {
    let mut reached = Vec::new();
    while state.exp >= state.exp_needed {
        state.exp -= state.exp_needed;
        state.level += 1;
        state.exp_needed = exp_needed_for(state.level);

        let until = now.saturating_add(SPAWN_REDUCTION_MS);
        state.spawn_reduction_until = Some(until);
        scheduler.schedule(until, ScheduledEvent::ClearSpawnReduction);

        if let Some(ultimate) = player.slot_mut(SlotKey::R) {
            if skills::apply_ultimate_bonus(ultimate, state.level) {
                info!(level = state.level, kind = ?ultimate.kind(), "ultimate upgraded");
            }
        }

        info!(level = state.level, exp_needed = state.exp_needed, "level up");
        reached.push(state.level);
    }
    reached
}

/// Build the upgrade choice for `level`. The ultimate unlock level always
/// offers the three ultimates; other levels draw three from the pool.
pub fn build_offer(level: u32, player: &Player, rng: &mut ChaCha8Rng) -> UpgradeOffer {
    if level == ULTIMATE_UNLOCK_LEVEL {
        return UpgradeOffer {
            level,
            options: SkillKind::ULTIMATE
                .into_iter()
                .map(|kind| UpgradeOption::NewSkill { kind })
                .collect(),
        };
    }

    let mut options = candidate_pool(player, rng);
    options.shuffle(rng);
    options.truncate(UPGRADE_CHOICES);
    UpgradeOffer { level, options }
}

/// Every option currently valid for the player. A single random unowned basic
/// skill stands in for all of them.
pub fn candidate_pool(player: &Player, rng: &mut ChaCha8Rng) -> Vec<UpgradeOption> {
    let mut pool = Vec::new();

    if player.basic_skill_count < MAX_BASIC_SKILLS {
        let unowned: Vec<SkillKind> = SkillKind::BASIC
            .into_iter()
            .filter(|&kind| !player.owns(kind))
            .collect();
        if let Some(&kind) = unowned.choose(rng) {
            pool.push(UpgradeOption::NewSkill { kind });
        }
    }

    for (slot, skill) in player.skills() {
        if skill.can_level_up() {
            pool.push(UpgradeOption::LevelUpSkill {
                slot,
                kind: skill.kind(),
                next_level: skill.level + 1,
            });
        }
    }

    for stat in StatKind::ALL {
        let stacks = player.upgrades.stacks(stat);
        if stacks < MAX_STAT_STACKS {
            pool.push(UpgradeOption::Stat {
                stat,
                next_stack: stacks + 1,
            });
        }
    }

    if player.lives < player.max_lives && player.upgrades.heals < MAX_HEALS {
        pool.push(UpgradeOption::Heal);
    }

    pool
}

/// Apply an upgrade after re-validating it against the player. Returns
/// `false`, leaving the player untouched, if the option no longer applies.
pub fn apply_upgrade(option: &UpgradeOption, player: &mut Player) -> bool {
    let applied = match *option {
        UpgradeOption::NewSkill { kind } => acquire_skill(player, kind),
        UpgradeOption::LevelUpSkill {
            slot,
            kind,
            next_level,
        } => match player.slot_mut(slot) {
            Some(skill)
                if skill.kind() == kind
                    && skill.level + 1 == next_level
                    && skill.can_level_up() =>
            {
                skills::level_up(skill);
                true
            }
            _ => false,
        },
        UpgradeOption::Stat { stat, next_stack } => {
            let stacks = player.upgrades.stacks_mut(stat);
            if *stacks < MAX_STAT_STACKS && *stacks + 1 == next_stack {
                *stacks += 1;
                true
            } else {
                false
            }
        }
        UpgradeOption::Heal => {
            if player.lives < player.max_lives && player.upgrades.heals < MAX_HEALS {
                player.lives = (player.lives + 1).min(player.max_lives);
                player.upgrades.heals += 1;
                true
            } else {
                false
            }
        }
    };
    if applied {
        debug!(option = %option.title(), "upgrade applied");
    }
    applied
}

/// Put a new skill in its slot: ultimates into R, basics into the first empty
/// Q/W/E slot.
fn acquire_skill(player: &mut Player, kind: SkillKind) -> bool {
    if player.owns(kind) {
        return false;
    }
    if kind.is_ultimate() {
        let slot = &mut player.slots[SlotKey::R.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(kind.instantiate());
        info!(?kind, "ultimate unlocked");
        return true;
    }

    if player.basic_skill_count >= MAX_BASIC_SKILLS {
        return false;
    }
    let Some(slot) = SlotKey::BASIC
        .into_iter()
        .find(|slot| player.slots[slot.index()].is_none())
    else {
        return false;
    };
    player.slots[slot.index()] = Some(kind.instantiate());
    player.basic_skill_count += 1;
    true
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(9)
    }

    #[test]
    fn test_exp_curve() {
        assert_eq!(exp_needed_for(1), 100);
        assert_eq!(exp_needed_for(2), 120);
        assert_eq!(exp_needed_for(3), 144);
        assert_eq!(exp_needed_for(4), 172);
    }

    #[test]
    fn test_level_ten_offers_ultimates() {
        let player = Player::new(800.0, 600.0);
        let offer = build_offer(10, &player, &mut rng());
        assert_eq!(offer.options.len(), 3);
        assert!(offer.options.iter().all(UpgradeOption::is_ultimate));
    }

    #[test]
    fn test_fresh_player_pool() {
        let player = Player::new(800.0, 600.0);
        let pool = candidate_pool(&player, &mut rng());
        // One new basic skill plus three stats; no heal at full lives.
        assert_eq!(pool.len(), 4);
        assert!(matches!(pool[0], UpgradeOption::NewSkill { kind } if !kind.is_ultimate()));
        assert!(!pool.contains(&UpgradeOption::Heal));
    }

    #[test]
    fn test_heal_offered_when_hurt() {
        let mut player = Player::new(800.0, 600.0);
        player.lives = 3;
        let pool = candidate_pool(&player, &mut rng());
        assert!(pool.contains(&UpgradeOption::Heal));

        player.upgrades.heals = MAX_HEALS;
        let pool = candidate_pool(&player, &mut rng());
        assert!(!pool.contains(&UpgradeOption::Heal));
    }

    #[test]
    fn test_offer_picks_at_most_three() {
        let mut player = Player::new(800.0, 600.0);
        player.lives = 1;
        let offer = build_offer(2, &player, &mut rng());
        assert_eq!(offer.options.len(), 3);

        for stat in StatKind::ALL {
            *player.upgrades.stacks_mut(stat) = MAX_STAT_STACKS;
        }
        player.upgrades.heals = MAX_HEALS;
        player.basic_skill_count = MAX_BASIC_SKILLS;
        let offer = build_offer(2, &player, &mut rng());
        assert!(offer.options.is_empty());
    }

    /// Max out everything the pool draws from on a running engine's player.
    fn exhaust_pool(player: &mut Player) {
        for stat in StatKind::ALL {
            *player.upgrades.stacks_mut(stat) = MAX_STAT_STACKS;
        }
        player.upgrades.heals = MAX_HEALS;
        player.basic_skill_count = MAX_BASIC_SKILLS;
    }

    fn running_engine() -> crate::engine::GameEngine {
        let mut engine = crate::engine::GameEngine::new(crate::SimConfig {
            seed: 9,
            ..Default::default()
        });
        engine.queue_command(ascension_core::commands::PlayerCommand::StartRun);
        engine.tick(0);
        engine
    }

    #[test]
    fn test_empty_offer_does_not_pause() {
        use ascension_core::enums::GamePhase;
        use ascension_core::events::GameEvent;

        let mut engine = running_engine();
        exhaust_pool(engine.player_mut());
        engine.grant_exp(100);
        assert_eq!(engine.state().level, 2);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(engine.upgrade_offer().is_none());

        let snap = engine.tick(16);
        assert!(snap.events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!(!snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::LevelUpChoicesReady { .. })));
        assert_eq!(snap.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_choice_exhausting_pool_resumes() {
        use ascension_core::commands::PlayerCommand;
        use ascension_core::enums::GamePhase;

        let mut engine = running_engine();
        let player = engine.player_mut();
        exhaust_pool(player);
        *player.upgrades.stacks_mut(StatKind::ALL[0]) = MAX_STAT_STACKS - 1;

        // Levels 2 and 3 queue; only the first has anything to offer.
        engine.grant_exp(220);
        assert_eq!(engine.state().level, 3);
        assert_eq!(engine.phase(), GamePhase::ChoosingUpgrade);
        assert_eq!(engine.upgrade_offer().map(|o| o.options.len()), Some(1));

        engine.queue_command(PlayerCommand::ChooseUpgrade { index: 0 });
        let snap = engine.tick(1_000);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(snap.upgrade_offer.is_none());
    }

    #[test]
    fn test_new_basic_skills_fill_qwe_in_order() {
        let mut player = Player::new(800.0, 600.0);
        for kind in [SkillKind::Dash, SkillKind::Barrier, SkillKind::RapidFire] {
            assert!(apply_upgrade(&UpgradeOption::NewSkill { kind }, &mut player));
        }
        assert_eq!(player.slot(SlotKey::Q).map(|s| s.kind()), Some(SkillKind::Dash));
        assert_eq!(player.slot(SlotKey::W).map(|s| s.kind()), Some(SkillKind::Barrier));
        assert_eq!(player.slot(SlotKey::E).map(|s| s.kind()), Some(SkillKind::RapidFire));
        assert_eq!(player.basic_skill_count, 3);
        assert!(!apply_upgrade(
            &UpgradeOption::NewSkill {
                kind: SkillKind::SpreadShot
            },
            &mut player
        ));
        assert!(player.slot(SlotKey::R).is_none());
    }

    #[test]
    fn test_ultimate_goes_to_r() {
        let mut player = Player::new(800.0, 600.0);
        let option = UpgradeOption::NewSkill {
            kind: SkillKind::Homing,
        };
        assert!(apply_upgrade(&option, &mut player));
        let r = player.slot(SlotKey::R).map(|s| (s.kind(), s.level));
        assert_eq!(r, Some((SkillKind::Homing, 10)));
        assert_eq!(player.basic_skill_count, 0);
        assert!(!apply_upgrade(
            &UpgradeOption::NewSkill {
                kind: SkillKind::Invincible
            },
            &mut player
        ));
    }

    #[test]
    fn test_stale_options_are_rejected() {
        let mut player = Player::new(800.0, 600.0);
        assert!(!apply_upgrade(&UpgradeOption::Heal, &mut player));
        assert_eq!(player.upgrades.heals, 0);

        let stale = UpgradeOption::Stat {
            stat: StatKind::Damage,
            next_stack: 3,
        };
        assert!(!apply_upgrade(&stale, &mut player));

        let missing = UpgradeOption::LevelUpSkill {
            slot: SlotKey::Q,
            kind: SkillKind::Dash,
            next_level: 2,
        };
        assert!(!apply_upgrade(&missing, &mut player));
    }

    #[test]
    fn test_heal_clamps_and_counts() {
        let mut player = Player::new(800.0, 600.0);
        player.lives = 4;
        assert!(apply_upgrade(&UpgradeOption::Heal, &mut player));
        assert_eq!(player.lives, player.max_lives);
        assert_eq!(player.upgrades.heals, 1);
    }

    #[test]
    fn test_multiple_level_ups_from_one_gain() {
        let mut state = GameState::default();
        let mut player = Player::new(800.0, 600.0);
        let mut scheduler = EventQueue::new();
        state.exp = 100 + 120 + 10;
        let reached = check_level_up(&mut state, &mut player, &mut scheduler, 0);
        assert_eq!(reached, vec![2, 3]);
        assert_eq!(state.exp, 10);
        assert_eq!(state.exp_needed, 144);
        assert!(state.spawn_reduction());
        assert_eq!(
            scheduler.count(|e| *e == ScheduledEvent::ClearSpawnReduction),
            2
        );
    }
}
