#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::PlayerCommand;
    use crate::components::{Player, Trail};
    use crate::config::{ConfigError, SimConfig};
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::skills::{SkillKind, SkillParams, BASIC_START_LEVEL, ULTIMATE_START_LEVEL};
    use crate::types::*;
    use crate::upgrades::UpgradeOption;

    // ---- Commands / events wire format ----

    #[test]
    fn test_player_command_tagged_json() {
        let json = serde_json::to_string(&PlayerCommand::SetCursor { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(json, r#"{"type":"SetCursor","x":1.0,"y":2.0}"#);

        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"KeyDown","key":"q"}"#).unwrap();
        assert!(matches!(cmd, PlayerCommand::KeyDown { ref key } if key == "q"));

        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type":"ChooseUpgrade","index":2}"#).unwrap();
        assert!(matches!(cmd, PlayerCommand::ChooseUpgrade { index: 2 }));
    }

    #[test]
    fn test_game_over_event_json() {
        let event = GameEvent::GameOver {
            score: 1234,
            level: 7,
            elapsed_ticks: 3700,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"GameOver""#));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // ---- Slot keys ----

    #[test]
    fn test_slot_key_case_insensitive() {
        assert_eq!(SlotKey::from_key("q"), Some(SlotKey::Q));
        assert_eq!(SlotKey::from_key("W"), Some(SlotKey::W));
        assert_eq!(SlotKey::from_key("e"), Some(SlotKey::E));
        assert_eq!(SlotKey::from_key("R"), Some(SlotKey::R));
        assert_eq!(SlotKey::from_key("x"), None);
        assert_eq!(SlotKey::from_key(""), None);
        assert_eq!(SlotKey::from_key("Shift"), None);
    }

    // ---- Skill catalog ----

    #[test]
    fn test_basic_skills_start_at_level_one() {
        for kind in SkillKind::BASIC {
            let skill = kind.instantiate();
            assert_eq!(skill.level, BASIC_START_LEVEL);
            assert_eq!(skill.kind(), kind);
            assert_eq!(skill.category(), SkillCategory::Basic);
            assert!(!skill.active);
            assert!(skill.last_used.is_none());
            assert!(skill.can_level_up());
        }
    }

    #[test]
    fn test_ultimates_start_at_level_ten() {
        for kind in SkillKind::ULTIMATE {
            let skill = kind.instantiate();
            assert_eq!(skill.level, ULTIMATE_START_LEVEL);
            assert_eq!(skill.category(), SkillCategory::Ultimate);
            assert!(!skill.can_level_up(), "ultimates are never offered as level-ups");
            assert!(kind.ultimate_bonus().is_some());
        }
    }

    #[test]
    fn test_dash_has_no_duration() {
        let dash = SkillKind::Dash.instantiate();
        assert!(dash.duration_ms.is_none());
        assert_eq!(dash.cooldown_ms, 10_000);
        assert_eq!(dash.charges(), Some((1, 1)));
    }

    #[test]
    fn test_barrier_radius_accessor() {
        let barrier = SkillKind::Barrier.instantiate();
        assert_eq!(barrier.barrier_radius(), Some(50.0));
        assert!(matches!(barrier.params, SkillParams::Barrier { .. }));
        assert_eq!(SkillKind::Homing.instantiate().barrier_radius(), None);
    }

    // ---- Player ----

    #[test]
    fn test_player_spawn_defaults() {
        let player = Player::new(800.0, 600.0);
        assert_eq!(player.pos, Vec2::new(400.0, 500.0));
        assert_eq!(player.lives, PLAYER_MAX_LIVES);
        assert_eq!(player.max_lives, PLAYER_MAX_LIVES);
        assert!(player.skills().next().is_none());
        assert!(!player.is_invulnerable());
    }

    #[test]
    fn test_player_stat_multipliers() {
        let mut player = Player::new(800.0, 600.0);
        player.upgrades.speed = 5;
        player.upgrades.damage = 2;
        assert!((player.effective_speed() - 7.5).abs() < 1e-5);
        assert!((player.effective_damage() - 12.0).abs() < 1e-5);
        assert!((player.effective_fire_rate() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_active_invincibility_protects_player() {
        let mut player = Player::new(800.0, 600.0);
        let mut skill = SkillKind::Invincible.instantiate();
        skill.active = true;
        player.slots[SlotKey::R.index()] = Some(skill);
        assert!(player.is_invulnerable());
    }

    // ---- Geometry / timing ----

    #[test]
    fn test_elapsed_label() {
        let time = SimTime { tick: 3600 + 61 * 60 };
        assert_eq!(time.minutes(), 2);
        assert_eq!(time.seconds(), 1);
        assert_eq!(time.elapsed_label(), "2:01");
        assert_eq!(SimTime::default().elapsed_label(), "0:00");
    }

    #[test]
    fn test_unit_fraction_clamps() {
        assert_eq!(unit_fraction(-5.0, 10.0), 0.0);
        assert_eq!(unit_fraction(15.0, 10.0), 1.0);
        assert_eq!(unit_fraction(5.0, 0.0), 0.0);
        assert!((unit_fraction(2.5, 10.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!(circles_overlap(a, 5.0, b, 5.1));
        assert!(!circles_overlap(a, 5.0, b, 5.0));
    }

    #[test]
    fn test_hue_to_rgb_primaries() {
        assert_eq!(hue_to_rgb(0.0), 0xff0000);
        assert_eq!(hue_to_rgb(120.0), 0x00ff00);
        assert_eq!(hue_to_rgb(240.0), 0x0000ff);
        assert_eq!(hue_to_rgb(360.0), 0xff0000);
    }

    #[test]
    fn test_trail_keeps_last_ten() {
        let mut trail = Trail::default();
        for i in 0..25 {
            trail.record(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.points.len(), TRAIL_LENGTH);
        assert_eq!(trail.points.front().unwrap().x, 15.0);
        assert_eq!(trail.points.back().unwrap().x, 24.0);
    }

    // ---- Upgrades ----

    #[test]
    fn test_upgrade_descriptions() {
        let opt = UpgradeOption::LevelUpSkill {
            slot: SlotKey::Q,
            kind: SkillKind::Dash,
            next_level: 5,
        };
        assert_eq!(
            opt.description(),
            "Level 5: Quick dash movement (2 charge stacks)"
        );
        let stat = UpgradeOption::Stat {
            stat: StatKind::Damage,
            next_stack: 3,
        };
        assert_eq!(stat.description(), "Increase base damage by 10% (Lv 3/5)");
        assert!(UpgradeOption::NewSkill {
            kind: SkillKind::Homing
        }
        .is_ultimate());
    }

    // ---- Config ----

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config = SimConfig::from_json_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.field_width, DEFAULT_FIELD_WIDTH);
        assert_eq!(config.spawn_pause_policy, SpawnPausePolicy::KeepRunning);
    }

    #[test]
    fn test_config_policy_from_json() {
        let config =
            SimConfig::from_json_str(r#"{"spawn_pause_policy": "Freeze"}"#).unwrap();
        assert_eq!(config.spawn_pause_policy, SpawnPausePolicy::Freeze);
    }

    #[test]
    fn test_config_rejects_bad_field() {
        let err = SimConfig::from_json_str(r#"{"field_width": 0.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { .. }));

        let err = SimConfig::from_json_str(r#"{"tick_rate": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickRate));

        let err = SimConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
