#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use ascension_core::components::EnemyBehavior;
    use ascension_core::constants::*;
    use ascension_core::enums::{EnemyArchetype, PatrolDirection};

    use crate::fsm::{advance_patrol, aimed_shot, blue_anchors, evaluate, EnemyContext};
    use crate::profiles::*;

    fn make_context(behavior: EnemyBehavior, position: Vec2, velocity: Vec2) -> EnemyContext {
        EnemyContext {
            behavior,
            position,
            velocity,
            size: ENEMY_SIZE,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            player_position: Vec2::new(400.0, 500.0),
        }
    }

    #[test]
    fn test_drift_moves_by_velocity() {
        let ctx = make_context(EnemyBehavior::Drift, Vec2::new(400.0, 100.0), Vec2::new(1.0, 2.0));
        let update = evaluate(&ctx);
        assert_eq!(update.position, Vec2::new(401.0, 102.0));
        assert_eq!(update.velocity, Vec2::new(1.0, 2.0));
        assert!(update.shot.is_none());
    }

    #[test]
    fn test_drift_bounces_off_side_wall() {
        let ctx = make_context(EnemyBehavior::Drift, Vec2::new(16.0, 100.0), Vec2::new(-1.5, 2.0));
        let update = evaluate(&ctx);
        assert!(update.position.x < ENEMY_SIZE);
        assert_eq!(update.velocity.x, 1.5, "horizontal velocity should flip");
        assert_eq!(update.velocity.y, 2.0);
    }

    #[test]
    fn test_zigzag_advances_phase_and_ignores_vx() {
        let ctx = make_context(
            EnemyBehavior::Zigzag { phase: 0.0 },
            Vec2::new(200.0, 50.0),
            Vec2::new(5.0, 1.0),
        );
        let update = evaluate(&ctx);
        let expected_x = 200.0 + (ZIGZAG_PHASE_STEP).sin() * ZIGZAG_AMPLITUDE;
        assert!((update.position.x - expected_x).abs() < 1e-5);
        assert_eq!(update.position.y, 51.0);
        match update.behavior {
            EnemyBehavior::Zigzag { phase } => assert!((phase - ZIGZAG_PHASE_STEP).abs() < 1e-6),
            other => panic!("expected zigzag, got {other:?}"),
        }
    }

    #[test]
    fn test_patrol_turns_clockwise_at_corners() {
        let w = DEFAULT_FIELD_WIDTH;
        let h = DEFAULT_FIELD_HEIGHT;
        let right = w - BLUE_PATROL_MARGIN;
        let bottom = h - BLUE_PATROL_BOTTOM_OFFSET;

        let (pos, dir) = advance_patrol(Vec2::new(right - 0.5, 50.0), PatrolDirection::Right, w, h);
        assert_eq!(dir, PatrolDirection::Down);
        assert_eq!(pos.x, right);

        let (pos, dir) = advance_patrol(Vec2::new(right, bottom - 0.5), PatrolDirection::Down, w, h);
        assert_eq!(dir, PatrolDirection::Left);
        assert_eq!(pos.y, bottom);

        let (pos, dir) = advance_patrol(Vec2::new(50.5, bottom), PatrolDirection::Left, w, h);
        assert_eq!(dir, PatrolDirection::Up);
        assert_eq!(pos.x, BLUE_PATROL_MARGIN);

        let (pos, dir) = advance_patrol(Vec2::new(50.0, 50.5), PatrolDirection::Up, w, h);
        assert_eq!(dir, PatrolDirection::Right);
        assert_eq!(pos.y, BLUE_PATROL_MARGIN);
    }

    #[test]
    fn test_patrol_stays_on_rectangle_for_a_full_lap() {
        let w = DEFAULT_FIELD_WIDTH;
        let h = DEFAULT_FIELD_HEIGHT;
        let (mut pos, mut dir) = blue_anchors(w, h)[0];
        let mut turns = 0;
        for _ in 0..2000 {
            let (next_pos, next_dir) = advance_patrol(pos, dir, w, h);
            if next_dir != dir {
                turns += 1;
            }
            pos = next_pos;
            dir = next_dir;
            assert!(pos.x >= BLUE_PATROL_MARGIN && pos.x <= w - BLUE_PATROL_MARGIN);
            assert!(pos.y >= BLUE_PATROL_MARGIN && pos.y <= h - BLUE_PATROL_BOTTOM_OFFSET);
        }
        assert!(turns >= 4, "a full lap needs four turns, saw {turns}");
    }

    #[test]
    fn test_patrol_fires_every_interval() {
        let mut behavior = EnemyBehavior::Patrol {
            direction: PatrolDirection::Right,
            shoot_cooldown: 0,
        };
        let mut position = Vec2::new(100.0, 50.0);
        let mut shots = 0;
        for tick in 1..=(BLUE_SHOOT_INTERVAL_TICKS * 2) {
            let ctx = make_context(behavior, position, Vec2::ZERO);
            let update = evaluate(&ctx);
            if update.shot.is_some() {
                shots += 1;
                assert_eq!(tick % BLUE_SHOOT_INTERVAL_TICKS, 0);
            }
            behavior = update.behavior;
            position = update.position;
        }
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_aimed_shot_points_at_target() {
        let v = aimed_shot(Vec2::new(0.0, 0.0), Vec2::new(0.0, 100.0));
        assert!((v.length() - ENEMY_BULLET_SPEED).abs() < 1e-4);
        assert!(v.x.abs() < 1e-4);
        assert!(v.y > 0.0);
    }

    #[test]
    fn test_blue_anchors() {
        let anchors = blue_anchors(800.0, 600.0);
        assert_eq!(anchors[0], (Vec2::new(50.0, 50.0), PatrolDirection::Right));
        assert_eq!(anchors[1], (Vec2::new(750.0, 50.0), PatrolDirection::Down));
        assert_eq!(anchors[2], (Vec2::new(750.0, 500.0), PatrolDirection::Left));
        assert_eq!(anchors[3], (Vec2::new(50.0, 500.0), PatrolDirection::Up));
    }

    #[test]
    fn test_hp_scaling() {
        assert_eq!(scaled_hp(15.0, 1), 15.0);
        // 15 * 1.3 = 19.5
        assert_eq!(scaled_hp(15.0, 3), 19.0);
        // Bonus caps at +200%
        assert_eq!(scaled_hp(40.0, 50), 120.0);
        assert_eq!(scaled_hp(BLUE_BASE_HP, 11), 300.0);
    }

    #[test]
    fn test_values() {
        assert_eq!(normal_value(1), 15);
        assert_eq!(blue_value(10), 150);
    }

    #[test]
    fn test_profiles() {
        let red = get_profile(EnemyArchetype::Red);
        let orange = get_profile(EnemyArchetype::Orange);
        let blue = get_profile(EnemyArchetype::Blue);
        assert_eq!(red.base_hp, 15.0);
        assert_eq!(orange.base_hp, 40.0);
        assert!(red.vertical_factor > orange.vertical_factor);
        assert_eq!(blue.size, ENEMY_SIZE * 1.5);
    }

    #[test]
    fn test_no_zigzag_below_level_ten() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let roll = roll_spawn(&mut rng, 9);
            assert!(!roll.zigzag);
            assert_ne!(roll.archetype, EnemyArchetype::Blue);
        }
    }

    #[test]
    fn test_zigzag_appears_from_level_ten() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let zigzags = (0..1000).filter(|_| roll_spawn(&mut rng, 10).zigzag).count();
        assert!(zigzags > 200 && zigzags < 400, "expected ~30% zigzag, got {zigzags}");
    }

    #[test]
    fn test_roll_velocity_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let red = get_profile(EnemyArchetype::Red);
        for _ in 0..500 {
            let (vx, vy) = roll_velocity(&mut rng, &red);
            assert!(vx.abs() <= 1.5);
            assert!((1.5..4.5).contains(&vy));
        }
    }
}
