//! Session-wide properties checked over random seeds and input sequences.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::compute::*;
use space_shooter::entities::*;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(left, right, fire)| TickInput { left, right, fire })
}

proptest! {
    #[test]
    fn session_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..400),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = new_session(&mut rng);

        for input in &inputs {
            let next = tick(&state, input, &mut rng);

            if state.status == GameStatus::GameOver {
                prop_assert_eq!(&next, &state);
            }
            if next.status == GameStatus::Playing {
                prop_assert_eq!(next.enemies.len(), ENEMY_COUNT);
            }
            prop_assert!(next.score >= state.score);
            prop_assert!(next.score - state.score <= state.bullets.len() as u32 + 1);
            prop_assert_eq!(next.level, 1 + next.score / MILESTONE);
            prop_assert!(next.bullet_speed >= state.bullet_speed);
            prop_assert!(next.cooldown >= MIN_COOLDOWN);
            prop_assert!(next.cooldown <= state.cooldown);
            prop_assert!(next.cooldown_timer <= state.cooldown.max(state.cooldown_timer));
            prop_assert!(next.player.x >= 0 && next.player.x <= WORLD_WIDTH - PLAYER_SIZE);
            prop_assert!(next.bullets.iter().all(|b| b.y > 0));

            state = next;
        }
    }

    #[test]
    fn shot_only_fires_on_zero_timer(timer in 0u32..30, cooldown in 5u32..=20) {
        let mut state = new_session(&mut StdRng::seed_from_u64(1));
        state.cooldown_timer = timer;
        state.cooldown = cooldown;

        let fired = player_shoot(&state);
        if timer == 0 {
            prop_assert_eq!(fired.bullets.len(), 1);
            prop_assert_eq!(fired.cooldown_timer, cooldown);
        } else {
            prop_assert!(fired.bullets.is_empty());
            prop_assert_eq!(fired.cooldown_timer, timer);
        }
    }

    #[test]
    fn difficulty_never_lowers_speeds(rounds in 1usize..40) {
        let mut state = new_session(&mut StdRng::seed_from_u64(9));
        for _ in 0..rounds {
            let next = increase_difficulty(&state);
            prop_assert_eq!(next.level, state.level + 1);
            prop_assert_eq!(next.bullet_speed, state.bullet_speed + 1);
            prop_assert!(next.cooldown >= MIN_COOLDOWN);
            for (a, b) in state.enemies.iter().zip(&next.enemies) {
                prop_assert_eq!(b.speed, a.speed + 1);
            }
            state = next;
        }
    }
}
