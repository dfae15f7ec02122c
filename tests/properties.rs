//! Property tests for the simulation invariants

use chaos_flap::persistence::{BestScore, KeyValueStore, MemoryStore};
use chaos_flap::sim::{Bird, GamePhase, Pipe, PipeField, Simulation, score_passes};
use chaos_flap::Tuning;
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn new_sim(seed: u64) -> Simulation {
    Simulation::new(seed, Tuning::default(), Box::new(MemoryStore::new()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn velocity_gains_exactly_the_effective_gravity(
        seed in any::<u64>(),
        ticks in 1usize..600,
        jump_every in 8usize..40,
    ) {
        let mut sim = new_sim(seed);
        for i in 0..ticks {
            if i % jump_every == 0 {
                sim.activate();
            }
            if !sim.is_running() {
                break;
            }
            let before = sim.state.bird.vel_y;
            sim.tick();
            if sim.is_running() {
                let gravity = sim.state.params.gravity.current;
                prop_assert_eq!(sim.state.bird.vel_y, before + gravity);
            }
        }
    }

    #[test]
    fn spawned_gaps_respect_range_and_margins(
        seed in any::<u64>(),
        height in 100.0f32..1400.0,
        min_gap in 40.0f32..150.0,
        extra_gap in 0.0f32..120.0,
    ) {
        let tuning = Tuning {
            screen_height: height,
            min_gap,
            max_gap: min_gap + extra_gap,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut field = PipeField::default();
        for _ in 0..20 {
            let pipe = field.spawn(&tuning, &mut rng).clone();
            prop_assert!(pipe.gap() >= tuning.min_gap - 1e-3);
            prop_assert!(pipe.gap() <= tuning.max_gap + 1e-3);
            prop_assert!(pipe.top >= tuning.spawn_top_margin);
            let room = height - tuning.spawn_top_margin - tuning.spawn_bottom_margin;
            if room >= tuning.max_gap {
                prop_assert!(pipe.bottom <= height - tuning.spawn_bottom_margin + 1e-2);
            }
        }
    }

    #[test]
    fn each_pipe_scores_at_most_once(xs in prop::collection::vec(-60.0f32..200.0, 0..12)) {
        let mut bird = Bird::new(&Tuning::default());
        bird.pos = Vec2::new(50.0, 300.0);
        let mut pipes: Vec<Pipe> = xs
            .iter()
            .map(|&x| Pipe { x, top: 250.0, bottom: 350.0, vy: 0.0, hue: 0.0, passed: false })
            .collect();

        let expected = xs.iter().filter(|&&x| x + 40.0 < 50.0).count() as u64;
        prop_assert_eq!(score_passes(&bird, &mut pipes, 40.0), expected);
        prop_assert_eq!(score_passes(&bird, &mut pipes, 40.0), 0);
    }

    #[test]
    fn best_score_only_grows(score in 0u64..1000, best in 0u64..1000) {
        let mut store = MemoryStore::new();
        store.set(BestScore::STORAGE_KEY, &best.to_string()).unwrap();
        let mut sim = Simulation::new(1, Tuning::default(), Box::new(store));
        sim.state.score = score;
        sim.trigger_game_over();

        let stored = sim.store_mut().get(BestScore::STORAGE_KEY).unwrap();
        prop_assert_eq!(stored, Some(score.max(best).to_string()));
        prop_assert_eq!(sim.state.best_score, score.max(best));
    }

    #[test]
    fn reset_always_restores_initial_run(seed in any::<u64>(), ticks in 0usize..800) {
        let mut sim = new_sim(seed);
        for i in 0..ticks {
            if i % 17 == 0 {
                sim.activate();
            }
            sim.tick();
        }
        sim.reset();

        prop_assert_eq!(sim.phase(), GamePhase::Running);
        prop_assert_eq!(sim.state.score, 0);
        prop_assert_eq!(sim.state.bird.pos, Vec2::new(50.0, 300.0));
        prop_assert_eq!(sim.state.bird.vel_y, 0.0);
        prop_assert_eq!(sim.state.bird.size, 20.0);
        prop_assert!(sim.state.pipes.is_empty());
        prop_assert!(sim.state.particles.is_empty());
        prop_assert!(!sim.state.chaos.is_active());
    }
}
