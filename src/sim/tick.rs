//! Per-frame simulation tick and the run state machine
//!
//! [`Simulation`] owns the game state, the tuning, the shared RNG stream and
//! the best-score store. A tick always advances the presentational state and
//! the chaos controller; the world itself only moves while running.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::chaos::ChaosTransition;
use super::collision::{bird_out_of_bounds, first_pipe_hit, score_passes};
use super::obstacles::ramp_speed;
use super::state::{GameEvent, GamePhase, GameState};
use crate::persistence::{BestScore, KeyValueStore};
use crate::tuning::Tuning;

/// Input commands for a single tick
///
/// Raw device events are OR-ed in with [`TickInput::merge`], so any number of
/// activations within one frame collapse into a single effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump while running, restart after game over (space/click/tap)
    pub activate: bool,
    /// Restart after game over only (enter)
    pub restart: bool,
}

impl TickInput {
    pub fn merge(&mut self, other: TickInput) {
        self.activate |= other.activate;
        self.restart |= other.restart;
    }

    pub fn is_empty(&self) -> bool {
        !self.activate && !self.restart
    }
}

/// The game simulation: state machine over Running / GameOver
pub struct Simulation<R = Pcg32> {
    pub state: GameState,
    tuning: Tuning,
    rng: R,
    best: BestScore,
    events: Vec<GameEvent>,
}

impl Simulation<Pcg32> {
    /// New run with a seeded PCG stream
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        log::info!("Simulation seeded with {}", seed);
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning, store)
    }
}

impl<R: Rng> Simulation<R> {
    /// New run drawing randomness from `rng`
    pub fn with_rng(rng: R, tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        let tuning = tuning.normalized();
        let mut sim = Self {
            state: GameState::new(&tuning),
            tuning,
            rng,
            best: BestScore::new(store),
            events: Vec::new(),
        };
        sim.reset();
        sim.events.clear();
        sim
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Events recorded by the most recent `step` or `tick`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Store shared with the best score (settings live there too)
    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.best.store_mut()
    }

    /// Apply one frame's merged input, then tick
    pub fn step(&mut self, input: &TickInput) {
        self.events.clear();
        if input.activate {
            self.activate();
        } else if input.restart {
            self.restart();
        }
        self.advance();
    }

    /// Jump while running; restart after game over
    pub fn activate(&mut self) {
        match self.state.phase {
            GamePhase::Running => {
                self.state.bird.jump(self.tuning.jump_strength);
                self.events.push(GameEvent::Jumped);
            }
            GamePhase::GameOver => self.reset(),
        }
    }

    /// Restart, honored only after game over
    pub fn restart(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            self.reset();
        }
    }

    /// Rebuild the run from scratch and reload the persisted best score
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.tuning);
        self.state.best_score = self.best.load();
        self.events.push(GameEvent::Restarted);
        log::info!("Run started (best {})", self.state.best_score);
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self) {
        self.events.clear();
        self.advance();
    }

    /// One frame of simulation, appending to the current event batch
    fn advance(&mut self) {
        let tuning = &self.tuning;
        let state = &mut self.state;

        state.time_ticks += 1;
        state.background_hue = crate::wrap_hue(state.background_hue + tuning.background_hue_step);
        state.bird.animate(tuning.bird_hue_step, tuning.pulse_step);
        state.tilt.tick(tuning.tilt_step, tuning.max_tilt);
        state.shake.tick();
        state.particles.update(tuning.particle_fade);

        // Chaos keeps its own clock, even after game over
        match state.chaos.tick(&mut state.params, tuning, &mut self.rng) {
            Some(ChaosTransition::Started(effect)) => {
                self.events.push(GameEvent::ChaosStarted(effect))
            }
            Some(ChaosTransition::Ended(_)) => self.events.push(GameEvent::ChaosEnded),
            None => {}
        }

        if state.phase == GamePhase::GameOver {
            return;
        }

        state.bird.integrate(state.params.gravity.current);
        let center = state.bird.center();
        state.particles.emit(center, state.bird.hue, &mut self.rng);

        ramp_speed(&mut state.params.speed, tuning);
        if state.pipes.tick_spawn_timer(tuning.spawn_interval) {
            state.pipes.spawn(tuning, &mut self.rng);
            self.events.push(GameEvent::Spawned);
        }
        state.pipes.advance(state.params.speed.current, tuning);
        state.pipes.prune(tuning.pipe_width);

        let crashed = bird_out_of_bounds(&state.bird, tuning.screen_height)
            || first_pipe_hit(&state.bird, state.pipes.as_slice(), tuning.pipe_width).is_some();
        if crashed {
            self.trigger_game_over();
        }

        // Passes still count on the frame the run ends
        let (tuning, state) = (&self.tuning, &mut self.state);
        let passed = score_passes(&state.bird, state.pipes.as_mut_slice(), tuning.pipe_width);
        if passed > 0 {
            state.score += passed;
            self.events.push(GameEvent::Scored { score: state.score });
        }
    }

    /// End the run (no-op if already over)
    pub fn trigger_game_over(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        let state = &mut self.state;
        state.phase = GamePhase::GameOver;
        state
            .shake
            .trigger(self.tuning.shake_intensity, self.tuning.shake_duration);
        if state.chaos.cancel(&mut state.params).is_some() {
            self.events.push(GameEvent::ChaosEnded);
        }

        let new_best = state.score > state.best_score;
        if new_best {
            state.best_score = state.score;
            self.best.save(state.score);
        }
        log::info!(
            "Game over: score {} (best {}{})",
            state.score,
            state.best_score,
            if new_best { ", new best" } else { "" }
        );
        self.events.push(GameEvent::GameOver {
            score: state.score,
            new_best,
        });
    }

    /// Jittered camera offset for this frame, drawn from the shared stream
    pub fn sample_shake_offset(&mut self) -> Vec2 {
        self.state.shake.sample_offset(&mut self.rng)
    }
}
