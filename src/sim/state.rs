//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; a reset simply rebuilds it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::chaos::{ChaosController, ChaosEffect};
use super::effects::{ScreenShake, Tilt};
use super::obstacles::PipeField;
use super::particles::ParticleField;
use crate::tuning::Tuning;
use crate::wrap_hue;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird is flying, world is moving
    Running,
    /// Run ended; waiting for a restart
    GameOver,
}

/// Things that happened during a step, for logging and UI feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped,
    Spawned,
    Scored { score: u64 },
    ChaosStarted(ChaosEffect),
    ChaosEnded,
    GameOver { score: u64, new_best: bool },
    Restarted,
}

/// The falling bird
///
/// `pos` is the top-left corner of the base-size square. The pulsed size is
/// render-only; collisions always use `size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub vel_y: f32,
    /// Base (collision) size
    pub size: f32,
    /// Phase of the render size pulse
    pub pulse: f32,
    pub hue: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, tuning.screen_height / 2.0),
            vel_y: 0.0,
            size: tuning.bird_size,
            pulse: 0.0,
            hue: tuning.bird_start_hue,
        }
    }

    /// Apply one tick of gravity (no clamping, bounds are a collision concern)
    pub fn integrate(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
    }

    pub fn jump(&mut self, strength: f32) {
        self.vel_y = strength;
    }

    /// Advance hue and pulse phases
    pub fn animate(&mut self, hue_step: f32, pulse_step: f32) {
        self.hue = wrap_hue(self.hue + hue_step);
        self.pulse += pulse_step;
    }

    /// Center of the base-size square
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Oscillating render size
    pub fn pulsed_size(&self, amplitude: f32) -> f32 {
        self.size * (1.0 + self.pulse.sin() * amplitude)
    }
}

/// A global knob with an unperturbed base and the value actually in effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tunable {
    pub base: f32,
    pub current: f32,
}

impl Tunable {
    pub fn new(base: f32) -> Self {
        Self {
            base,
            current: base,
        }
    }

    /// Put the base value back in effect
    pub fn restore(&mut self) {
        self.current = self.base;
    }
}

/// World parameters chaos events are allowed to bend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    /// Horizontal pipe speed (pixels per tick)
    pub speed: Tunable,
    /// Downward acceleration (pixels per tick²)
    pub gravity: Tunable,
}

impl WorldParams {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: Tunable::new(tuning.base_speed),
            gravity: Tunable::new(tuning.base_gravity),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Simulation tick counter for this run
    pub time_ticks: u64,
    pub score: u64,
    /// Persisted best, reloaded on every reset
    pub best_score: u64,
    pub bird: Bird,
    pub params: WorldParams,
    pub pipes: PipeField,
    pub chaos: ChaosController,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: ParticleField,
    pub shake: ScreenShake,
    pub tilt: Tilt,
    pub background_hue: f32,
}

impl GameState {
    /// Fresh running state
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Running,
            time_ticks: 0,
            score: 0,
            best_score: 0,
            bird: Bird::new(tuning),
            params: WorldParams::new(tuning),
            pipes: PipeField::default(),
            chaos: ChaosController::default(),
            particles: ParticleField::default(),
            shake: ScreenShake::default(),
            tilt: Tilt::default(),
            background_hue: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
