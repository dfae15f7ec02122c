//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only, a single shared stream
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies

pub mod chaos;
pub mod collision;
pub mod effects;
pub mod obstacles;
pub mod particles;
pub mod state;
pub mod tick;

pub use chaos::{ChaosController, ChaosEffect, ChaosEvent, ChaosKind};
pub use collision::{bird_hits_pipe, bird_out_of_bounds, first_pipe_hit, score_passes};
pub use effects::{ScreenShake, Tilt};
pub use obstacles::{Pipe, PipeField};
pub use particles::{Particle, ParticleField};
pub use state::{Bird, GameEvent, GamePhase, GameState, Tunable, WorldParams};
pub use tick::{Simulation, TickInput};
