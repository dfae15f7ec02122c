//! Chaos Flap - a side-scrolling arcade game with chaos modifiers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `renderer`: Frame snapshots and drawing surfaces
//! - `persistence`: Key-value storage for the best score and settings
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use persistence::{BestScore, KeyValueStore, MemoryStore, StoreError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the game is tuned in 60 Hz frames)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default playfield dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
}

/// Wrap a hue in degrees to [0, 360)
#[inline]
pub fn wrap_hue(hue: f32) -> f32 {
    hue.rem_euclid(360.0)
}
