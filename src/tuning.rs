//! Data-driven game balance
//!
//! Every gameplay constant lives here so runs can be re-tuned from JSON
//! without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Gameplay tuning (units are pixels and 60 Hz frames)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Bird ===
    /// Fixed horizontal position of the bird's left edge
    pub bird_x: f32,
    /// Base (collision) size, square
    pub bird_size: f32,
    pub bird_start_hue: f32,
    /// Velocity set by a jump (negative is up)
    pub jump_strength: f32,
    pub base_gravity: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    /// Minimum top span height at spawn
    pub spawn_top_margin: f32,
    /// Minimum bottom span height at spawn
    pub spawn_bottom_margin: f32,
    /// Soft margin the pipes bounce off while oscillating
    pub bounce_margin: f32,
    pub pipe_vertical_speed: f32,
    /// Ticks between spawns
    pub spawn_interval: u32,
    pub base_speed: f32,
    pub max_speed: f32,
    /// Added to the current speed every running tick
    pub speed_ramp: f32,

    // === Chaos ===
    /// Idle ticks between chaos events
    pub chaos_interval: u32,
    /// Ticks a chaos event stays active
    pub chaos_duration: u32,
    pub chaos_slow_multiplier: f32,
    pub chaos_fast_multiplier: f32,
    pub chaos_gravity_inverted: f32,
    pub chaos_gravity_heavy: f32,

    // === Effects ===
    pub shake_intensity: f32,
    pub shake_duration: u32,
    /// Maximum canvas tilt (radians)
    pub max_tilt: f32,
    pub tilt_step: f32,
    /// Alpha lost per tick
    pub particle_fade: f32,
    pub background_hue_step: f32,
    pub bird_hue_step: f32,
    pub pulse_step: f32,
    /// Render size swing as a fraction of the base size
    pub pulse_amplitude: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            bird_x: 50.0,
            bird_size: 20.0,
            bird_start_hue: 120.0,
            jump_strength: -6.0,
            base_gravity: 0.3,

            pipe_width: 40.0,
            min_gap: 85.0,
            max_gap: 160.0,
            spawn_top_margin: 50.0,
            spawn_bottom_margin: 50.0,
            bounce_margin: 20.0,
            pipe_vertical_speed: 0.7,
            spawn_interval: 100,
            base_speed: 2.0,
            max_speed: 5.0,
            speed_ramp: 0.001,

            chaos_interval: 300,
            chaos_duration: 120,
            chaos_slow_multiplier: 0.6,
            chaos_fast_multiplier: 1.8,
            chaos_gravity_inverted: -1.0,
            chaos_gravity_heavy: 2.0,

            shake_intensity: 15.0,
            shake_duration: 60,
            max_tilt: 0.07,
            tilt_step: 0.001,
            particle_fade: 0.02,
            background_hue_step: 1.0,
            bird_hue_step: 2.0,
            pulse_step: 0.1,
            pulse_amplitude: 0.1,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::normalized)
    }

    /// Repair values that would make spawning degenerate
    ///
    /// Inverted gap ranges are swapped and sizes are kept non-negative. A
    /// playfield smaller than the margins is still allowed: spawning clamps
    /// the random span to zero instead.
    pub fn normalized(mut self) -> Self {
        if self.min_gap > self.max_gap {
            std::mem::swap(&mut self.min_gap, &mut self.max_gap);
        }
        self.min_gap = self.min_gap.max(0.0);
        self.max_gap = self.max_gap.max(self.min_gap);
        self.screen_width = self.screen_width.max(0.0);
        self.screen_height = self.screen_height.max(0.0);
        self.bird_size = self.bird_size.max(0.0);
        self.pipe_width = self.pipe_width.max(0.0);
        self.spawn_top_margin = self.spawn_top_margin.max(0.0);
        self.spawn_bottom_margin = self.spawn_bottom_margin.max(0.0);
        self.max_tilt = self.max_tilt.abs();
        self.spawn_interval = self.spawn_interval.max(1);
        self
    }
}
