//! Presentational state: screen shake and canvas tilt
//!
//! Computed every tick but never read by gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Screen shake with a tick countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
    /// Ticks remaining
    pub duration: u32,
}

impl ScreenShake {
    pub fn trigger(&mut self, intensity: f32, duration: u32) {
        self.intensity = intensity;
        self.duration = duration;
    }

    pub fn tick(&mut self) {
        if self.duration > 0 {
            self.duration -= 1;
            if self.duration == 0 {
                self.intensity = 0.0;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0
    }

    /// Random jitter in [-intensity/2, intensity/2) per axis, fresh per call
    pub fn sample_offset<R: Rng>(&self, rng: &mut R) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        Vec2::new(
            (rng.random::<f32>() - 0.5) * self.intensity,
            (rng.random::<f32>() - 0.5) * self.intensity,
        )
    }
}

/// Canvas tilt sweeping between -max and +max
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tilt {
    /// Radians
    pub angle: f32,
    /// +1 or -1
    pub direction: f32,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            angle: 0.0,
            direction: 1.0,
        }
    }
}

impl Tilt {
    /// Step the angle; on reaching the limit, clamp to it and turn around
    pub fn tick(&mut self, step: f32, max: f32) {
        self.angle += step * self.direction;
        if self.angle.abs() >= max {
            // Pin to the side reached, not the new heading, or the angle
            // would jump to the opposite limit in one frame
            self.angle = max.copysign(self.angle);
            self.direction = -self.direction;
        }
    }
}
