//! Read-only frame snapshot handed to a drawing surface

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{ChaosKind, ScreenShake, Simulation};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BirdSprite {
    /// Top-left of the pulsed square (kept centered on the base square)
    pub pos: Vec2,
    pub size: f32,
    pub hue: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub size: f32,
    pub hue: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PipeSprite {
    pub x: f32,
    pub width: f32,
    /// Height of the top span
    pub top: f32,
    /// Y where the bottom span starts
    pub bottom: f32,
    pub hue: f32,
}

/// Everything a surface needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub background_hue: f32,
    /// Canvas tilt in radians (0 when tilt is disabled)
    pub rotation: f32,
    pub shake: ScreenShake,
    /// Jitter for this frame (zero when shake is off or disabled)
    pub shake_offset: Vec2,
    pub bird: BirdSprite,
    pub particles: Vec<ParticleSprite>,
    pub pipes: Vec<PipeSprite>,
    pub score: u64,
    pub best_score: u64,
    pub game_over: bool,
    pub chaos: Option<ChaosKind>,
}

impl Frame {
    /// Snapshot the simulation, sampling this frame's shake jitter
    pub fn capture<R: Rng>(sim: &mut Simulation<R>, settings: &Settings) -> Self {
        let shake_offset = if settings.effective_screen_shake() {
            sim.sample_shake_offset()
        } else {
            Vec2::ZERO
        };

        let tuning = sim.tuning();
        let state = &sim.state;

        let base = state.bird.size;
        let size = if settings.bird_pulse {
            state.bird.pulsed_size(tuning.pulse_amplitude)
        } else {
            base
        };
        let bird = BirdSprite {
            pos: state.bird.pos - Vec2::splat((size - base) / 2.0),
            size,
            hue: state.bird.hue,
        };

        let particles = if settings.particles {
            state
                .particles
                .iter()
                .map(|p| ParticleSprite {
                    pos: p.pos,
                    size: p.size,
                    hue: p.hue,
                    alpha: p.alpha,
                })
                .collect()
        } else {
            Vec::new()
        };

        let pipes = state
            .pipes
            .as_slice()
            .iter()
            .map(|p| PipeSprite {
                x: p.x,
                width: tuning.pipe_width,
                top: p.top,
                bottom: p.bottom,
                hue: p.hue,
            })
            .collect();

        Self {
            width: tuning.screen_width,
            height: tuning.screen_height,
            background_hue: state.background_hue,
            rotation: if settings.effective_tilt() {
                state.tilt.angle
            } else {
                0.0
            },
            shake: state.shake,
            shake_offset,
            bird,
            particles,
            pipes,
            score: state.score,
            best_score: state.best_score,
            game_over: !state.is_running(),
            chaos: state.chaos.kind(),
        }
    }
}

/// A drawing target that consumes frames
pub trait Surface {
    fn draw(&mut self, frame: &Frame);
}
