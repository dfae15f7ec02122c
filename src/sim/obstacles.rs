//! Pipe spawning, scrolling and vertical oscillation
//!
//! Pipes are kept in spawn order, which is also left-to-right screen order
//! since every pipe scrolls at the same speed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Tunable;
use crate::tuning::Tuning;

/// A top/bottom pipe pair with a gap between `top` and `bottom`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Height of the top span (the gap starts here)
    pub top: f32,
    /// Y where the bottom span starts (the gap ends here)
    pub bottom: f32,
    /// Vertical oscillation velocity
    pub vy: f32,
    pub hue: f32,
    /// Set once the bird has been credited for this pipe
    pub passed: bool,
}

impl Pipe {
    pub fn gap(&self) -> f32 {
        self.bottom - self.top
    }

    /// Right edge
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipeField {
    pipes: Vec<Pipe>,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
}

impl PipeField {
    /// Count one tick toward the next spawn; true when a spawn is due
    pub fn tick_spawn_timer(&mut self, interval: u32) -> bool {
        self.spawn_timer += 1;
        if self.spawn_timer >= interval {
            self.spawn_timer = 0;
            true
        } else {
            false
        }
    }

    /// Spawn a pipe at the right screen edge
    ///
    /// The gap is drawn from [min_gap, max_gap] and the top span is placed so
    /// both margins hold. A playfield too small for the margins collapses the
    /// random span to zero instead of going negative.
    pub fn spawn<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) -> &Pipe {
        let gap_span = (tuning.max_gap - tuning.min_gap).max(0.0);
        let gap = tuning.min_gap + rng.random::<f32>() * gap_span;

        let free = (tuning.screen_height
            - gap
            - tuning.spawn_top_margin
            - tuning.spawn_bottom_margin)
            .max(0.0);
        let top = tuning.spawn_top_margin + rng.random::<f32>() * free;

        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let hue = rng.random::<f32>() * 360.0;

        self.pipes.push(Pipe {
            x: tuning.screen_width,
            top,
            bottom: top + gap,
            vy: direction * tuning.pipe_vertical_speed,
            hue: crate::wrap_hue(hue),
            passed: false,
        });
        log::debug!("Spawned pipe: top={:.1} gap={:.1}", top, gap);

        &self.pipes[self.pipes.len() - 1]
    }

    /// Scroll left and oscillate
    ///
    /// A pipe flips direction once it is past the soft margin, so it may
    /// overshoot by up to one tick of `vy`.
    pub fn advance(&mut self, speed: f32, tuning: &Tuning) {
        let lower = tuning.bounce_margin;
        let upper = tuning.screen_height - tuning.bounce_margin;
        for pipe in &mut self.pipes {
            pipe.x -= speed;
            pipe.top += pipe.vy;
            pipe.bottom += pipe.vy;
            if pipe.top < lower || pipe.bottom > upper {
                pipe.vy = -pipe.vy;
            }
        }
    }

    /// Drop pipes that are fully off the left edge
    pub fn prune(&mut self, width: f32) {
        self.pipes.retain(|p| p.trailing_edge(width) > 0.0);
    }

    pub fn clear(&mut self) {
        self.pipes.clear();
        self.spawn_timer = 0;
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn as_slice(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn as_mut_slice(&mut self) -> &mut [Pipe] {
        &mut self.pipes
    }

    /// Insert a pipe directly (scripted setups and tests)
    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push(pipe);
    }
}

/// Ramp the in-effect speed toward the ceiling, chaos event or not
pub fn ramp_speed(speed: &mut Tunable, tuning: &Tuning) {
    speed.current = (speed.current + tuning.speed_ramp).min(tuning.max_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pipe_at(x: f32, top: f32, bottom: f32, vy: f32) -> Pipe {
        Pipe {
            x,
            top,
            bottom,
            vy,
            hue: 0.0,
            passed: false,
        }
    }

    #[test]
    fn test_spawn_timer_fires_on_interval() {
        let mut field = PipeField::default();
        for _ in 0..99 {
            assert!(!field.tick_spawn_timer(100));
        }
        assert!(field.tick_spawn_timer(100));
        assert_eq!(field.spawn_timer, 0);
    }

    #[test]
    fn test_spawn_respects_gap_and_margins() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut field = PipeField::default();
        for _ in 0..500 {
            let pipe = field.spawn(&tuning, &mut rng).clone();
            assert_eq!(pipe.x, tuning.screen_width);
            assert!(pipe.gap() >= tuning.min_gap - 1e-3 && pipe.gap() <= tuning.max_gap + 1e-3);
            assert!(pipe.top >= tuning.spawn_top_margin);
            assert!(pipe.bottom <= tuning.screen_height - tuning.spawn_bottom_margin + 1e-3);
            assert_eq!(pipe.vy.abs(), tuning.pipe_vertical_speed);
            assert!((0.0..360.0).contains(&pipe.hue));
            assert!(!pipe.passed);
        }
    }

    #[test]
    fn test_spawn_on_tiny_screen_never_goes_negative() {
        let tuning = Tuning {
            screen_height: 120.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = PipeField::default();
        for _ in 0..50 {
            let pipe = field.spawn(&tuning, &mut rng).clone();
            assert_eq!(pipe.top, tuning.spawn_top_margin);
            assert!(pipe.gap() >= tuning.min_gap);
        }
    }

    #[test]
    fn test_advance_scrolls_and_bounces() {
        let tuning = Tuning::default();
        let mut field = PipeField::default();
        field.push(pipe_at(200.0, 20.5, 120.5, -0.7));
        field.advance(2.0, &tuning);

        let pipe = &field.as_slice()[0];
        assert_eq!(pipe.x, 198.0);
        // Overshoots the margin by less than one tick, then turns around
        assert!(pipe.top < tuning.bounce_margin);
        assert_eq!(pipe.vy, 0.7);
        assert!((pipe.gap() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_advance_bounces_off_bottom_margin() {
        let tuning = Tuning::default();
        let mut field = PipeField::default();
        field.push(pipe_at(200.0, 480.0, 579.8, 0.7));
        field.advance(2.0, &tuning);
        assert_eq!(field.as_slice()[0].vy, -0.7);
    }

    #[test]
    fn test_prune_drops_fully_offscreen() {
        let mut field = PipeField::default();
        field.push(pipe_at(-40.0, 100.0, 200.0, 0.0));
        field.push(pipe_at(-39.0, 100.0, 200.0, 0.0));
        field.push(pipe_at(300.0, 100.0, 200.0, 0.0));
        field.prune(40.0);
        assert_eq!(field.len(), 2);
        assert_eq!(field.as_slice()[0].x, -39.0);
    }

    #[test]
    fn test_ramp_caps_at_max() {
        let tuning = Tuning::default();
        let mut speed = Tunable::new(2.0);
        ramp_speed(&mut speed, &tuning);
        assert!((speed.current - 2.001).abs() < 1e-6);
        assert_eq!(speed.base, 2.0);

        speed.current = 4.9995;
        ramp_speed(&mut speed, &tuning);
        assert_eq!(speed.current, tuning.max_speed);
    }
}
