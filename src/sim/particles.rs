//! Decaying particle trail emitted by the bird
//!
//! Purely visual: particles keep fading after game over and never affect play.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub hue: f32,
    /// 1.0 at birth, removed once it reaches 0
    pub alpha: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Emit one particle with random size (1..4) and drift (±1 per axis)
    pub fn emit<R: Rng>(&mut self, pos: Vec2, hue: f32, rng: &mut R) {
        let size = rng.random::<f32>() * 3.0 + 1.0;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0,
            (rng.random::<f32>() - 0.5) * 2.0,
        );
        self.particles.push(Particle {
            pos,
            vel,
            size,
            hue,
            alpha: 1.0,
        });
    }

    /// Move and fade every particle, then drop the invisible ones
    pub fn update(&mut self, fade: f32) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.alpha -= fade;
        }
        self.particles.retain(|p| p.alpha > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_emit_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ParticleField::default();
        for _ in 0..200 {
            field.emit(Vec2::new(60.0, 310.0), 42.0, &mut rng);
        }
        for p in field.iter() {
            assert!((1.0..=4.0).contains(&p.size));
            assert!(p.vel.x.abs() <= 1.0 && p.vel.y.abs() <= 1.0);
            assert_eq!(p.alpha, 1.0);
            assert_eq!(p.hue, 42.0);
        }
    }

    #[test]
    fn test_particles_fade_out() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ParticleField::default();
        field.emit(Vec2::ZERO, 0.0, &mut rng);

        // 1.0 - 0.02 * n stays positive for 49 ticks, then hits (about) zero
        for _ in 0..49 {
            field.update(0.02);
        }
        assert_eq!(field.len(), 1);
        field.update(0.02);
        field.update(0.02);
        assert!(field.is_empty());
    }

    #[test]
    fn test_update_moves_by_velocity() {
        let mut field = ParticleField::default();
        field.particles.push(Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(0.5, -0.5),
            size: 2.0,
            hue: 0.0,
            alpha: 1.0,
        });
        field.update(0.02);
        let p = field.iter().next().unwrap();
        assert_eq!(p.pos, Vec2::new(10.5, 9.5));
        assert!((p.alpha - 0.98).abs() < 1e-6);
    }
}
