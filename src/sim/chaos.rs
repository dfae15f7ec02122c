//! Timed chaos modifiers
//!
//! Every `chaos_interval` idle ticks one modifier kicks in for
//! `chaos_duration` ticks, bending either pipe speed or gravity. When it ends
//! (or is cancelled) the bent parameter goes back to its base constant, not
//! to whatever the speed ramp would have produced meanwhile.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Tunable, WorldParams};
use crate::tuning::Tuning;

/// Which parameter a chaos event bends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaosKind {
    SpeedChange,
    GravityChange,
}

/// A chaos modifier and its payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChaosEffect {
    /// Pipe speed becomes `base * multiplier`
    SpeedChange { multiplier: f32 },
    /// Gravity becomes `base * factor`
    GravityChange { factor: f32 },
}

impl ChaosEffect {
    pub fn kind(&self) -> ChaosKind {
        match self {
            ChaosEffect::SpeedChange { .. } => ChaosKind::SpeedChange,
            ChaosEffect::GravityChange { .. } => ChaosKind::GravityChange,
        }
    }

    /// Pick a kind, then one of its two variants, uniformly
    pub fn random<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            let multiplier = if rng.random_bool(0.5) {
                tuning.chaos_slow_multiplier
            } else {
                tuning.chaos_fast_multiplier
            };
            ChaosEffect::SpeedChange { multiplier }
        } else {
            let factor = if rng.random_bool(0.5) {
                tuning.chaos_gravity_inverted
            } else {
                tuning.chaos_gravity_heavy
            };
            ChaosEffect::GravityChange { factor }
        }
    }

    fn target<'a>(&self, params: &'a mut WorldParams) -> &'a mut Tunable {
        match self {
            ChaosEffect::SpeedChange { .. } => &mut params.speed,
            ChaosEffect::GravityChange { .. } => &mut params.gravity,
        }
    }

    fn scale(&self) -> f32 {
        match *self {
            ChaosEffect::SpeedChange { multiplier } => multiplier,
            ChaosEffect::GravityChange { factor } => factor,
        }
    }
}

/// An active chaos event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaosEvent {
    pub effect: ChaosEffect,
    /// Ticks left before the event ends
    pub remaining: u32,
    /// Value the bent parameter is restored to
    pub revert_to: f32,
}

impl ChaosEvent {
    fn apply(effect: ChaosEffect, duration: u32, params: &mut WorldParams) -> Self {
        let target = effect.target(params);
        let revert_to = target.base;
        target.current = target.base * effect.scale();
        Self {
            effect,
            remaining: duration,
            revert_to,
        }
    }

    fn revert(&self, params: &mut WorldParams) {
        self.effect.target(params).current = self.revert_to;
    }
}

/// Outcome of a controller tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChaosTransition {
    Started(ChaosEffect),
    Ended(ChaosKind),
}

/// Idle timer plus at most one active event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChaosController {
    /// Idle ticks counted toward the next event
    pub timer: u32,
    pub active: Option<ChaosEvent>,
}

impl ChaosController {
    /// Advance one tick: count down the active event, or count up to the next one
    pub fn tick<R: Rng>(
        &mut self,
        params: &mut WorldParams,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<ChaosTransition> {
        if let Some(event) = self.active.as_mut() {
            event.remaining = event.remaining.saturating_sub(1);
            if event.remaining == 0 {
                return self.cancel(params).map(ChaosTransition::Ended);
            }
            return None;
        }

        self.timer += 1;
        if self.timer >= tuning.chaos_interval {
            self.timer = 0;
            let effect = ChaosEffect::random(tuning, rng);
            self.start(effect, tuning.chaos_duration, params);
            return Some(ChaosTransition::Started(effect));
        }
        None
    }

    /// Start `effect`, ending any event already running first
    pub fn start(&mut self, effect: ChaosEffect, duration: u32, params: &mut WorldParams) {
        self.cancel(params);
        if duration == 0 {
            return;
        }
        self.active = Some(ChaosEvent::apply(effect, duration, params));
        log::info!("Chaos started: {:?} for {} ticks", effect, duration);
    }

    /// End the active event, restoring its parameter; returns what ended
    pub fn cancel(&mut self, params: &mut WorldParams) -> Option<ChaosKind> {
        let event = self.active.take()?;
        event.revert(params);
        log::info!("Chaos ended: {:?}", event.effect.kind());
        Some(event.effect.kind())
    }

    pub fn kind(&self) -> Option<ChaosKind> {
        self.active.map(|e| e.effect.kind())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_event_starts_on_interval() {
        let tuning = Tuning::default();
        let mut params = WorldParams::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut chaos = ChaosController::default();

        for _ in 0..tuning.chaos_interval - 1 {
            assert_eq!(chaos.tick(&mut params, &tuning, &mut rng), None);
        }
        let started = chaos.tick(&mut params, &tuning, &mut rng);
        assert!(matches!(started, Some(ChaosTransition::Started(_))));
        assert_eq!(chaos.timer, 0);
        assert_eq!(chaos.active.unwrap().remaining, tuning.chaos_duration);
    }

    #[test]
    fn test_speed_change_scales_base_and_restores_base() {
        let tuning = Tuning::default();
        let mut params = WorldParams::new(&tuning);
        let mut chaos = ChaosController::default();

        chaos.start(
            ChaosEffect::SpeedChange { multiplier: 1.8 },
            tuning.chaos_duration,
            &mut params,
        );
        assert_eq!(params.speed.current, tuning.base_speed * 1.8);

        // Ramp drift while active is discarded on revert
        params.speed.current += 0.05;
        let mut rng = Pcg32::seed_from_u64(0);
        let mut ended = None;
        for _ in 0..tuning.chaos_duration {
            ended = chaos.tick(&mut params, &tuning, &mut rng);
        }
        assert_eq!(ended, Some(ChaosTransition::Ended(ChaosKind::SpeedChange)));
        assert_eq!(params.speed.current, tuning.base_speed);
        assert!(!chaos.is_active());
    }

    #[test]
    fn test_gravity_change_and_cancel() {
        let tuning = Tuning::default();
        let mut params = WorldParams::new(&tuning);
        let mut chaos = ChaosController::default();

        chaos.start(ChaosEffect::GravityChange { factor: -1.0 }, 120, &mut params);
        assert_eq!(params.gravity.current, -tuning.base_gravity);
        assert_eq!(chaos.kind(), Some(ChaosKind::GravityChange));

        assert_eq!(chaos.cancel(&mut params), Some(ChaosKind::GravityChange));
        assert_eq!(params.gravity.current, tuning.base_gravity);
        assert_eq!(chaos.cancel(&mut params), None);
    }

    #[test]
    fn test_idle_timer_paused_while_active() {
        let tuning = Tuning::default();
        let mut params = WorldParams::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut chaos = ChaosController::default();
        chaos.start(ChaosEffect::GravityChange { factor: 2.0 }, 10, &mut params);
        for _ in 0..5 {
            chaos.tick(&mut params, &tuning, &mut rng);
        }
        assert_eq!(chaos.timer, 0);
        assert_eq!(chaos.active.unwrap().remaining, 5);
    }

    #[test]
    fn test_random_effects_use_configured_values() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(77);
        let mut seen_speed = false;
        let mut seen_gravity = false;
        for _ in 0..200 {
            match ChaosEffect::random(&tuning, &mut rng) {
                ChaosEffect::SpeedChange { multiplier } => {
                    seen_speed = true;
                    assert!(multiplier == 0.6 || multiplier == 1.8);
                }
                ChaosEffect::GravityChange { factor } => {
                    seen_gravity = true;
                    assert!(factor == -1.0 || factor == 2.0);
                }
            }
        }
        assert!(seen_speed && seen_gravity);
    }
}
