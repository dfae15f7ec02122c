//! Rendering module
//!
//! The simulation never draws. Each display frame the driver captures a
//! [`Frame`] snapshot and hands it to a [`Surface`].

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{BirdSprite, Frame, ParticleSprite, PipeSprite, Surface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
