//! # flowfield - Flow Field Particle Effect
//!
//! A thousand particles drift along a static grid of angles, each leaving a
//! trail that grows, shrinks, and respawns somewhere new.
//!
//! ## Quick Start
//!
//! ```ignore
//! use flowfield::App;
//!
//! fn main() -> Result<(), flowfield::AppError> {
//!     App::new().run()
//! }
//! ```
//!
//! ## Headless Use
//!
//! The simulation only needs something implementing [`Surface`]:
//!
//! ```ignore
//! use flowfield::{CommandRecorder, ParticleSystem};
//!
//! let mut system = ParticleSystem::new(300.0, 300.0);
//! let mut recorder = CommandRecorder::new();
//! system.frame(&mut recorder);
//! assert_eq!(recorder.stroke_count(), 1000);
//! ```
//!
//! ## Core Concepts
//!
//! - [`FlowField`]: `floor(h / 30) x floor(w / 30)` cells, each holding
//!   `(cos(x * zoom) + sin(y * zoom)) * curve`.
//! - [`Particle`]: moves along its cell's angle at a fixed speed of 1-5
//!   units per tick; its trail is a bounded FIFO of past positions. See
//!   [`Phase`] for the grow/shrink/reset cycle.
//! - [`ParticleSystem`]: owns the field and the particles, and rebuilds
//!   both on resize.

mod app;
pub mod config;
mod error;
pub mod flow_field;
mod gpu;
pub mod palette;
pub mod particle;
pub mod surface;
mod system;
pub mod time;

pub use app::App;
pub use config::FlowConfig;
pub use error::{AppError, GpuError};
pub use flow_field::FlowField;
pub use glam::{Vec2, Vec4};
pub use palette::Palette;
pub use particle::{Bounds, Particle, Phase};
pub use surface::{CommandRecorder, DrawCommand, LineBatch, LineVertex, Surface};
pub use system::ParticleSystem;
pub use time::Time;
