//! The particle system: one flow field plus a fixed pool of particles.

use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FlowConfig;
use crate::flow_field::FlowField;
use crate::particle::{Bounds, Particle};
use crate::surface::Surface;

/// Owns the flow field and every particle drawn on a surface.
///
/// Construction and [`resize`](Self::resize) both rebuild everything from
/// scratch; there is no incremental update of the field or the particles.
///
/// # Example
///
/// ```ignore
/// let mut system = ParticleSystem::new(1280.0, 720.0);
/// let mut batch = LineBatch::new();
///
/// // once per frame
/// system.frame(&mut batch);
/// ```
pub struct ParticleSystem<R: Rng = StdRng> {
    config: FlowConfig,
    bounds: Bounds,
    field: FlowField,
    particles: Vec<Particle>,
    rng: R,
}

impl ParticleSystem<StdRng> {
    /// Create a system for a `width` x `height` surface with the default config.
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(width, height, FlowConfig::default())
    }

    /// Create a system with a custom config, seeded from OS entropy.
    pub fn with_config(width: f32, height: f32, config: FlowConfig) -> Self {
        Self::with_rng(width, height, config, StdRng::from_entropy())
    }
}

impl<R: Rng> ParticleSystem<R> {
    /// Create a system drawing its randomness from `rng`.
    ///
    /// A seeded RNG makes the whole run reproducible.
    pub fn with_rng(width: f32, height: f32, config: FlowConfig, mut rng: R) -> Self {
        let bounds = Bounds::new(width, height, config.cell_size);
        let field = FlowField::for_surface(width, height, &config);
        let particles = spawn_particles(&bounds, &config, &mut rng);
        Self {
            config,
            bounds,
            field,
            particles,
            rng,
        }
    }

    /// Adopt a new surface size, rebuilding the field and all particles.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height, self.config.cell_size);
        self.field = FlowField::for_surface(width, height, &self.config);
        self.particles = spawn_particles(&self.bounds, &self.config, &mut self.rng);
        debug!(
            "Resized to {}x{}: {}x{} flow field, {} particles",
            width,
            height,
            self.field.cols(),
            self.field.rows(),
            self.particles.len()
        );
    }

    /// Draw then update every particle, in order.
    ///
    /// Each particle is drawn before it moves, so the frame shows the trail
    /// as it was at the start of this tick.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for particle in &mut self.particles {
            particle.draw(surface);
            particle.update(&self.field, &self.bounds, &mut self.rng);
        }
    }

    /// One full frame: clear, restore the default stroke, render.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear();
        surface.set_stroke_style(self.config.default_stroke);
        surface.set_line_width(self.config.line_width);
        self.render(surface);
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bounds.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bounds.size.y
    }

    /// Surface size as a vector.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.bounds.size
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.bounds.cell_size
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn flow_field(&self) -> &FlowField {
        &self.field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}

fn spawn_particles<R: Rng + ?Sized>(bounds: &Bounds, config: &FlowConfig, rng: &mut R) -> Vec<Particle> {
    (0..config.particle_count)
        .map(|_| Particle::new(bounds, config, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandRecorder, DrawCommand};

    fn seeded(width: f32, height: f32) -> ParticleSystem<StdRng> {
        ParticleSystem::with_rng(width, height, FlowConfig::default(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_construct_300_square() {
        let system = seeded(300.0, 300.0);

        assert_eq!(system.flow_field().rows(), 10);
        assert_eq!(system.flow_field().cols(), 10);
        assert_eq!(system.flow_field().len(), 100);
        assert_eq!(system.flow_field().angle(0), Some(5.0));
        assert_eq!(system.particles().len(), 1000);
        assert_eq!(system.cell_size(), 30.0);
    }

    #[test]
    fn test_resize_rebuilds_everything() {
        let mut system = seeded(300.0, 300.0);
        let before: Vec<Vec2> = system.particles().iter().map(|p| p.position()).collect();

        system.resize(640.0, 480.0);

        assert_eq!(system.width(), 640.0);
        assert_eq!(system.height(), 480.0);
        assert_eq!(system.flow_field().cols(), 21);
        assert_eq!(system.flow_field().rows(), 16);
        assert_eq!(system.particles().len(), 1000);
        for p in system.particles() {
            assert_eq!(p.trail().len(), 1);
            assert_eq!(p.timer(), 2 * p.max_trail() as i32);
            assert!(system.bounds().contains(p.position()));
        }
        let after: Vec<Vec2> = system.particles().iter().map(|p| p.position()).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_render_draws_before_update() {
        let config = FlowConfig::default().with_particle_count(1);
        let mut system = ParticleSystem::with_rng(300.0, 300.0, config, StdRng::seed_from_u64(9));
        let start = system.particles()[0].position();

        let mut rec = CommandRecorder::new();
        system.render(&mut rec);

        // The single stroked path is the one-point trail at the start position.
        assert_eq!(
            &rec.commands()[..2],
            &[DrawCommand::BeginPath, DrawCommand::MoveTo(start)]
        );
        assert!(!rec.commands().iter().any(|c| matches!(c, DrawCommand::LineTo(_))));
        assert_ne!(system.particles()[0].position(), start);
    }

    #[test]
    fn test_render_strokes_every_particle() {
        let mut system = seeded(400.0, 300.0);
        let mut rec = CommandRecorder::new();
        system.render(&mut rec);
        assert_eq!(rec.stroke_count(), 1000);
    }

    #[test]
    fn test_frame_clears_first() {
        let mut system = seeded(300.0, 300.0);
        let mut rec = CommandRecorder::new();
        system.frame(&mut rec);

        assert_eq!(rec.commands()[0], DrawCommand::Clear);
        assert_eq!(rec.commands()[1], DrawCommand::StrokeStyle(system.config().default_stroke));
        assert_eq!(rec.commands()[2], DrawCommand::LineWidth(1.0));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = seeded(500.0, 500.0);
        let mut b = seeded(500.0, 500.0);
        let mut sink = CommandRecorder::new();
        for _ in 0..50 {
            a.render(&mut sink);
            b.render(&mut sink);
            sink.take();
        }
        let pa: Vec<Vec2> = a.particles().iter().map(|p| p.position()).collect();
        let pb: Vec<Vec2> = b.particles().iter().map(|p| p.position()).collect();
        assert_eq!(pa, pb);
    }
}
