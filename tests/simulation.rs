//! Integration tests for the flow field simulation.
//!
//! These drive the public API headlessly through `CommandRecorder` and
//! `LineBatch`, checking lifecycle and field properties over many frames.

use flowfield::{
    Bounds, CommandRecorder, DrawCommand, FlowConfig, FlowField, LineBatch, Particle,
    ParticleSystem, Phase, Surface, Vec2, Vec4,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_system(width: f32, height: f32, seed: u64) -> ParticleSystem<StdRng> {
    ParticleSystem::with_rng(width, height, FlowConfig::default(), StdRng::seed_from_u64(seed))
}

// ============================================================================
// Flow field
// ============================================================================

#[test]
fn test_field_matches_formula_for_every_cell() {
    let system = seeded_system(1280.0, 720.0, 1);
    let field = system.flow_field();
    let config = system.config();

    assert_eq!(field.cols(), 42);
    assert_eq!(field.rows(), 24);
    for y in 0..field.rows() {
        for x in 0..field.cols() {
            let expected =
                ((x as f32 * config.zoom).cos() + (y as f32 * config.zoom).sin()) * config.curve;
            assert_eq!(field.angles()[y * field.cols() + x], expected);
        }
    }
}

#[test]
fn test_field_for_300_square() {
    let system = seeded_system(300.0, 300.0, 2);
    assert_eq!(system.flow_field().len(), 100);
    assert_eq!(system.flow_field().angle(0), Some(1.0 * system.config().curve));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_trail_length_invariant_over_many_frames() {
    let mut system = seeded_system(600.0, 400.0, 3);
    let mut sink = CommandRecorder::new();

    for _ in 0..600 {
        system.render(&mut sink);
        sink.take();
        for p in system.particles() {
            let len = p.trail().len();
            assert!(len >= 1 && len <= p.max_trail(), "trail length {} out of range", len);
        }
    }
}

#[test]
fn test_every_particle_eventually_resets_inside_surface() {
    let config = FlowConfig::default().with_particle_count(50);
    let mut system = ParticleSystem::with_rng(600.0, 400.0, config, StdRng::seed_from_u64(4));
    let mut sink = CommandRecorder::new();

    // The longest cycle (max trail 209) resets on tick 3 * 209 - 1.
    let mut reset_seen = vec![false; 50];
    for _ in 0..(3 * 210) {
        let phases: Vec<Phase> = system.particles().iter().map(|p| p.phase()).collect();
        system.render(&mut sink);
        sink.take();

        for (i, p) in system.particles().iter().enumerate() {
            if phases[i] == Phase::Reset {
                reset_seen[i] = true;
                assert_eq!(p.trail().len(), 1);
                assert_eq!(p.timer(), 2 * p.max_trail() as i32);
                assert!(system.bounds().contains(p.position()));
                assert_eq!(p.phase(), Phase::Growing);
            }
        }
    }
    assert!(reset_seen.iter().all(|r| *r));
}

#[test]
fn test_phase_transitions_for_trail_of_ten() {
    let config = FlowConfig::default();
    let field = FlowField::for_surface(300.0, 300.0, &config);
    let bounds = Bounds::new(300.0, 300.0, config.cell_size);
    let mut rng = StdRng::seed_from_u64(5);
    let mut p = Particle::spawn_at(Vec2::new(120.0, 90.0), 1.0, 10, Vec4::ONE);

    let mut phases = Vec::new();
    for _ in 0..30 {
        p.update(&field, &bounds, &mut rng);
        phases.push(p.phase());
    }

    assert!(phases[..19].iter().all(|ph| *ph == Phase::Growing));
    assert!(phases[19..27].iter().all(|ph| *ph == Phase::Shrinking));
    assert_eq!(phases[27], Phase::Reset);
    assert_eq!(phases[28], Phase::Growing);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_matches_fresh_construction_shape() {
    let mut system = seeded_system(300.0, 300.0, 6);
    let mut sink = CommandRecorder::new();
    for _ in 0..30 {
        system.render(&mut sink);
    }

    system.resize(905.0, 455.0);

    assert_eq!(system.flow_field().cols(), 30);
    assert_eq!(system.flow_field().rows(), 15);
    assert_eq!(system.particles().len(), 1000);
    for p in system.particles() {
        assert_eq!(p.trail().len(), 1);
        assert_eq!(p.phase(), Phase::Growing);
        assert!(system.bounds().contains(p.position()));
    }
}

#[test]
fn test_shrinking_surface_is_allowed() {
    let mut system = seeded_system(800.0, 800.0, 7);
    system.resize(20.0, 20.0);
    assert!(system.flow_field().is_empty());

    let mut sink = CommandRecorder::new();
    for _ in 0..100 {
        system.render(&mut sink);
        sink.take();
    }
    assert!(system.particles().iter().all(|p| p.position().is_finite()));
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_frame_command_stream_shape() {
    let config = FlowConfig::default().with_particle_count(3);
    let mut system = ParticleSystem::with_rng(300.0, 300.0, config, StdRng::seed_from_u64(8));
    let mut rec = CommandRecorder::new();
    system.frame(&mut rec);

    let commands = rec.commands();
    assert_eq!(commands[0], DrawCommand::Clear);
    // clear + default style + width, then 4 commands per one-point trail
    assert_eq!(commands.len(), 3 + 3 * 4);
    for chunk in commands[3..].chunks(4) {
        assert_eq!(chunk[0], DrawCommand::BeginPath);
        assert!(matches!(chunk[1], DrawCommand::MoveTo(_)));
        assert!(matches!(chunk[2], DrawCommand::StrokeStyle(_)));
        assert_eq!(chunk[3], DrawCommand::Stroke);
    }
}

#[test]
fn test_line_batch_collects_trails() {
    let mut system = seeded_system(640.0, 480.0, 9);
    let mut batch = LineBatch::new();

    // The first frame draws one-point trails only.
    system.frame(&mut batch);
    assert!(batch.vertices().is_empty());

    system.frame(&mut batch);
    assert_eq!(batch.vertices().len(), 1000 * 6);

    let colors = system.config().palette;
    assert!(batch
        .vertices()
        .iter()
        .all(|v| colors.contains(Vec4::from_array(v.color))));
}

#[test]
fn test_surface_trait_objects_work() {
    let mut system = seeded_system(300.0, 300.0, 10);
    let mut rec = CommandRecorder::new();
    let surface: &mut dyn Surface = &mut rec;
    system.render(surface);
    assert_eq!(rec.stroke_count(), 1000);
}
