//! Shared test helpers for unit, integration, and benchmark code.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::config::Config;
use crate::id::{ResourceId, SporeId};
use crate::rational::Rational;
use crate::resource::Resource;
use crate::scene::Scene;
use crate::spore::Spore;
use crate::vector::Vec2;

/// Rational literal for tests.
pub fn rat(numerator: i64, denominator: i64) -> Rational {
    Rational::new(numerator, denominator).expect("test literals use nonzero denominators")
}

/// A small, deterministic configuration: unit tick, unit velocity, an empty
/// world (no random resources), and the speed-up ramp pushed out of reach so
/// scenarios run one sub-step per tick unless they opt in.
pub fn test_config() -> Config {
    Config {
        step_time_delta: Rational::ONE,
        velocity: Rational::ONE,
        research_velocity: rat(1, 10),
        mining_velocity: rat(1, 4),
        breeding_velocity: rat(1, 10),
        factory_cost: Rational::from_int(5),
        seeding_cost: Rational::ONE,
        auto_mining_cost: Rational::from_int(2),
        auto_seeking_cost: Rational::from_int(3),
        seeding_research_cost: Rational::from_int(4),
        seeding_resources: 3,
        seeding_radius: 5.0,
        initial_resources: 0,
        world_scale: 20.0,
        world_seed: 42,
        steps_before_speedup: 1_000_000,
        minion_radius: 1.0,
        resource_radius: 1.0,
        resource_units: Rational::ONE,
        spore_radius: 0.6,
        factory_radius: 1.5,
        lab_position: Vec2::new(0.0, 0.0),
        lab_radius: 2.0,
        minion_start: Vec2::new(10.0, 0.0),
        ..Config::default()
    }
}

/// A scene over [`test_config`]: one idle minion, a lab, nothing else.
pub fn empty_scene() -> Scene {
    Scene::new(test_config())
}

/// Insert a full resource at `position` using the scene's configured size.
pub fn add_resource(scene: &mut Scene, position: Vec2) -> ResourceId {
    let units = scene.config.resource_units;
    let radius = scene.config.resource_radius;
    scene
        .objects
        .resources
        .insert_with(|id| Resource::new(id, position, units, radius))
}

/// Insert a dormant spore at `position` using the scene's configured size.
pub fn add_spore(scene: &mut Scene, position: Vec2) -> SporeId {
    let radius = scene.config.spore_radius;
    scene
        .objects
        .spores
        .insert_with(|id| Spore::new(id, position, radius))
}

/// Drive the scene until the predicate holds, bailing out after `limit`
/// ticks so a broken scenario fails instead of hanging.
pub fn step_until(scene: &mut Scene, limit: u64, done: impl Fn(&Scene) -> bool) -> u64 {
    let dt = scene.config.step_time_delta;
    for tick in 0..limit {
        if done(scene) {
            return tick;
        }
        scene.step(dt);
    }
    panic!("scenario did not finish within {limit} ticks");
}
