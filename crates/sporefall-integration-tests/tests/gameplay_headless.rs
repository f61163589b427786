//! Headless full-gameplay scenarios.
//!
//! These tests play the game the way the shell would: submit commands and
//! clicks, feed frames through the driver, and assert on the projections.
//! No internal stepping shortcuts -- everything flows through the public
//! seam.

use sporefall_core::command::Command;
use sporefall_core::driver::StepDriver;
use sporefall_core::id::MinionId;
use sporefall_core::lab::Goal;
use sporefall_core::minion::MinionStatus;
use sporefall_core::query::Drawable;
use sporefall_core::rational::Rational;
use sporefall_core::scene::Scene;
use sporefall_core::test_utils::{add_resource, add_spore, rat, step_until, test_config};
use sporefall_core::vector::Vec2;

// ===========================================================================
// Shared helpers
// ===========================================================================

/// Send the minion on a long march so the scene runs unpaused.
fn keep_busy(scene: &mut Scene, minion: MinionId) {
    scene.execute(Command::PressMove { minion });
    scene.on_click(Vec2::new(-100_000.0, 0.0));
}

/// Research a goal from scratch: start it, keep the minion busy, and step
/// until it lands.
fn research(scene: &mut Scene, goal: Goal) {
    scene.inventory += scene.config.research_cost(goal);
    scene.execute(Command::StartResearch { goal });
    keep_busy(scene, MinionId(0));
    step_until(scene, 10_000, |s| s.objects.lab.researched(goal));
    // Park the minion again for the next act.
    scene.objects.minions[0].status = MinionStatus::Idle;
}

fn find_button(scene: &Scene, label: &str) -> Option<sporefall_core::query::ButtonSpec> {
    scene.interface().buttons.into_iter().find(|b| b.label == label)
}

// ===========================================================================
// Scenario 1: the opening -- walk to a resource and mine it dry
// ===========================================================================

#[test]
fn opening_walk_and_mine() {
    let mut scene = Scene::new(test_config());
    let resource_position = Vec2::new(20.0, 0.0);
    let resource = add_resource(&mut scene, resource_position);
    let mut driver = StepDriver::for_scene(&scene);

    // Walk until we collide with the resource.
    scene.execute(Command::PressMove { minion: MinionId(0) });
    scene.on_click(Vec2::new(19.0, 0.0));
    while !matches!(scene.minion(MinionId(0)).status, MinionStatus::Idle) {
        driver.on_frame(&mut scene, 1.0);
    }
    assert_eq!(scene.minion(MinionId(0)).position, Vec2::new(19.0, 0.0));
    // One more (paused) frame refreshes the collision set at the new spot.
    driver.on_frame(&mut scene, 1.0);
    assert_eq!(scene.minion(MinionId(0)).colliding_resources, [resource]);

    // The mine button is offered; press it and run the resource dry.
    let mine = find_button(&scene, "mine").expect("mine button while colliding");
    assert!(!mine.disabled);
    scene.execute(mine.command);
    step_until(&mut scene, 100, |s| s.objects.resources.get(resource).is_none());

    // Exactly one unit was credited, and a spore marks the spot.
    assert_eq!(scene.inventory, Rational::ONE);
    let spores: Vec<_> = scene
        .draw()
        .into_iter()
        .filter(|d| matches!(d, Drawable::Spore { .. }))
        .collect();
    assert_eq!(spores.len(), 1);
    assert!(matches!(
        spores[0],
        Drawable::Spore { position, completion: None, .. } if position == resource_position
    ));
}

// ===========================================================================
// Scenario 2: research auto-mining, then let automation take over
// ===========================================================================

#[test]
fn auto_mining_takes_over_en_route() {
    let mut scene = Scene::new(test_config());
    research(&mut scene, Goal::AutoMining);

    // A resource sits directly on the minion's path.
    scene.objects.minions[0].position = Vec2::new(10.0, 0.0);
    let on_path = add_resource(&mut scene, Vec2::new(5.0, 0.0));
    scene.execute(Command::PressMove { minion: MinionId(0) });
    scene.on_click(Vec2::new(-50.0, 0.0));

    // The walk is interrupted by mining as soon as the circles touch.
    step_until(&mut scene, 1_000, |s| {
        matches!(s.minion(MinionId(0)).status, MinionStatus::Mining { .. })
    });
    let interrupted_at = scene.minion(MinionId(0)).position;
    assert!(interrupted_at.distance(Vec2::new(5.0, 0.0)) < 2.0);

    // Mining drains the resource, then the original move resumes.
    step_until(&mut scene, 1_000, |s| s.objects.resources.get(on_path).is_none());
    assert!(matches!(
        scene.minion(MinionId(0)).status,
        MinionStatus::Moving { .. }
    ));
    assert_eq!(scene.inventory, Rational::ONE);
}

// ===========================================================================
// Scenario 3: auto-seek walks the minion from deposit to deposit
// ===========================================================================

#[test]
fn auto_seek_clears_the_field() {
    let mut config = test_config();
    config.mining_velocity = Rational::ONE;
    let mut scene = Scene::new(config);
    research(&mut scene, Goal::AutoMining);
    research(&mut scene, Goal::AutoSeeking);

    add_resource(&mut scene, Vec2::new(30.0, 0.0));
    add_resource(&mut scene, Vec2::new(30.0, 8.0));
    add_resource(&mut scene, Vec2::new(30.0, -12.0));

    let toggle = find_button(&scene, "auto-seek").expect("researched toggle");
    assert_eq!(toggle.checked, Some(false));
    scene.execute(toggle.command);

    // The minion now feeds itself: seek, mine, seek... until the field is
    // clear and only spores remain.
    step_until(&mut scene, 10_000, |s| s.objects.resources.is_empty());
    assert_eq!(scene.inventory, Rational::from_int(3));
    assert_eq!(scene.objects.spores.len(), 3);
}

// ===========================================================================
// Scenario 4: breed a spore back into a resource patch
// ===========================================================================

#[test]
fn breeding_reseeds_the_world() {
    let mut config = test_config();
    config.breeding_velocity = rat(1, 2);
    config.seeding_resources = 4;
    let mut scene = Scene::new(config);

    let spore_position = Vec2::new(10.5, 0.0);
    add_spore(&mut scene, spore_position);

    let breed = find_button(&scene, "breed").expect("breed button while colliding");
    scene.execute(breed.command);
    keep_busy(&mut scene, MinionId(0));

    step_until(&mut scene, 100, |s| s.objects.spores.is_empty());
    assert_eq!(scene.objects.resources.len(), 4);
    for resource in scene.objects.resources.values() {
        let distance = resource.position.distance(spore_position);
        assert!(distance <= scene.config.seeding_radius, "seeded at {distance}");
    }
}

// ===========================================================================
// Scenario 5: build a second minion and put both to work
// ===========================================================================

#[test]
fn factory_builds_a_second_minion() {
    let mut scene = Scene::new(test_config());
    scene.inventory = Rational::from_int(5);

    let build = find_button(&scene, "build minion").expect("free site");
    assert!(!build.disabled);
    scene.execute(build.command);

    assert_eq!(scene.inventory, Rational::ZERO);
    assert_eq!(scene.objects.minions.len(), 2);
    assert_eq!(scene.objects.factories.len(), 1);

    // Both minions must be busy before anything progresses again.
    scene.execute(Command::StartResearch { goal: Goal::AutoMining });
    keep_busy(&mut scene, MinionId(0));
    scene.step(scene.config.step_time_delta);
    assert_eq!(scene.objects.lab.completion(), Some(Rational::ZERO));

    scene.execute(Command::PressMove { minion: MinionId(1) });
    scene.on_click(Vec2::new(100_000.0, 100.0));
    scene.step(scene.config.step_time_delta);
    assert!(scene.objects.lab.completion().unwrap() > Rational::ZERO);

    // The focus button targets the new minion; clicking it transfers focus.
    let focus = find_button(&scene, "focus").expect("unfocused minion listed");
    scene.execute(focus.command);
    assert_eq!(scene.focused(), MinionId(1));
}

// ===========================================================================
// Scenario 6: the seed command spends inventory to plant a patch
// ===========================================================================

#[test]
fn seed_command_plants_around_the_minion() {
    let mut scene = Scene::new(test_config());
    research(&mut scene, Goal::Seeding);

    // Unaffordable: button present but disabled.
    scene.inventory = Rational::ZERO;
    let seed = find_button(&scene, "seed").expect("researched seed button");
    assert!(seed.disabled);

    scene.inventory = Rational::from_int(2);
    let seed = find_button(&scene, "seed").expect("researched seed button");
    assert!(!seed.disabled);
    scene.execute(seed.command);

    assert_eq!(scene.inventory, Rational::from_int(2) - scene.config.seeding_cost);
    assert_eq!(
        scene.objects.resources.len(),
        scene.config.seeding_resources as usize
    );
    let center = scene.minion(MinionId(0)).position;
    for resource in scene.objects.resources.values() {
        assert!(resource.position.distance(center) <= scene.config.seeding_radius);
    }
}

// ===========================================================================
// Scenario 7: the pause rhythm
// ===========================================================================

#[test]
fn world_waits_for_an_idle_minion() {
    let mut config = test_config();
    config.initial_resources = 5;
    let mut scene = Scene::new(config);
    let mut driver = StepDriver::for_scene(&scene);

    let before = scene.draw();
    // Many frames, but the minion has no orders: nothing may move.
    for _ in 0..50 {
        driver.on_frame(&mut scene, 1.0);
    }
    assert_eq!(scene.draw(), before);
    assert!(scene.paused());

    // One order and the world comes alive.
    keep_busy(&mut scene, MinionId(0));
    driver.on_frame(&mut scene, 1.0);
    assert_ne!(scene.draw(), before);
}

// ===========================================================================
// Scenario 8: long march under the speed-up ramp
// ===========================================================================

#[test]
fn speedup_shortens_a_long_march() {
    let mut config = test_config();
    config.steps_before_speedup = 5;
    config.minion_start = Vec2::new(0.0, 30.0);
    let mut scene = Scene::new(config);

    scene.execute(Command::PressMove { minion: MinionId(0) });
    scene.on_click(Vec2::new(1_000.0, 30.0));

    // floor(2^(t/5)) sub-steps per tick: the 1000-unit march takes far
    // fewer than 1000 external ticks.
    let ticks = step_until(&mut scene, 1_000, |s| {
        matches!(s.minion(MinionId(0)).status, MinionStatus::Idle)
    });
    assert!(ticks < 60, "ramp too slow: {ticks} ticks");
    assert_eq!(scene.minion(MinionId(0)).position, Vec2::new(1_000.0, 30.0));
}
