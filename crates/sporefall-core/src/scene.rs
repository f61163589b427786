//! The scene: root of all mutable simulation state and the per-tick
//! pipeline.
//!
//! # Step pipeline
//!
//! One external tick ([`Scene::step`]) runs
//! `floor(2^(active_ticks / steps_before_speedup))` sub-steps. Each
//! sub-step:
//!
//! 1. **Pause check** -- any minion that is idle or awaiting a move target
//!    pauses the scene. Paused sub-steps still refresh collisions and run
//!    status transitions; they freeze continuous progress only.
//! 2. **Lab** -- research completion and proportional cost accrual.
//! 3. **Minions** -- in collection order (oldest first), so the first
//!    minion wins a contested depletion.
//! 4. **Spores** -- breeding completion; completed spores convert into a
//!    batch of reseeded resources.
//!
//! The pause rule is the game's core rhythm: progress only flows while
//! every minion has something to do, so the world waits for the player's
//! next command instead of running away from them.

use crate::command::Command;
use crate::config::Config;
use crate::factory::Factory;
use crate::id::{FactoryId, MinionId, ResourceId, SporeId};
use crate::idmap::IdMap;
use crate::lab::{Goal, Lab};
use crate::minion::{Minion, MinionContext, MinionStatus};
use crate::query::{ButtonSpec, Drawable, MinionActivity, UiModel};
use crate::rational::Rational;
use crate::resource::Resource;
use crate::rng::SimRng;
use crate::spore::Spore;
use crate::vector::{Circle, Collider, Vec2, collides};
use crate::worldgen;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

/// Every entity collection in the scene. Split out of [`Scene`] so stepping
/// code can borrow collections independently of the config and RNG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objects {
    pub minions: Vec<Minion>,
    pub lab: Lab,
    pub resources: IdMap<ResourceId, Resource>,
    pub factories: Vec<Factory>,
    pub spores: IdMap<SporeId, Spore>,
}

impl Objects {
    /// Whether a circle at `position` with `radius` is free of every
    /// existing object. Used for placement checks (factory sites, seeding).
    pub fn spot_is_free(&self, position: Vec2, radius: f64) -> bool {
        let probe = Circle::new(position, radius);
        let minions = self.minions.iter().any(|m| collides(&probe, m));
        let resources = self.resources.values().any(|r| collides(&probe, r));
        let factories = self.factories.iter().any(|f| collides(&probe, f));
        let spores = self.spores.values().any(|s| collides(&probe, s));
        !(minions || resources || factories || spores || collides(&probe, &self.lab))
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub config: Config,
    pub inventory: Rational,
    pub objects: Objects,
    /// The single focused minion. Exactly one minion is focused at any
    /// time, by construction.
    focused: MinionId,
    /// Consecutive unpaused external ticks; drives the speed-up ramp.
    active_ticks: u64,
    rng: SimRng,
}

impl Scene {
    /// Build a fresh session: lab, one focused minion, and the initial
    /// resource field placed by rejection sampling.
    pub fn new(config: Config) -> Self {
        let lab = Lab::new(config.lab_position, config.lab_radius);
        let minion = Minion::new(MinionId(0), config.minion_start, config.minion_radius);
        let rng = SimRng::new(config.world_seed);
        let mut scene = Self {
            inventory: Rational::ZERO,
            objects: Objects {
                minions: vec![minion],
                lab,
                resources: IdMap::new(),
                factories: Vec::new(),
                spores: IdMap::new(),
            },
            focused: MinionId(0),
            active_ticks: 0,
            rng,
            config,
        };
        scene.seed_initial_resources();
        scene
    }

    fn seed_initial_resources(&mut self) {
        let Self {
            rng,
            objects,
            config,
            ..
        } = self;
        for _ in 0..config.initial_resources {
            let radius = config.resource_radius;
            let position = worldgen::find_random(rng, config.world_scale, |candidate| {
                objects.spot_is_free(candidate, radius)
            });
            objects
                .resources
                .insert_with(|id| Resource::new(id, position, config.resource_units, radius));
        }
    }

    pub fn focused(&self) -> MinionId {
        self.focused
    }

    pub fn minion(&self, id: MinionId) -> &Minion {
        &self.objects.minions[id.0 as usize]
    }

    fn minion_mut(&mut self, id: MinionId) -> &mut Minion {
        &mut self.objects.minions[id.0 as usize]
    }

    /// Whether the scene is currently pausing progress: some minion is idle
    /// or awaiting a move target.
    pub fn paused(&self) -> bool {
        self.objects
            .minions
            .iter()
            .any(|m| m.status.is_idle_like())
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Advance one external tick of size `dt` (always
    /// `config.step_time_delta`; the driver varies how often this is
    /// called, never the delta). Runs the speed-up multiplier's worth of
    /// sub-steps, then updates the active-tick counter: a tick with any
    /// paused sub-step resets the ramp.
    pub fn step(&mut self, dt: Rational) {
        let sub_steps = speedup_multiplier(self.active_ticks, self.config.steps_before_speedup);
        let mut any_paused = false;
        for _ in 0..sub_steps {
            any_paused |= self.step_once(dt);
        }
        if any_paused {
            self.active_ticks = 0;
        } else {
            self.active_ticks += 1;
        }
    }

    /// One sub-step. Returns whether it was paused.
    fn step_once(&mut self, dt: Rational) -> bool {
        let paused = self.paused();
        self.objects
            .lab
            .step(paused, dt, &self.config, &mut self.inventory);
        self.step_minions(paused, dt);
        self.step_spores(paused, dt);
        paused
    }

    fn step_minions(&mut self, paused: bool, dt: Rational) {
        let auto_mining = self.objects.lab.researched(Goal::AutoMining);
        let Objects {
            minions,
            resources,
            spores,
            ..
        } = &mut self.objects;
        for minion in minions.iter_mut() {
            let mut ctx = MinionContext {
                dt,
                velocity: self.config.velocity,
                mining_velocity: self.config.mining_velocity,
                auto_mining,
                spore_radius: self.config.spore_radius,
                inventory: &mut self.inventory,
                resources: &mut *resources,
                spores: &mut *spores,
            };
            minion.step(paused, &mut ctx);
        }
    }

    fn step_spores(&mut self, paused: bool, dt: Rational) {
        let mut completed: Vec<SporeId> = Vec::new();
        for spore in self.objects.spores.values_mut() {
            if spore.step(paused, dt, self.config.breeding_velocity) {
                completed.push(spore.id);
            }
        }
        // Convert after the sweep: seeding mutates the resource map and
        // removes spores, which must not happen mid-iteration.
        for id in completed {
            let Some(spore) = self.objects.spores.remove(id) else {
                continue;
            };
            self.seed_around(spore.position);
        }
    }

    /// Place `config.seeding_resources` fresh resources within
    /// `config.seeding_radius` of `center`, each at a rejection-sampled
    /// free spot.
    fn seed_around(&mut self, center: Vec2) {
        let Self {
            rng,
            objects,
            config,
            ..
        } = self;
        let radius = config.seeding_radius;
        let resource_radius = config.resource_radius;
        for _ in 0..config.seeding_resources {
            let offset = worldgen::find_random(rng, radius, |offset| {
                offset.length() <= radius && objects.spot_is_free(center + offset, resource_radius)
            });
            objects.resources.insert_with(|id| {
                Resource::new(id, center + offset, config.resource_units, resource_radius)
            });
        }
    }

    // -----------------------------------------------------------------------
    // Click dispatch
    // -----------------------------------------------------------------------

    /// Handle a click on the plane. A pending move target consumes the
    /// click first (first awaiting minion in collection order); otherwise
    /// the click focuses the minion strictly containing the point, if any.
    pub fn on_click(&mut self, point: Vec2) {
        if let Some(minion) = self
            .objects
            .minions
            .iter_mut()
            .find(|m| matches!(m.status, MinionStatus::AwaitingTarget))
        {
            minion.status = MinionStatus::Moving { target: point };
            return;
        }

        let probe = Circle::point(point);
        if let Some(minion) = self.objects.minions.iter().find(|m| collides(&probe, *m)) {
            self.focused = minion.id;
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Apply an externally submitted command. Preconditions are the button
    /// layer's responsibility ([`Scene::interface`] only emits commands
    /// whose preconditions hold); entity methods trust their callers.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::PressMove { minion } => {
                self.minion_mut(minion).status = MinionStatus::AwaitingTarget;
            }
            Command::PressMine { minion } => {
                let minion = self.minion_mut(minion);
                if let Some(&resource) = minion.colliding_resources.first() {
                    minion.status = MinionStatus::Mining {
                        resource,
                        resume: None,
                    };
                }
            }
            Command::BuildFactory { minion } => self.build_factory(minion),
            Command::Focus { minion } => self.focused = minion,
            Command::ToggleAutoSeek { minion } => {
                let minion = self.minion_mut(minion);
                minion.auto_seeking = !minion.auto_seeking;
            }
            Command::Breed { minion } => self.breed(minion),
            Command::StartResearch { goal } => self.objects.lab.start_research(goal),
            Command::Seed { minion } => self.seed_for(minion),
        }
    }

    /// Where a factory built by this minion would stand: offset along +x by
    /// the sum of radii, so builder and building end up exactly touching.
    pub fn factory_site(&self, builder: MinionId) -> Vec2 {
        let minion = self.minion(builder);
        minion.position + Vec2::new(minion.radius + self.config.factory_radius, 0.0)
    }

    fn build_factory(&mut self, builder: MinionId) {
        let site = self.factory_site(builder);
        self.inventory -= self.config.factory_cost;
        let id = FactoryId(self.objects.factories.len() as u32);
        self.objects
            .factories
            .push(Factory::new(id, site, self.config.factory_radius));

        // The factory's one side effect: a new minion, just past it.
        let spawn = site + Vec2::new(self.config.factory_radius + self.config.minion_radius, 0.0);
        let minion_id = MinionId(self.objects.minions.len() as u32);
        self.objects
            .minions
            .push(Minion::new(minion_id, spawn, self.config.minion_radius));
    }

    fn breed(&mut self, minion: MinionId) {
        let Some(spore_id) = self.first_colliding_dormant_spore(minion) else {
            return;
        };
        if let Some(spore) = self.objects.spores.get_mut(spore_id) {
            spore.begin_breeding();
        }
    }

    fn first_colliding_dormant_spore(&self, minion: MinionId) -> Option<SporeId> {
        let minion = self.minion(minion);
        self.objects
            .spores
            .iter()
            .find(|(_, spore)| spore.is_dormant() && collides(minion, *spore))
            .map(|(id, _)| id)
    }

    fn seed_for(&mut self, minion: MinionId) {
        self.inventory -= self.config.seeding_cost;
        let center = self.minion(minion).position;
        self.seed_around(center);
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// One drawable descriptor per entity, in paint order: resources,
    /// spores, factories, lab, minions.
    pub fn draw(&self) -> Vec<Drawable> {
        let mut out = Vec::new();
        for (id, resource) in self.objects.resources.iter() {
            out.push(Drawable::Resource {
                id,
                position: resource.position,
                radius: resource.radius(),
                units_left: resource.units_left(),
            });
        }
        for (id, spore) in self.objects.spores.iter() {
            out.push(Drawable::Spore {
                id,
                position: spore.position,
                radius: spore.radius(),
                completion: spore.completion(),
            });
        }
        for factory in &self.objects.factories {
            out.push(Drawable::Factory {
                id: factory.id,
                position: factory.position,
                radius: factory.radius(),
            });
        }
        out.push(Drawable::Lab {
            position: self.objects.lab.position,
            radius: self.objects.lab.radius,
            completion: self.objects.lab.completion(),
        });
        for minion in &self.objects.minions {
            out.push(Drawable::Minion {
                id: minion.id,
                position: minion.position,
                radius: minion.radius,
                focused: minion.id == self.focused,
                activity: match minion.status {
                    MinionStatus::Idle => MinionActivity::Idle,
                    MinionStatus::AwaitingTarget => MinionActivity::AwaitingTarget,
                    MinionStatus::Moving { .. } => MinionActivity::Moving,
                    MinionStatus::Mining { .. } => MinionActivity::Mining,
                },
            });
        }
        out
    }

    /// The interface projection for the focused minion and the lab.
    pub fn interface(&self) -> UiModel {
        let mut buttons = Vec::new();
        let focused = self.minion(self.focused);

        if matches!(focused.status, MinionStatus::Idle) {
            buttons.push(button("move", focused.id, Command::PressMove { minion: focused.id }));
            if !focused.colliding_resources.is_empty() {
                buttons.push(button("mine", focused.id, Command::PressMine { minion: focused.id }));
            }
        }

        if self
            .objects
            .spot_is_free(self.factory_site(self.focused), self.config.factory_radius)
        {
            let mut spec = button(
                "build minion",
                focused.id,
                Command::BuildFactory { minion: focused.id },
            );
            spec.disabled = self.inventory < self.config.factory_cost;
            buttons.push(spec);
        }

        if self.objects.lab.researched(Goal::AutoSeeking) {
            let mut spec = button(
                "auto-seek",
                focused.id,
                Command::ToggleAutoSeek { minion: focused.id },
            );
            spec.checked = Some(focused.auto_seeking);
            buttons.push(spec);
        }

        if self.first_colliding_dormant_spore(self.focused).is_some() {
            buttons.push(button("breed", focused.id, Command::Breed { minion: focused.id }));
        }

        if self.objects.lab.researched(Goal::Seeding) {
            let mut spec = button("seed", focused.id, Command::Seed { minion: focused.id });
            spec.disabled = self.inventory < self.config.seeding_cost;
            buttons.push(spec);
        }

        for minion in &self.objects.minions {
            if minion.id != self.focused {
                buttons.push(button("focus", minion.id, Command::Focus { minion: minion.id }));
            }
        }

        if self.objects.lab.is_idle()
            && matches!(focused.status, MinionStatus::Idle)
            && collides(focused, &self.objects.lab)
        {
            for goal in Goal::all() {
                if !self.objects.lab.researched(goal) {
                    let mut spec = ButtonSpec {
                        id: format!("research:{}", goal.label()),
                        label: goal.label(),
                        disabled: false,
                        checked: None,
                        command: Command::StartResearch { goal },
                    };
                    spec.disabled = self.inventory < self.config.research_cost(goal);
                    buttons.push(spec);
                }
            }
        }

        let awaiting = self
            .objects
            .minions
            .iter()
            .any(|m| matches!(m.status, MinionStatus::AwaitingTarget));

        UiModel {
            inventory: self.inventory.to_string(),
            active_command: awaiting.then_some("select a move target"),
            buttons,
        }
    }
}

fn button(label: &'static str, minion: MinionId, command: Command) -> ButtonSpec {
    ButtonSpec {
        id: format!("{label}:{}", minion.0),
        label,
        disabled: false,
        checked: None,
        command,
    }
}

// ---------------------------------------------------------------------------
// Speed-up ramp
// ---------------------------------------------------------------------------

/// Sub-steps to run at external tick `active_ticks` since the last pause:
/// `floor(2^(active_ticks / steps_before_speedup))`.
///
/// The `t % period == 0` case uses an exact shift so power-of-two
/// boundaries cannot round wrong; the result saturates far beyond any real
/// session length instead of overflowing.
pub fn speedup_multiplier(active_ticks: u64, steps_before_speedup: u64) -> u64 {
    let period = steps_before_speedup.max(1);
    let whole = active_ticks / period;
    if whole >= 63 {
        return u64::MAX;
    }
    let base = 1u64 << whole;
    let rest = active_ticks % period;
    if rest == 0 {
        return base;
    }
    let fraction = (2f64).powf(rest as f64 / period as f64);
    (base as f64 * fraction) as u64
}
