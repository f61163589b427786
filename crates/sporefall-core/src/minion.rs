//! Minion movement and work state machine.
//!
//! A minion's step has three parts, in order:
//!
//! 1. Refresh the set of currently colliding resources. Runs every step,
//!    paused or not -- button visibility and the auto-mine trigger read it.
//! 2. Status transitions (auto-mine interruption, auto-seek). Also run while
//!    paused: pausing freezes progress, not decisions.
//! 3. Progress (movement, mining). Skipped while paused.
//!
//! Minions never hold a reference back to the scene; each step receives a
//! [`MinionContext`] with narrow views of the state it may touch.

use crate::id::{MinionId, ResourceId, SporeId};
use crate::idmap::IdMap;
use crate::rational::Rational;
use crate::resource::Resource;
use crate::spore::Spore;
use crate::vector::{Collider, Vec2, collides};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MinionStatus {
    Idle,
    /// The move button was pressed; the next scene click supplies the
    /// target. Counts as idle for the scene-wide pause rule.
    AwaitingTarget,
    Moving {
        target: Vec2,
    },
    Mining {
        resource: ResourceId,
        /// The status to restore when mining ends, set when auto-mining
        /// interrupted something. `None` for manually started mining.
        resume: Option<Box<MinionStatus>>,
    },
}

impl MinionStatus {
    /// Idle and target-awaiting minions pause the whole scene.
    pub fn is_idle_like(&self) -> bool {
        matches!(self, MinionStatus::Idle | MinionStatus::AwaitingTarget)
    }
}

/// The state a minion may read or mutate during one step.
pub struct MinionContext<'a> {
    pub dt: Rational,
    pub velocity: Rational,
    pub mining_velocity: Rational,
    /// Whether the auto-mining goal has been researched.
    pub auto_mining: bool,
    pub spore_radius: f64,
    pub inventory: &'a mut Rational,
    pub resources: &'a mut IdMap<ResourceId, Resource>,
    pub spores: &'a mut IdMap<SporeId, Spore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minion {
    pub id: MinionId,
    pub position: Vec2,
    pub radius: f64,
    pub status: MinionStatus,
    /// The per-minion auto-seek toggle (only effective once the
    /// auto-seeking goal is researched -- the button layer gates the
    /// toggle itself).
    pub auto_seeking: bool,
    /// Resource ids currently colliding with this minion, in id order.
    /// Recomputed at the start of every step.
    pub colliding_resources: Vec<ResourceId>,
}

impl Minion {
    pub fn new(id: MinionId, position: Vec2, radius: f64) -> Self {
        Self {
            id,
            position,
            radius,
            status: MinionStatus::Idle,
            auto_seeking: false,
            colliding_resources: Vec::new(),
        }
    }

    pub fn step(&mut self, paused: bool, ctx: &mut MinionContext<'_>) {
        self.refresh_collisions(ctx.resources);
        self.apply_transitions(ctx);
        if paused {
            return;
        }
        match &self.status {
            MinionStatus::Moving { target } => {
                let target = *target;
                self.advance_toward(target, ctx);
            }
            MinionStatus::Mining { resource, .. } => {
                let resource = *resource;
                self.advance_mining(resource, ctx);
            }
            MinionStatus::Idle | MinionStatus::AwaitingTarget => {}
        }
    }

    fn refresh_collisions(&mut self, resources: &IdMap<ResourceId, Resource>) {
        self.colliding_resources.clear();
        for (id, resource) in resources.iter() {
            if collides(self, resource) {
                self.colliding_resources.push(id);
            }
        }
    }

    fn apply_transitions(&mut self, ctx: &MinionContext<'_>) {
        // Auto-mining interrupts whatever the minion is doing; the
        // interrupted status is restored when mining ends.
        if ctx.auto_mining
            && !matches!(self.status, MinionStatus::Mining { .. })
            && let Some(&resource) = self.colliding_resources.first()
        {
            let interrupted = std::mem::replace(&mut self.status, MinionStatus::Idle);
            self.status = MinionStatus::Mining {
                resource,
                resume: Some(Box::new(interrupted)),
            };
            return;
        }

        // Auto-seek sends an idle minion with nothing in reach toward the
        // nearest resource.
        if matches!(self.status, MinionStatus::Idle)
            && self.auto_seeking
            && self.colliding_resources.is_empty()
            && let Some(target) = self.nearest_resource_position(ctx.resources)
            && target != self.position
        {
            self.status = MinionStatus::Moving { target };
        }
    }

    /// Position of the resource closest to this minion. Strict comparison:
    /// the first resource in id order wins ties.
    fn nearest_resource_position(&self, resources: &IdMap<ResourceId, Resource>) -> Option<Vec2> {
        let mut best: Option<(f64, Vec2)> = None;
        for resource in resources.values() {
            let distance = self.position.distance(resource.position);
            if best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, resource.position));
            }
        }
        best.map(|(_, position)| position)
    }

    fn advance_toward(&mut self, target: Vec2, ctx: &MinionContext<'_>) {
        let delta = target - self.position;
        let distance_left = delta.length();
        let step_distance = (ctx.velocity * ctx.dt).to_f64();
        if step_distance >= distance_left {
            // Arrival snaps exactly onto the target.
            self.position = target;
            self.status = MinionStatus::Idle;
            return;
        }
        // distance_left > step_distance >= 0 here, but the degenerate case
        // still gets an explicit arm: a zero delta means we already stand on
        // the target.
        match delta.unit() {
            Ok(direction) => self.position = self.position + direction * step_distance,
            Err(_) => {
                self.position = target;
                self.status = MinionStatus::Idle;
            }
        }
    }

    fn advance_mining(&mut self, resource_id: ResourceId, ctx: &mut MinionContext<'_>) {
        // `get`, not `expect_get`: another minion earlier in collection
        // order may have depleted the resource this very tick.
        let Some(resource) = ctx.resources.get_mut(resource_id) else {
            self.finish_mining();
            return;
        };
        if !collides(&*self, resource) {
            self.finish_mining();
            return;
        }

        let mined = resource.mine(ctx.dt * ctx.mining_velocity);
        *ctx.inventory += mined;

        if resource.is_depleted() {
            let position = resource.position;
            ctx.resources.remove(resource_id);
            ctx.spores
                .insert_with(|id| Spore::new(id, position, ctx.spore_radius));
            self.finish_mining();
        }
    }

    /// Restore the interrupted status, or fall back to idle.
    fn finish_mining(&mut self) {
        let previous = std::mem::replace(&mut self.status, MinionStatus::Idle);
        if let MinionStatus::Mining {
            resume: Some(resume),
            ..
        } = previous
        {
            self.status = *resume;
        }
    }
}

impl Collider for Minion {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
