//! Spores: the residue of a depleted resource, breedable into fresh ones.

use crate::id::SporeId;
use crate::rational::Rational;
use crate::vector::{Collider, Vec2};
use serde::{Deserialize, Serialize};

/// The breeding state model mirrors the lab's research: dormant until a
/// minion starts breeding, then completion rises to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SporeStatus {
    Dormant,
    Breeding { completion: Rational },
}

/// Created where a resource was mined out. Breeding it to completion
/// converts it into a batch of newly seeded resources (handled by the
/// scene, which owns the resource registry and the RNG).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spore {
    pub id: SporeId,
    pub position: Vec2,
    pub status: SporeStatus,
    radius: f64,
}

impl Spore {
    pub fn new(id: SporeId, position: Vec2, radius: f64) -> Self {
        Self {
            id,
            position,
            status: SporeStatus::Dormant,
            radius,
        }
    }

    /// Legal only while dormant; the button layer enforces that.
    pub fn begin_breeding(&mut self) {
        self.status = SporeStatus::Breeding {
            completion: Rational::ZERO,
        };
    }

    pub fn is_dormant(&self) -> bool {
        matches!(self.status, SporeStatus::Dormant)
    }

    pub fn completion(&self) -> Option<Rational> {
        match &self.status {
            SporeStatus::Dormant => None,
            SporeStatus::Breeding { completion } => Some(*completion),
        }
    }

    /// Advance breeding completion, clamped to one. Returns `true` once
    /// complete, signalling the scene to convert this spore.
    pub fn step(&mut self, paused: bool, dt: Rational, breeding_velocity: Rational) -> bool {
        if paused {
            return false;
        }
        let SporeStatus::Breeding { completion } = &mut self.status else {
            return false;
        };
        *completion = (*completion + dt * breeding_velocity).min(Rational::ONE);
        *completion == Rational::ONE
    }
}

impl Collider for Spore {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
