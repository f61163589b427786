//! Depletable resource entities.

use crate::id::ResourceId;
use crate::rational::Rational;
use crate::vector::{Collider, Vec2};
use serde::{Deserialize, Serialize};

/// A mineable deposit. Starts full and shrinks as minions work it; removed
/// from the scene when `units_left` reaches exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub position: Vec2,
    units_left: Rational,
    initial_units: Rational,
    initial_radius: f64,
}

impl Resource {
    pub fn new(id: ResourceId, position: Vec2, initial_units: Rational, initial_radius: f64) -> Self {
        Self {
            id,
            position,
            units_left: initial_units,
            initial_units,
            initial_radius,
        }
    }

    pub fn units_left(&self) -> Rational {
        self.units_left
    }

    /// Deduct `fraction * initial_units`, clamped so `units_left` never
    /// drops below zero. Returns the amount actually removed -- the caller
    /// credits exactly this to the inventory, so cumulative inventory always
    /// equals cumulative depletion.
    pub fn mine(&mut self, fraction: Rational) -> Rational {
        let requested = fraction * self.initial_units;
        let removed = requested.min(self.units_left);
        self.units_left -= removed;
        removed
    }

    pub fn is_depleted(&self) -> bool {
        self.units_left.is_zero()
    }
}

impl Collider for Resource {
    fn position(&self) -> Vec2 {
        self.position
    }

    /// Shrinks with the remaining units:
    /// `initial_radius * units_left / initial_units`.
    fn radius(&self) -> f64 {
        self.initial_radius * self.units_left.to_f64() / self.initial_units.to_f64()
    }
}
