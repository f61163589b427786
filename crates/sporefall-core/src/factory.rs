//! Factories: decorative markers left behind by minion construction.
//!
//! A factory is immutable once built; the interesting side effect -- the new
//! minion -- is applied by the scene at construction time.

use crate::id::FactoryId;
use crate::vector::{Collider, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub id: FactoryId,
    pub position: Vec2,
    radius: f64,
}

impl Factory {
    pub fn new(id: FactoryId, position: Vec2, radius: f64) -> Self {
        Self {
            id,
            position,
            radius,
        }
    }
}

impl Collider for Factory {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
