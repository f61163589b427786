//! 2D plane math for spatial entities.
//!
//! Positions and geometry use plain `f64` -- exactness is an economic
//! concern, not a spatial one (see [`crate::rational`]). `b - a` is the
//! vector pointing from `a` to `b`; movement code relies on that
//! orientation.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A unit vector was requested for a zero-length vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot take the unit vector of a zero-length vector")]
pub struct DegenerateVector;

/// An immutable 2D point or direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// The unit vector with this direction. Fails with [`DegenerateVector`]
    /// for the zero vector rather than producing NaN components; call sites
    /// that can see a zero-length difference (a minion already standing on
    /// its target) must guard explicitly.
    pub fn unit(self) -> Result<Self, DegenerateVector> {
        let len = self.length();
        if len == 0.0 {
            return Err(DegenerateVector);
        }
        Ok(Self {
            x: self.x / len,
            y: self.y / len,
        })
    }

    /// The unit vector at `radians` from the positive x axis. Used for the
    /// completion-pie geometry of spores and the lab.
    pub fn from_angle(radians: f64) -> Self {
        Self {
            x: radians.cos(),
            y: radians.sin(),
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

// ---------------------------------------------------------------------------
// Collision
// ---------------------------------------------------------------------------

/// A circular entity that participates in collision tests.
pub trait Collider {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f64;
}

/// Two circular entities collide iff their center distance is strictly less
/// than the sum of their radii. Touching is not colliding.
pub fn collides(a: &impl Collider, b: &impl Collider) -> bool {
    a.position().distance(b.position()) < a.radius() + b.radius()
}

/// A free-standing circle, used as a collision probe for placement checks
/// and click hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub position: Vec2,
    pub radius: f64,
}

impl Circle {
    pub const fn new(position: Vec2, radius: f64) -> Self {
        Self { position, radius }
    }

    /// A zero-radius probe: collides with anything whose circle strictly
    /// contains the point.
    pub const fn point(position: Vec2) -> Self {
        Self {
            position,
            radius: 0.0,
        }
    }
}

impl Collider for Circle {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
