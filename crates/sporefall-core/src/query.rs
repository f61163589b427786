//! Read-only projections for the rendering shell.
//!
//! Owned snapshot types -- no references into scene storage, so the shell
//! may hold them across frames or ship them over an FFI boundary.

use crate::command::Command;
use crate::id::{FactoryId, MinionId, ResourceId, SporeId};
use crate::rational::Rational;
use crate::vector::Vec2;

// ---------------------------------------------------------------------------
// Drawables
// ---------------------------------------------------------------------------

/// One drawable entity: kind tag, position, radius, and kind-specific
/// extras.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Resource {
        id: ResourceId,
        position: Vec2,
        radius: f64,
        units_left: Rational,
    },
    Spore {
        id: SporeId,
        position: Vec2,
        radius: f64,
        /// `None` while dormant.
        completion: Option<Rational>,
    },
    Factory {
        id: FactoryId,
        position: Vec2,
        radius: f64,
    },
    Lab {
        position: Vec2,
        radius: f64,
        /// `None` while idle.
        completion: Option<Rational>,
    },
    Minion {
        id: MinionId,
        position: Vec2,
        radius: f64,
        focused: bool,
        activity: MinionActivity,
    },
}

/// Coarse minion status for rendering; the full payload stays inside the
/// simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinionActivity {
    Idle,
    AwaitingTarget,
    Moving,
    Mining,
}

// ---------------------------------------------------------------------------
// UI model
// ---------------------------------------------------------------------------

/// The interface projection: inventory readout, pending-interaction label,
/// and every button the shell should offer.
#[derive(Debug, Clone, PartialEq)]
pub struct UiModel {
    /// Inventory formatted with two decimal digits.
    pub inventory: String,
    /// Label for the pending interaction, if a click is being awaited.
    pub active_command: Option<&'static str>,
    pub buttons: Vec<ButtonSpec>,
}

/// One button the shell should render. Buttons whose contextual
/// preconditions fail are absent; buttons that only lack funds are present
/// but disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub id: String,
    pub label: &'static str,
    pub disabled: bool,
    /// `Some` for toggle buttons.
    pub checked: Option<bool>,
    /// What pressing the button submits to `Scene::execute`.
    pub command: Command,
}
