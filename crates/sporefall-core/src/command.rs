//! Externally submitted scene mutations.
//!
//! The UI layer never mutates entities directly: every button in
//! [`crate::query::UiModel`] carries the `Command` it triggers, and the
//! shell hands that value back to [`crate::scene::Scene::execute`].
//! Commands execute synchronously -- the model is single-threaded and the
//! button layer has already checked the preconditions, so there is nothing
//! to defer for.

use crate::id::MinionId;
use crate::lab::Goal;
use serde::{Deserialize, Serialize};

/// A single externally triggered operation on the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Put an idle minion into target-selection mode; the next scene click
    /// supplies the move target.
    PressMove { minion: MinionId },
    /// Start mining the first resource colliding with the minion.
    PressMine { minion: MinionId },
    /// Spend the factory cost: place a factory next to the minion and spawn
    /// a new minion beside it.
    BuildFactory { minion: MinionId },
    /// Make this minion the focused one.
    Focus { minion: MinionId },
    /// Flip the minion's auto-seek setting.
    ToggleAutoSeek { minion: MinionId },
    /// Start breeding the first dormant spore colliding with the minion.
    Breed { minion: MinionId },
    /// Start researching a goal at the lab.
    StartResearch { goal: Goal },
    /// Spend the seeding cost: scatter new resources around the minion.
    Seed { minion: MinionId },
}
