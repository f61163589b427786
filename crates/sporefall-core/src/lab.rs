//! The research lab state machine.
//!
//! Research cost accrues proportionally to progress: each unpaused step
//! debits `Δcompletion * cost` from the inventory, so an interrupted
//! research has only been paid for the progress it actually made.
//! Preconditions (lab idle, a minion idle and colliding with the lab,
//! inventory covering the cost) are the button layer's responsibility;
//! the lab trusts its callers.

use crate::config::Config;
use crate::rational::Rational;
use crate::vector::{Collider, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A researchable upgrade. The set is closed: each goal unlocks one
/// automation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Goal {
    /// Minions interrupt whatever they are doing to mine a colliding
    /// resource.
    AutoMining,
    /// Unlocks the per-minion auto-seek toggle.
    AutoSeeking,
    /// Unlocks the seed command.
    Seeding,
}

impl Goal {
    pub const fn all() -> [Goal; 3] {
        [Goal::AutoMining, Goal::AutoSeeking, Goal::Seeding]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Goal::AutoMining => "auto-mining",
            Goal::AutoSeeking => "auto-seeking",
            Goal::Seeding => "seeding",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LabStatus {
    Idle,
    Researching { goal: Goal, completion: Rational },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub position: Vec2,
    pub radius: f64,
    pub status: LabStatus,
    researched: BTreeSet<Goal>,
}

impl Lab {
    pub fn new(position: Vec2, radius: f64) -> Self {
        Self {
            position,
            radius,
            status: LabStatus::Idle,
            researched: BTreeSet::new(),
        }
    }

    /// Legal only from idle.
    pub fn start_research(&mut self, goal: Goal) {
        self.status = LabStatus::Researching {
            goal,
            completion: Rational::ZERO,
        };
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.status, LabStatus::Idle)
    }

    pub fn researched(&self, goal: Goal) -> bool {
        self.researched.contains(&goal)
    }

    /// Completion of the research in progress, if any.
    pub fn completion(&self) -> Option<Rational> {
        match &self.status {
            LabStatus::Idle => None,
            LabStatus::Researching { completion, .. } => Some(*completion),
        }
    }

    pub fn step(&mut self, paused: bool, dt: Rational, config: &Config, inventory: &mut Rational) {
        if paused {
            return;
        }
        let LabStatus::Researching { goal, completion } = &self.status else {
            return;
        };
        let goal = *goal;
        let advanced = (*completion + dt * config.research_velocity).min(Rational::ONE);
        let progress = advanced - *completion;
        *inventory -= progress * config.research_cost(goal);
        if advanced == Rational::ONE {
            self.researched.insert(goal);
            self.status = LabStatus::Idle;
        } else {
            self.status = LabStatus::Researching {
                goal,
                completion: advanced,
            };
        }
    }
}

impl Collider for Lab {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::rat;

    fn lab() -> Lab {
        Lab::new(Vec2::ZERO, 2.0)
    }

    fn config_with(research_velocity: Rational, cost: Rational) -> Config {
        Config {
            research_velocity,
            auto_mining_cost: cost,
            ..Config::default()
        }
    }

    #[test]
    fn research_completes_after_exact_step_count() {
        // velocity 1/5, dt 1, free research: 3 steps reach 3/5, two more
        // finish the goal and return the lab to idle.
        let mut lab = lab();
        let config = config_with(rat(1, 5), Rational::ZERO);
        let mut inventory = Rational::ZERO;

        lab.start_research(Goal::AutoMining);
        for _ in 0..3 {
            lab.step(false, Rational::ONE, &config, &mut inventory);
        }
        assert_eq!(lab.completion(), Some(rat(3, 5)));
        assert!(!lab.researched(Goal::AutoMining));

        for _ in 0..2 {
            lab.step(false, Rational::ONE, &config, &mut inventory);
        }
        assert!(lab.is_idle());
        assert!(lab.researched(Goal::AutoMining));
        assert_eq!(inventory, Rational::ZERO);
    }

    #[test]
    fn cost_accrues_proportionally() {
        let mut lab = lab();
        let config = config_with(rat(1, 4), Rational::from_int(8));
        let mut inventory = Rational::from_int(8);

        lab.start_research(Goal::AutoMining);
        lab.step(false, Rational::ONE, &config, &mut inventory);
        // A quarter of the progress costs a quarter of the price.
        assert_eq!(inventory, Rational::from_int(6));

        for _ in 0..3 {
            lab.step(false, Rational::ONE, &config, &mut inventory);
        }
        assert!(lab.researched(Goal::AutoMining));
        assert_eq!(inventory, Rational::ZERO);
    }

    #[test]
    fn final_step_bills_only_remaining_progress() {
        // velocity 2/5: steps advance 2/5, 2/5, then clamp to the final 1/5.
        let mut lab = lab();
        let config = config_with(rat(2, 5), Rational::from_int(5));
        let mut inventory = Rational::from_int(5);

        lab.start_research(Goal::AutoMining);
        for _ in 0..3 {
            lab.step(false, Rational::ONE, &config, &mut inventory);
        }
        assert!(lab.researched(Goal::AutoMining));
        // Total debit is exactly the cost, not 3 * (2/5 * 5).
        assert_eq!(inventory, Rational::ZERO);
    }

    #[test]
    fn paused_steps_freeze_research() {
        let mut lab = lab();
        let config = config_with(rat(1, 5), Rational::from_int(5));
        let mut inventory = Rational::from_int(5);

        lab.start_research(Goal::AutoSeeking);
        lab.step(true, Rational::ONE, &config, &mut inventory);
        assert_eq!(lab.completion(), Some(Rational::ZERO));
        assert_eq!(inventory, Rational::from_int(5));
    }

    #[test]
    fn idle_lab_ignores_steps() {
        let mut lab = lab();
        let config = Config::default();
        let mut inventory = Rational::ZERO;
        lab.step(false, Rational::ONE, &config, &mut inventory);
        assert!(lab.is_idle());
        assert_eq!(inventory, Rational::ZERO);
    }
}
