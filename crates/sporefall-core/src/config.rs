//! Session configuration. Created once per game session and read-only
//! during play; tests mutate it to parametrize scenarios, the simulation
//! itself never writes to it.

use crate::lab::Goal;
use crate::rational::{Rational, rat};
use crate::vector::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Initial viewport size, consumed by the rendering shell.
    pub viewport_size: Vec2,
    /// Zoom rate, consumed by the rendering shell.
    pub zoom_rate: f64,

    /// Fixed simulation tick size. The step driver always calls
    /// `Scene::step` with exactly this delta.
    pub step_time_delta: Rational,
    /// Minion movement speed, distance per time unit.
    pub velocity: Rational,
    /// Research completion gained per time unit.
    pub research_velocity: Rational,
    /// Resource fraction mined per time unit.
    pub mining_velocity: Rational,
    /// Spore completion gained per time unit.
    pub breeding_velocity: Rational,

    /// Inventory cost of building a factory (and its minion).
    pub factory_cost: Rational,
    /// Inventory cost of one seeding event.
    pub seeding_cost: Rational,
    pub auto_mining_cost: Rational,
    pub auto_seeking_cost: Rational,
    pub seeding_research_cost: Rational,

    /// Resources placed per seeding event (spore conversion or the seed
    /// command).
    pub seeding_resources: u32,
    /// Seeded resources land within this distance of the seeding center.
    pub seeding_radius: f64,
    /// Resources placed at world generation.
    pub initial_resources: u32,
    /// Half-width of the square region sampled by world generation.
    pub world_scale: f64,
    pub world_seed: u64,

    /// Consecutive unpaused ticks required to double the sub-step count.
    pub steps_before_speedup: u64,

    pub minion_radius: f64,
    /// Resource radius at full units; shrinks proportionally as it is mined.
    pub resource_radius: f64,
    /// Units a freshly seeded resource holds.
    pub resource_units: Rational,
    pub spore_radius: f64,
    pub factory_radius: f64,
    pub lab_position: Vec2,
    pub lab_radius: f64,
    pub minion_start: Vec2,
}

impl Config {
    pub fn research_cost(&self, goal: Goal) -> Rational {
        match goal {
            Goal::AutoMining => self.auto_mining_cost,
            Goal::AutoSeeking => self.auto_seeking_cost,
            Goal::Seeding => self.seeding_research_cost,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport_size: Vec2::new(800.0, 600.0),
            zoom_rate: 1.1,
            step_time_delta: rat(1, 10),
            velocity: Rational::from_int(1),
            research_velocity: rat(1, 10),
            mining_velocity: rat(1, 4),
            breeding_velocity: rat(1, 10),
            factory_cost: Rational::from_int(5),
            seeding_cost: Rational::ONE,
            auto_mining_cost: Rational::from_int(2),
            auto_seeking_cost: Rational::from_int(3),
            seeding_research_cost: Rational::from_int(4),
            seeding_resources: 3,
            seeding_radius: 5.0,
            initial_resources: 8,
            world_scale: 20.0,
            world_seed: 0x5EED_CAFE,
            steps_before_speedup: 50,
            minion_radius: 1.0,
            resource_radius: 1.0,
            resource_units: Rational::ONE,
            spore_radius: 0.6,
            factory_radius: 1.5,
            lab_position: Vec2::new(0.0, 0.0),
            lab_radius: 2.0,
            minion_start: Vec2::new(4.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_well_formed() {
        let config = Config::default();
        assert!(config.step_time_delta > Rational::ZERO);
        assert!(config.velocity > Rational::ZERO);
        assert!(config.steps_before_speedup > 0);
        // The starting minion stands clear of the lab.
        let gap = config.minion_start.distance(config.lab_position);
        assert!(gap >= config.minion_radius + config.lab_radius);
    }

    #[test]
    fn research_costs_map_per_goal() {
        let config = Config::default();
        assert_eq!(config.research_cost(Goal::AutoMining), config.auto_mining_cost);
        assert_eq!(config.research_cost(Goal::AutoSeeking), config.auto_seeking_cost);
        assert_eq!(config.research_cost(Goal::Seeding), config.seeding_research_cost);
    }
}
