//! Sporefall Core -- the simulation engine for an incremental
//! mining/automation game.
//!
//! A player-controlled minion moves across a 2D plane, mines resources,
//! builds factories, and researches upgrades that unlock automation
//! (auto-mining, auto-seeking, seeding). Depleted resources leave spores
//! that can be bred back into fresh resources. This crate is the complete
//! simulation core; rendering, input mapping, and viewport handling live in
//! an embedding shell that talks to it through a narrow seam.
//!
//! # Stepping Model
//!
//! The shell feeds elapsed wall-clock time into [`driver::StepDriver`] once
//! per animation frame. The driver converts it into whole fixed-size ticks
//! (carrying the exact fractional remainder) and calls
//! [`scene::Scene::step`] once per tick. Each tick runs one or more
//! sub-steps -- the count ramps up exponentially while no minion sits idle
//! -- and each sub-step advances the lab, then every minion in collection
//! order, then the spores.
//!
//! The scene pauses itself whenever any minion is idle or awaiting a move
//! target: collision checks and status transitions still run, but no
//! continuous progress (movement, research, mining, breeding) is made. The
//! game only plays while every minion has work.
//!
//! # Exact Accounting
//!
//! All economic quantities -- inventory, costs, velocities, completion
//! fractions, the driver's time remainder -- are exact
//! [`rational::Rational`] fractions. Mining returns the amount actually
//! removed and the caller credits exactly that, so the global inventory
//! always equals cumulative depletion with no float drift.
//!
//! # Key Types
//!
//! - [`scene::Scene`] -- root of all mutable state; stepping, click
//!   dispatch, and command execution.
//! - [`driver::StepDriver`] -- fixed-timestep accumulator.
//! - [`rational::Rational`] -- exact fraction arithmetic.
//! - [`minion::Minion`] -- movement/mining state machine.
//! - [`lab::Lab`] -- research state machine and the [`lab::Goal`] set.
//! - [`idmap::IdMap`] -- identity-keyed storage with never-reused ids.
//! - [`query::Drawable`] / [`query::UiModel`] -- read-only projections for
//!   the shell.
//! - [`command::Command`] -- externally submitted mutations.

pub mod command;
pub mod config;
pub mod driver;
pub mod factory;
pub mod id;
pub mod idmap;
pub mod lab;
pub mod minion;
pub mod query;
pub mod rational;
pub mod resource;
pub mod rng;
pub mod scene;
pub mod spore;
pub mod vector;
pub mod worldgen;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
