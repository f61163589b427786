//! Typed identifiers for simulation entities.
//!
//! Resources and spores live in [`crate::idmap::IdMap`] collections and get
//! monotonically increasing keys that are never reused. Minions and
//! factories are never destroyed, so their ids are plain indices into the
//! owning `Vec`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key allocated by an [`crate::idmap::IdMap`].
pub trait IdKey: Copy + Eq + Ord + fmt::Debug {
    fn from_index(index: u64) -> Self;
    fn index(self) -> u64;
}

macro_rules! id_key_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl IdKey for $name {
            fn from_index(index: u64) -> Self {
                Self(index)
            }

            fn index(self) -> u64 {
                self.0
            }
        }
    };
}

id_key_type! {
    /// Identifies a resource. Stays valid (as a lookup key that may miss)
    /// even after the resource is mined out and removed.
    ResourceId
}

id_key_type! {
    /// Identifies a spore.
    SporeId
}

/// Identifies a minion by its position in the scene's minion collection.
/// Minions are never destroyed, so indices are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MinionId(pub u32);

/// Identifies a factory by its position in the scene's factory collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactoryId(pub u32);
