//! Strongly typed identifier wrappers.
//!
//! `AgentId` doubles as the index into every per-agent `Vec` in the
//! registry; social links between agents are stored as plain `AgentId`s,
//! never as references.

use std::fmt;

use crate::{Tick, TransportMode};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in the registry.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a population profile ("Young professional", "Retirees", …)
    /// in the profile table.
    pub struct ProfileId(u16);
}

/// Identifier of one delegated trip in the external traffic engine.
///
/// Unique per (agent, mode, departure tick); an agent can hold at most one
/// active trip so collisions cannot happen within a run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripId {
    pub agent: AgentId,
    pub mode:  TransportMode,
    pub tick:  Tick,
}

impl TripId {
    #[inline]
    pub fn new(agent: AgentId, mode: TransportMode, tick: Tick) -> Self {
        Self { agent, mode, tick }
    }
}

impl fmt::Display for TripId {
    /// Vehicle-id string handed to the traffic engine, e.g. `agent_7_car_480`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{}_{}_{}", self.agent.0, self.mode, self.tick.0)
    }
}
